//! Byte offsets to line/column, and context snippets.

/// 1-based line and column of a byte offset. Offsets past the end map to
/// the last position.
pub fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// `size` lines either side of `line` (1-based), numbered, with the target
/// line marked by `>`.
pub fn context_lines(content: &str, line: usize, size: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() || line == 0 {
        return String::new();
    }
    let target = line.min(lines.len());
    let first = target.saturating_sub(size).max(1);
    let last = (target + size).min(lines.len());
    let width = last.to_string().len();
    (first..=last)
        .map(|n| {
            let marker = if n == target { '>' } else { ' ' };
            format!("{marker} {n:>width$} | {}", lines[n - 1])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_lines() {
        let src = "let a = 1;\nvar my_var = 2;\n";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 15), (2, 5));
        assert_eq!(line_col(src, 999), (3, 1));
    }

    #[test]
    fn context_is_clamped_to_file() {
        let src = "a\nb\nc\nd";
        let ctx = context_lines(src, 1, 2);
        assert_eq!(ctx, "> 1 | a\n  2 | b\n  3 | c");
        assert_eq!(context_lines("", 1, 2), "");
    }
}
