//! Tokenizer output types.

use manasx_core::types::profile::{CommentDensity, CommentStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Variable,
    Function,
    Constant,
}

impl DeclKind {
    /// Profile category the declaration is tallied under.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Variable => "variables",
            Self::Function => "functions",
            Self::Constant => "constants",
        }
    }
}

/// A declared identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Byte offset of the name in the source.
    pub offset: usize,
}

/// A module specifier as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    pub source: String,
    /// Byte offset of the import statement.
    pub offset: usize,
}

impl ImportRef {
    /// `./x` and `../x` are relative; bare packages and aliases are absolute.
    pub fn is_relative(&self) -> bool {
        self.source.starts_with("./") || self.source.starts_with("../")
    }

    /// Whether the last path segment carries a file extension.
    pub fn has_extension(&self) -> bool {
        let last = self.source.rsplit('/').next().unwrap_or(&self.source);
        match last.rfind('.') {
            Some(idx) => idx > 0 && idx + 1 < last.len(),
            None => false,
        }
    }

    /// Top-level package name for non-relative imports (`@scope/pkg` kept whole).
    /// Node builtins keep their `node:` prefix stripped.
    pub fn package_name(&self) -> Option<String> {
        if self.is_relative() || self.source.starts_with('/') {
            return None;
        }
        let source = self.source.strip_prefix("node:").unwrap_or(&self.source);
        let mut parts = source.split('/');
        let first = parts.next()?;
        if first.is_empty() {
            return None;
        }
        if first.starts_with('@') && first.len() > 1 {
            return parts.next().map(|second| format!("{first}/{second}"));
        }
        Some(first.to_string())
    }
}

/// Comment statistics for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentStats {
    /// `//` comments.
    pub single_line: usize,
    /// `/* */` blocks.
    pub multi_line: usize,
    /// `/** */` blocks.
    pub doc: usize,
    /// Lines that are entirely comment.
    pub comment_lines: usize,
    pub non_empty_lines: usize,
    pub total_lines: usize,
}

impl CommentStats {
    /// Comment lines over total lines; 0.0 for an empty file.
    pub fn density(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.comment_lines as f64 / self.total_lines as f64
        }
    }

    pub fn density_bucket(&self) -> CommentDensity {
        CommentDensity::from_ratio(self.density())
    }

    /// Most frequent style; ties resolve single-line, multi-line, doc.
    pub fn dominant_style(&self) -> Option<CommentStyle> {
        let mut best: Option<(CommentStyle, usize)> = None;
        for (style, n) in [
            (CommentStyle::SingleLine, self.single_line),
            (CommentStyle::MultiLine, self.multi_line),
            (CommentStyle::Doc, self.doc),
        ] {
            if n == 0 {
                continue;
            }
            match best {
                Some((_, b)) if b >= n => {}
                _ => best = Some((style, n)),
            }
        }
        best.map(|(s, _)| s)
    }
}
