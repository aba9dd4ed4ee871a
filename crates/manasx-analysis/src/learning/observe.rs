//! Per-file observation: the raw tallies one file contributes.

use manasx_core::types::profile::{ExtensionStyle, ImportStyle, RawCounts};
use manasx_core::types::NamingConvention;

use crate::tokenizer::{DeclKind, ImportRef, LexicalTokenizer};

/// Minimum non-empty lines before a file's comment density is counted.
pub const MIN_LINES_FOR_DENSITY: usize = 5;

/// Observe one file. `relative_path` uses forward slashes.
pub fn observe_file(
    relative_path: &str,
    content: &str,
    tokenizer: &dyn LexicalTokenizer,
) -> RawCounts {
    let mut raw = RawCounts {
        files_analyzed: 1,
        ..RawCounts::default()
    };

    // File name
    let name = file_name(relative_path);
    let convention = NamingConvention::classify(file_base(name));
    if convention != NamingConvention::Unknown {
        raw.naming.files.add(convention.as_str());
    }

    // Declarations
    for decl in tokenizer.declarations(content) {
        let convention = NamingConvention::classify(&decl.name);
        if convention == NamingConvention::Unknown {
            continue;
        }
        let tally = match decl.kind {
            DeclKind::Function => &mut raw.naming.functions,
            DeclKind::Constant => &mut raw.naming.constants,
            DeclKind::Variable => &mut raw.naming.variables,
        };
        tally.add(convention.as_str());
    }

    // Imports
    let imports = tokenizer.imports(content);
    for import in &imports {
        if import.is_relative() {
            raw.imports.style.add(ImportStyle::Relative.as_str());
            let ext = if import.has_extension() {
                ExtensionStyle::Explicit
            } else {
                ExtensionStyle::Implicit
            };
            raw.imports.extensions.add(ext.as_str());
        } else {
            raw.imports.style.add(ImportStyle::Absolute.as_str());
            if let Some(pkg) = import.package_name() {
                raw.imports.libraries.add(&pkg);
            }
        }
    }

    // Exports
    if let Some(style) = tokenizer.export_style(content) {
        raw.exports.add(style.as_str());
    }

    // Folder and file type
    if let Some(folder) = parent_folder(relative_path) {
        raw.folders.add(folder);
    }
    if let Some(ext) = name.rsplit_once('.').map(|(_, e)| e).filter(|e| !e.is_empty()) {
        raw.file_types.add(&ext.to_ascii_lowercase());
    }

    // Testing
    if let Some(naming) = test_file_naming(relative_path) {
        raw.testing.file_naming.add(naming);
        if let Some(framework) = test_framework(content, &imports) {
            raw.testing.framework.add(framework);
        }
    }

    // Comments
    let stats = tokenizer.comments(content);
    if let Some(style) = stats.dominant_style() {
        raw.comments.style.add(style.as_str());
    }
    if stats.non_empty_lines >= MIN_LINES_FOR_DENSITY {
        raw.comments.density.add(stats.density_bucket().as_str());
    }

    raw
}

/// Last path segment.
pub fn file_name(relative_path: &str) -> &str {
    relative_path.rsplit('/').next().unwrap_or(relative_path)
}

/// File name up to the first `.`, so `user-card.test.tsx` is `user-card`.
pub fn file_base(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Name of the directory directly containing the file; `None` at the root.
pub fn parent_folder(relative_path: &str) -> Option<&str> {
    let (dir, _) = relative_path.rsplit_once('/')?;
    dir.rsplit('/').next().filter(|s| !s.is_empty())
}

/// `.test`, `.spec` or `__tests__` when the path looks like a test file.
pub fn test_file_naming(relative_path: &str) -> Option<&'static str> {
    let name = file_name(relative_path);
    if name.contains(".test.") {
        Some(".test")
    } else if name.contains(".spec.") {
        Some(".spec")
    } else if relative_path.split('/').any(|seg| seg == "__tests__") {
        Some("__tests__")
    } else {
        None
    }
}

fn test_framework(content: &str, imports: &[ImportRef]) -> Option<&'static str> {
    for import in imports {
        match import.package_name().as_deref() {
            Some("vitest") => return Some("vitest"),
            Some("@jest/globals") | Some("jest") => return Some("jest"),
            Some("mocha") | Some("chai") => return Some("mocha"),
            Some("jasmine") => return Some("jasmine"),
            _ => {}
        }
    }
    if content.contains("jest.") {
        Some("jest")
    } else if content.contains("jasmine.") {
        Some("jasmine")
    } else if content.contains("vi.") {
        Some("vitest")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::RegexTokenizer;

    #[test]
    fn path_helpers() {
        assert_eq!(file_base("user-card.test.tsx"), "user-card");
        assert_eq!(parent_folder("src/components/Button.jsx"), Some("components"));
        assert_eq!(parent_folder("index.js"), None);
        assert_eq!(test_file_naming("src/a.spec.ts"), Some(".spec"));
        assert_eq!(test_file_naming("src/__tests__/a.ts"), Some("__tests__"));
        assert_eq!(test_file_naming("src/a.ts"), None);
    }

    #[test]
    fn observes_one_file() {
        let src = "import { x } from './x';\nimport lodash from 'lodash/fp';\nconst userName = x;\nexport const total = 1;\n";
        let raw = observe_file("src/utils/formatDate.js", src, &RegexTokenizer);
        assert_eq!(raw.files_analyzed, 1);
        assert_eq!(raw.naming.files.get("camelCase"), 1);
        assert_eq!(raw.naming.variables.get("camelCase"), 2);
        assert_eq!(raw.imports.style.get("relative"), 1);
        assert_eq!(raw.imports.style.get("absolute"), 1);
        assert_eq!(raw.imports.extensions.get("implicit"), 1);
        assert_eq!(raw.imports.libraries.get("lodash"), 1);
        assert_eq!(raw.exports.get("named"), 1);
        assert_eq!(raw.folders.get("utils"), 1);
        assert_eq!(raw.file_types.get("js"), 1);
    }

    #[test]
    fn test_files_record_framework() {
        let src = "import { describe, it } from 'vitest';\ndescribe('a', () => {});\n";
        let raw = observe_file("src/a.test.ts", src, &RegexTokenizer);
        assert_eq!(raw.testing.file_naming.get(".test"), 1);
        assert_eq!(raw.testing.framework.get("vitest"), 1);
    }
}
