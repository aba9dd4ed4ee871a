//! Regex-backed `LexicalTokenizer`.

use manasx_core::types::profile::ExportStyle;
use manasx_core::types::NamingConvention;

use super::patterns::{self, captures};
use super::types::{CommentStats, DeclKind, Declaration, ImportRef};
use super::LexicalTokenizer;

/// Default tokenizer for JavaScript and TypeScript sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl RegexTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl LexicalTokenizer for RegexTokenizer {
    fn declarations(&self, content: &str) -> Vec<Declaration> {
        let mut decls = Vec::new();

        for caps in captures(&patterns::RE_BINDING, content) {
            let (Some(keyword), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let kind = if caps.get(3).is_some() {
                DeclKind::Function
            } else if keyword.as_str() == "const"
                && NamingConvention::classify(name.as_str()) == NamingConvention::UpperCase
            {
                DeclKind::Constant
            } else {
                DeclKind::Variable
            };
            decls.push(Declaration {
                kind,
                name: name.as_str().to_string(),
                offset: name.start(),
            });
        }

        for caps in captures(&patterns::RE_FUNCTION, content) {
            if let Some(name) = caps.get(1) {
                decls.push(Declaration {
                    kind: DeclKind::Function,
                    name: name.as_str().to_string(),
                    offset: name.start(),
                });
            }
        }

        decls.sort_by_key(|d| d.offset);
        decls
    }

    fn imports(&self, content: &str) -> Vec<ImportRef> {
        let mut imports: Vec<ImportRef> = [
            &patterns::RE_ES_IMPORT,
            &patterns::RE_REQUIRE,
            &patterns::RE_DYNAMIC_IMPORT,
        ]
        .into_iter()
        .flat_map(|re| {
            captures(re, content).filter_map(|caps| {
                let whole = caps.get(0)?;
                let source = caps.get(1)?;
                // The ES pattern may consume leading whitespace; point at the keyword.
                let lead = whole.as_str().len() - whole.as_str().trim_start().len();
                Some(ImportRef {
                    source: source.as_str().to_string(),
                    offset: whole.start() + lead,
                })
            })
        })
        .collect();
        imports.sort_by_key(|i| i.offset);
        imports.dedup_by(|a, b| a.offset == b.offset && a.source == b.source);
        imports
    }

    fn export_style(&self, content: &str) -> Option<ExportStyle> {
        let named = patterns::is_match(&patterns::RE_NAMED_EXPORT, content);
        let default = patterns::is_match(&patterns::RE_DEFAULT_EXPORT, content);
        match (named, default) {
            (true, true) => Some(ExportStyle::Mixed),
            (true, false) => Some(ExportStyle::Named),
            (false, true) => Some(ExportStyle::Default),
            (false, false) => None,
        }
    }

    fn comments(&self, content: &str) -> CommentStats {
        let mut stats = CommentStats::default();
        let mut in_block = false;

        for line in content.lines() {
            stats.total_lines += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            stats.non_empty_lines += 1;

            if in_block {
                stats.comment_lines += 1;
                if trimmed.contains("*/") {
                    in_block = false;
                }
                continue;
            }

            if trimmed.starts_with("//") {
                stats.single_line += 1;
                stats.comment_lines += 1;
            } else if trimmed.starts_with("/*") {
                if trimmed.starts_with("/**") && !trimmed.starts_with("/**/") {
                    stats.doc += 1;
                } else {
                    stats.multi_line += 1;
                }
                stats.comment_lines += 1;
                if !trimmed[2..].contains("*/") {
                    in_block = true;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_declarations_by_kind() {
        let src = r#"
const MAX_RETRIES = 3;
let userName = "x";
var my_var = 1;
const handleClick = (e) => {};
const load = async () => {};
function fetchData(id) {}
"#;
        let decls = RegexTokenizer.declarations(src);
        let summary: Vec<(DeclKind, &str)> =
            decls.iter().map(|d| (d.kind, d.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (DeclKind::Constant, "MAX_RETRIES"),
                (DeclKind::Variable, "userName"),
                (DeclKind::Variable, "my_var"),
                (DeclKind::Function, "handleClick"),
                (DeclKind::Function, "load"),
                (DeclKind::Function, "fetchData"),
            ]
        );
        assert_eq!(&src[decls[2].offset..decls[2].offset + 6], "my_var");
    }

    #[test]
    fn extracts_all_import_forms() {
        let src = r#"import React from 'react';
import { a, b } from "./util.js";
import './styles.css';
const fs = require('fs');
const lazy = import('../lazy');
"#;
        let sources: Vec<String> = RegexTokenizer
            .imports(src)
            .into_iter()
            .map(|i| i.source)
            .collect();
        assert_eq!(
            sources,
            vec!["react", "./util.js", "./styles.css", "fs", "../lazy"]
        );
    }

    #[test]
    fn classifies_export_style() {
        assert_eq!(
            RegexTokenizer.export_style("export const a = 1;"),
            Some(ExportStyle::Named)
        );
        assert_eq!(
            RegexTokenizer.export_style("export default App;"),
            Some(ExportStyle::Default)
        );
        assert_eq!(
            RegexTokenizer.export_style("export function a() {}\nexport default a;"),
            Some(ExportStyle::Mixed)
        );
        assert_eq!(
            RegexTokenizer.export_style("module.exports = { a };"),
            Some(ExportStyle::Default)
        );
        assert_eq!(RegexTokenizer.export_style("const a = 1;"), None);
    }

    #[test]
    fn counts_comment_lines_and_styles() {
        let src = "/**\n * Docs.\n */\nfunction a() {}\n// note\n/* block */\nconst b = 1;\n";
        let stats = RegexTokenizer.comments(src);
        assert_eq!(stats.doc, 1);
        assert_eq!(stats.single_line, 1);
        assert_eq!(stats.multi_line, 1);
        assert_eq!(stats.comment_lines, 5);
        assert_eq!(stats.total_lines, 7);
    }
}
