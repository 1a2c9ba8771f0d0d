//! Go frontend using Tree-sitter.

use chainlint_core::{Frontend, ParseError, SourceFile};
use tree_sitter::{Language, Node, Parser};
use tracing::debug;

use crate::lower;

/// Parses Go source into the chainlint syntax model.
pub struct GoFrontend {
    language: Language,
}

impl GoFrontend {
    /// Creates a new Go frontend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for GoFrontend {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(0, 0, format!("failed to load Go grammar: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(0, 0, "parser produced no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(first_error(root));
        }

        let file = lower::source_file(root, source);
        debug!(
            "Lowered {} declarations ({} functions)",
            file.decls.len(),
            file.functions().count()
        );
        Ok(file)
    }
}

/// Locates the first `ERROR` or missing node in document order.
fn first_error(root: Node<'_>) -> ParseError {
    let mut node = root;
    loop {
        let mut cursor = node.walk();
        let next = node
            .children(&mut cursor)
            .find(|child| child.is_error() || child.is_missing() || child.has_error());

        match next {
            Some(child) if child.is_missing() => {
                let pos = child.start_position();
                return ParseError::new(
                    pos.row + 1,
                    pos.column + 1,
                    format!("missing `{}`", child.kind()),
                );
            }
            Some(child) if child.is_error() => {
                let pos = child.start_position();
                return ParseError::new(pos.row + 1, pos.column + 1, "syntax error");
            }
            Some(child) => node = child,
            None => {
                let pos = node.start_position();
                return ParseError::new(pos.row + 1, pos.column + 1, "syntax error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parses_valid_source() {
        let file = GoFrontend::new()
            .parse("package main\n\nfunc main() {}\n")
            .expect("parse");
        assert_eq!(file.functions().count(), 1);
    }

    #[test]
    fn test_reports_syntax_error_position() {
        let err = GoFrontend::new()
            .parse("package main\n\nfunc main() {\n\tx := \n")
            .expect_err("should fail");
        assert!(err.line >= 3, "unexpected line {}", err.line);
    }

    #[test]
    fn test_handles_go_files_only() {
        let frontend = GoFrontend::new();
        assert_eq!(frontend.language_id(), "go");
        assert!(frontend.handles(Path::new("pkg/server.go")));
        assert!(!frontend.handles(Path::new("pkg/server.rs")));
    }
}
