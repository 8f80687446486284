//! CSS parser using tree-sitter-css

use tree_sitter::{Parser, Tree};

use crate::error::{TokenError, TokenResult};

/// CSS parser wrapper around tree-sitter-css
///
/// A parser is cheap to create and is not shared between extractions.
pub struct CssParser {
    parser: Parser,
}

impl CssParser {
    /// Create a new CSS parser
    pub fn new() -> TokenResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_css::LANGUAGE.into())
            .map_err(|e| TokenError::TreeSitterLanguage {
                message: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    /// Parse CSS content and return the syntax tree
    ///
    /// Returns None only when tree-sitter gives up entirely
    pub fn parse(&mut self, content: &str) -> Option<Tree> {
        self.parser.parse(content, None)
    }
}
