//! Tree-sitter node kind constants
//!
//! Node kinds of the tree-sitter-css grammar that the declaration walker
//! relies on.

/// Root node of the CSS syntax tree
pub const NODE_STYLESHEET: &str = "stylesheet";
/// A single property-value pair (e.g., `color: red;`)
pub const NODE_DECLARATION: &str = "declaration";
/// CSS property name (e.g., `color`, `--brand`)
pub const NODE_PROPERTY_NAME: &str = "property_name";
/// Parser recovery node wrapping text that did not fit the grammar
pub const NODE_ERROR: &str = "ERROR";

/// Separator between property name and value
pub const TOKEN_COLON: &str = ":";
/// Declaration terminator
pub const TOKEN_SEMICOLON: &str = ";";

/// Prefix of custom property names
pub const CUSTOM_PROPERTY_PREFIX: &str = "--";
