//! CSS parsing layer
//!
//! Uses tree-sitter-css, which is fault tolerant: malformed rules become
//! `ERROR` nodes and the rest of the stylesheet still parses.

pub mod constants;
pub mod declarations;
pub mod parser;
