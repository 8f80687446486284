//! Declaration walker
//!
//! Flattens a tree-sitter-css syntax tree into the list of declarations it
//! contains, in document order. Declarations nested in at-rules (`@media`,
//! `@supports`, `@keyframes`) are included, selectors are not kept.

use tree_sitter::Node;

use crate::css::constants::{
    CUSTOM_PROPERTY_PREFIX, NODE_DECLARATION, NODE_ERROR, NODE_PROPERTY_NAME, TOKEN_COLON,
    TOKEN_SEMICOLON,
};

/// A single `property: value` pair from the stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name. Lowercased, except custom properties which are case sensitive
    pub property: String,
    /// Raw value text between the colon and the terminating semicolon, may still
    /// contain `!important`
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Whether this declares a custom property (`--name: value`)
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with(CUSTOM_PROPERTY_PREFIX)
    }
}

/// Collect every declaration of the tree in document order
pub fn collect_declarations(root: Node, content: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    walk_preorder(root, |node| {
        if node.kind() != NODE_DECLARATION {
            return true;
        }
        if let Some(declaration) = declaration_from_node(node, content) {
            declarations.push(declaration);
        }
        // declarations don't nest
        false
    });
    declarations
}

/// Number of recovery nodes in the tree, i.e. fragments the parser skipped
pub fn count_error_nodes(root: Node) -> usize {
    if !root.has_error() {
        return 0;
    }

    let mut count = 0;
    walk_preorder(root, |node| {
        if node.kind() == NODE_ERROR || node.is_missing() {
            count += 1;
        }
        node.has_error()
    });
    count
}

/// Visit `root` and its descendants in document order with a single cursor,
/// so nesting depth doesn't grow the stack. `visit` returns whether to
/// descend into the node's children.
fn walk_preorder<'tree>(root: Node<'tree>, mut visit: impl FnMut(Node<'tree>) -> bool) {
    let mut cursor = root.walk();
    loop {
        if visit(cursor.node()) && cursor.goto_first_child() {
            continue;
        }
        // the cursor can't leave `root`, so both moves fail once it's back there
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Read property and value of a declaration node
///
/// The value is taken as source text rather than from the value children, so
/// values tree-sitter only partially understood are still kept verbatim.
fn declaration_from_node(node: Node, content: &str) -> Option<Declaration> {
    let mut property_node = None;
    let mut colon_node = None;
    let mut last_child = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if property_node.is_none() && child.kind() == NODE_PROPERTY_NAME {
            property_node = Some(child);
        } else if colon_node.is_none() && child.kind() == TOKEN_COLON {
            colon_node = Some(child);
        }
        last_child = Some(child);
    }

    let property_text = content.get(property_node?.byte_range())?.trim();
    if property_text.is_empty() {
        return None;
    }

    let value_start = colon_node?.end_byte();
    let value_end = match last_child {
        Some(last) if last.kind() == TOKEN_SEMICOLON => last.start_byte(),
        _ => node.end_byte(),
    };
    if value_end < value_start {
        return None;
    }
    let value = content.get(value_start..value_end)?.trim();

    let property = if property_text.starts_with(CUSTOM_PROPERTY_PREFIX) {
        property_text.to_string()
    } else {
        property_text.to_ascii_lowercase()
    };

    Some(Declaration::new(property, value))
}
