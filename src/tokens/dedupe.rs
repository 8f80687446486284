//! Token deduplication
//!
//! Tokens are identified by name within a category. The first token with a
//! given name wins and later ones are dropped.

use std::collections::HashSet;

use crate::tokens::model::TokenSummary;

/// Keep the first occurrence of every token name, preserving order
pub fn dedupe_tokens(tokens: Vec<TokenSummary>) -> Vec<TokenSummary> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.name.clone()))
        .collect()
}

/// Merge the two extraction lanes of a category.
///
/// Precedence: alias lane tokens always come before generic lane tokens, so
/// when both lanes produce the same name the custom property backed token is
/// the one that survives deduplication.
pub fn merge_lanes(alias: Vec<TokenSummary>, generic: Vec<TokenSummary>) -> Vec<TokenSummary> {
    let mut merged = alias;
    merged.extend(generic);
    dedupe_tokens(merged)
}
