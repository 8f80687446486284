//! Design token extraction
//!
//! Turns collected CSS into a ranked, categorized design token set. The
//! entry points are [`generator::TokenExtractor`] and
//! [`generator::generate_token_set`].

pub mod color_keywords;
pub mod dedupe;
pub mod extractors;
pub mod generator;
pub mod insights;
pub mod model;
pub mod ranker;
pub mod resolver;
pub mod token_set;
pub mod values;
pub mod variables;

#[cfg(test)]
mod generator_tests;
