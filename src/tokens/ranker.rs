//! Token ranking
//!
//! Scores every token of a category from its normalized usage and its
//! confidence, flags weak tokens and sorts the category. The resulting order
//! is what "top tokens" listings and exports rely on.

use std::cmp::Ordering;

use crate::tokens::model::{TokenFlag, TokenSummary};

const USAGE_WEIGHT: f64 = 0.6;
const CONFIDENCE_WEIGHT: f64 = 0.4;
/// Tokens at or below this usage get [`TokenFlag::LowUsage`]
pub const LOW_USAGE_THRESHOLD: u32 = 1;
/// Tokens below this confidence get [`TokenFlag::LowConfidence`]
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 70;

/// `round((usage / max_usage * 0.6 + confidence / 100 * 0.4) * 100)`
pub fn quality_score(usage: u32, confidence: u8, max_usage: u32) -> u8 {
    let usage_score = usage as f64 / max_usage.max(1) as f64;
    let confidence_score = confidence as f64 / 100.0;
    let score = (usage_score * USAGE_WEIGHT + confidence_score * CONFIDENCE_WEIGHT) * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}

/// Usage descending, then confidence descending, then name ascending
pub fn compare_rank(a: &TokenSummary, b: &TokenSummary) -> Ordering {
    b.usage
        .cmp(&a.usage)
        .then_with(|| b.confidence.cmp(&a.confidence))
        .then_with(|| a.name.cmp(&b.name))
}

/// Score, flag and sort the tokens of one category
pub fn rank_tokens(mut tokens: Vec<TokenSummary>) -> Vec<TokenSummary> {
    let max_usage = tokens.iter().map(|t| t.usage).max().unwrap_or(1).max(1);

    for token in &mut tokens {
        token.quality_score = quality_score(token.usage, token.confidence, max_usage);
        token.flags.clear();
        if token.usage <= LOW_USAGE_THRESHOLD {
            token.flags.push(TokenFlag::LowUsage);
        }
        if token.confidence < LOW_CONFIDENCE_THRESHOLD {
            token.flags.push(TokenFlag::LowConfidence);
        }
    }

    tokens.sort_by(compare_rank);
    tokens
}
