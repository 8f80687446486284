//! Quality insight rollups over ranked token groups

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tokens::model::{TokenCategory, TokenGroups, TokenSummary};
use crate::tokens::ranker::compare_rank;

/// Rollup of one category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub total_usage: u32,
    /// Rounded mean confidence, 0 for an empty category
    pub average_confidence: u8,
    pub token_count: usize,
    /// Leading tokens in rank order
    pub top_tokens: Vec<TokenSummary>,
}

/// Token tagged with its category, used by the overall listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedToken {
    pub category: TokenCategory,
    #[serde(flatten)]
    pub token: TokenSummary,
}

/// Rollup across all categories
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallInsight {
    pub total_usage: u32,
    pub average_confidence: u8,
    /// Best tokens by quality score
    pub top_tokens: Vec<RankedToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityInsights {
    /// One entry per category, empty categories included
    pub categories: BTreeMap<TokenCategory, CategoryInsight>,
    pub overall: OverallInsight,
}

impl QualityInsights {
    /// Zeroed insights with every category present
    pub fn empty() -> Self {
        Self {
            categories: TokenCategory::ALL
                .into_iter()
                .map(|category| (category, CategoryInsight::default()))
                .collect(),
            overall: OverallInsight::default(),
        }
    }

    pub fn category(&self, category: TokenCategory) -> Option<&CategoryInsight> {
        self.categories.get(&category)
    }
}

fn average_confidence<'a>(tokens: impl Iterator<Item = &'a TokenSummary>) -> u8 {
    let (sum, count) = tokens.fold((0u32, 0u32), |(sum, count), t| (sum + t.confidence as u32, count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u8
}

fn total_usage<'a>(tokens: impl Iterator<Item = &'a TokenSummary>) -> u32 {
    tokens.map(|t| t.usage).fold(0u32, u32::saturating_add)
}

/// Quality descending, ties broken by the rank order
fn compare_quality(a: &TokenSummary, b: &TokenSummary) -> Ordering {
    b.quality_score
        .cmp(&a.quality_score)
        .then_with(|| compare_rank(a, b))
}

/// Build the insights of ranked groups
pub fn build_insights(groups: &TokenGroups, category_top: usize, overall_top: usize) -> QualityInsights {
    let mut categories = BTreeMap::new();
    for (category, tokens) in groups.iter() {
        categories.insert(
            category,
            CategoryInsight {
                total_usage: total_usage(tokens.iter()),
                average_confidence: average_confidence(tokens.iter()),
                token_count: tokens.len(),
                top_tokens: tokens.iter().take(category_top).cloned().collect(),
            },
        );
    }

    let mut all: Vec<RankedToken> = groups
        .iter()
        .flat_map(|(category, tokens)| {
            tokens.iter().map(move |token| RankedToken {
                category,
                token: token.clone(),
            })
        })
        .collect();

    let overall = OverallInsight {
        total_usage: total_usage(all.iter().map(|r| &r.token)),
        average_confidence: average_confidence(all.iter().map(|r| &r.token)),
        top_tokens: {
            all.sort_by(|a, b| compare_quality(&a.token, &b.token));
            all.truncate(overall_top);
            all
        },
    };

    QualityInsights { categories, overall }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::ranker::rank_tokens;

    fn ranked_groups() -> TokenGroups {
        let mut groups = TokenGroups::default();
        groups.colors = rank_tokens(vec![
            TokenSummary::new("color-brand", "#112233", 88, 4),
            TokenSummary::new("color-generic-1", "#445566", 82, 1),
        ]);
        groups.spacing = rank_tokens(vec![
            TokenSummary::new("spacing-generic-1", "8px", 72, 2),
            TokenSummary::new("spacing-generic-2", "4px", 72, 1),
            TokenSummary::new("spacing-generic-3", "2px", 72, 1),
        ]);
        groups
    }

    #[test]
    fn test_category_rollups() {
        let insights = build_insights(&ranked_groups(), 2, 10);

        let colors = insights.category(TokenCategory::Color).unwrap();
        assert_eq!(colors.total_usage, 5);
        assert_eq!(colors.average_confidence, 85);
        assert_eq!(colors.token_count, 2);

        let spacing = insights.category(TokenCategory::Spacing).unwrap();
        assert_eq!(spacing.top_tokens.len(), 2);
        assert_eq!(spacing.top_tokens[0].name, "spacing-generic-1");

        let borders = insights.category(TokenCategory::Border).unwrap();
        assert_eq!(borders, &CategoryInsight::default());
        assert_eq!(insights.categories.len(), 8);
    }

    #[test]
    fn test_overall_top_tokens_by_quality() {
        let insights = build_insights(&ranked_groups(), 5, 3);

        assert_eq!(insights.overall.total_usage, 9);
        assert_eq!(insights.overall.top_tokens.len(), 3);
        assert_eq!(insights.overall.top_tokens[0].token.name, "color-brand");
        assert_eq!(insights.overall.top_tokens[0].category, TokenCategory::Color);
        assert_eq!(insights.overall.top_tokens[1].token.name, "spacing-generic-1");

        let scores: Vec<u8> = insights
            .overall
            .top_tokens
            .iter()
            .map(|r| r.token.quality_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_empty_groups() {
        let insights = build_insights(&TokenGroups::default(), 5, 10);
        assert_eq!(insights, QualityInsights::empty());
    }

    #[test]
    fn test_ranked_token_serializes_flat() {
        let insights = build_insights(&ranked_groups(), 5, 1);
        let value = serde_json::to_value(&insights.overall).unwrap();
        assert_eq!(value["topTokens"][0]["category"], "color");
        assert_eq!(value["topTokens"][0]["name"], "color-brand");
        assert_eq!(value["topTokens"][0]["qualityScore"], 95);
    }
}
