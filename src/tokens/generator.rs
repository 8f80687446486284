//! Token extraction engine
//!
//! Ties the pipeline together: concatenate sources, parse, collect
//! declarations and custom properties, run every category extractor, rank,
//! assemble the token document and compute the insights. Every call owns its
//! parser and intermediate maps, so an extractor can be shared across threads.

use std::collections::HashSet;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::css::declarations::{collect_declarations, count_error_nodes};
use crate::css::parser::CssParser;
use crate::error::TokenResult;
use crate::tokens::extractors::{ExtractionContext, all_extractors, literal_declarations};
use crate::tokens::insights::{QualityInsights, build_insights};
use crate::tokens::model::{CssSource, Origin, TokenGroups};
use crate::tokens::ranker::rank_tokens;
use crate::tokens::resolver::ResolvedVariables;
use crate::tokens::token_set::TokenSetDocument;
use crate::tokens::variables::{VariableMap, VariableUsage};

const SUMMARY_CONFIDENCE: u8 = 82;
const SUMMARY_COMPLETENESS_BASE: u8 = 78;
const SUMMARY_COMPLETENESS_BONUS_CAP: usize = 12;
const SUMMARY_RELIABILITY: u8 = 80;

/// Headline numbers of a generated token set, all zero when nothing was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSetSummary {
    pub tokens_extracted: usize,
    pub confidence: u8,
    pub completeness: u8,
    pub reliability: u8,
}

impl TokenSetSummary {
    pub fn from_count(tokens_extracted: usize) -> Self {
        if tokens_extracted == 0 {
            return Self::default();
        }
        let bonus = tokens_extracted.min(SUMMARY_COMPLETENESS_BONUS_CAP) as u8;
        Self {
            tokens_extracted,
            confidence: SUMMARY_CONFIDENCE,
            completeness: SUMMARY_COMPLETENESS_BASE + bonus,
            reliability: SUMMARY_RELIABILITY,
        }
    }
}

/// Result of one extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTokenSet {
    pub origin: Origin,
    pub token_set: TokenSetDocument,
    /// SHA-256 hex of the serialized `token_set`
    pub token_set_hash: String,
    pub token_groups: TokenGroups,
    pub summary: TokenSetSummary,
    pub quality_insights: QualityInsights,
}

impl GeneratedTokenSet {
    /// The result for input with no usable CSS
    pub fn empty(origin: Origin) -> Self {
        let token_set = TokenSetDocument::default();
        Self {
            origin,
            token_set_hash: token_set.content_hash(),
            token_set,
            token_groups: TokenGroups::default(),
            summary: TokenSetSummary::default(),
            quality_insights: QualityInsights::empty(),
        }
    }

    fn from_groups(origin: Origin, token_groups: TokenGroups, config: &ExtractorConfig) -> Self {
        let token_set = TokenSetDocument::assemble(&token_groups);
        let quality_insights = build_insights(
            &token_groups,
            config.category_top_tokens,
            config.overall_top_tokens,
        );
        Self {
            origin,
            token_set_hash: token_set.content_hash(),
            token_set,
            summary: TokenSetSummary::from_count(token_groups.total()),
            token_groups,
            quality_insights,
        }
    }
}

/// Design token extractor
#[derive(Debug, Clone, Default)]
pub struct TokenExtractor {
    config: ExtractorConfig,
}

impl TokenExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Join the non-empty sources with newlines, skipping repeated content,
    /// and cap the result at the configured size
    pub fn concatenate_sources(&self, sources: &[CssSource]) -> String {
        let mut seen = HashSet::new();
        let mut css = String::new();

        for source in sources {
            if source.content.trim().is_empty() || !seen.insert(source.sha.as_str()) {
                continue;
            }
            if !css.is_empty() {
                css.push('\n');
            }
            css.push_str(&source.content);
        }

        let limit = self.config.max_input_bytes;
        if css.len() > limit {
            let mut cut = limit;
            while !css.is_char_boundary(cut) {
                cut -= 1;
            }
            warn!(
                "CSS input of {} bytes exceeds the {} byte limit, truncating",
                css.len(),
                limit
            );
            css.truncate(cut);
        }
        css
    }

    /// Extract tokens, failing only when the CSS parser can't be set up
    pub fn try_generate(&self, sources: &[CssSource], origin: Origin) -> TokenResult<GeneratedTokenSet> {
        let css = self.concatenate_sources(sources);
        if css.trim().is_empty() {
            debug!("No CSS content for {}", origin.url);
            return Ok(GeneratedTokenSet::empty(origin));
        }

        let mut parser = CssParser::new()?;
        let Some(tree) = parser.parse(&css) else {
            warn!("Failed to parse CSS for {}", origin.url);
            return Ok(GeneratedTokenSet::empty(origin));
        };

        let groups = self.extract_groups(&css, tree.root_node());
        Ok(GeneratedTokenSet::from_groups(origin, groups, &self.config))
    }

    /// Extract tokens. Parser setup failures are logged and yield the empty set.
    pub fn generate(&self, sources: &[CssSource], origin: Origin) -> GeneratedTokenSet {
        match self.try_generate(sources, origin.clone()) {
            Ok(token_set) => token_set,
            Err(e) => {
                error!("Token extraction failed for {}: {}", origin.url, e);
                GeneratedTokenSet::empty(origin)
            }
        }
    }

    fn extract_groups(&self, css: &str, root: tree_sitter::Node) -> TokenGroups {
        let skipped = count_error_nodes(root);
        if skipped > 0 {
            debug!("Parser skipped {} malformed fragments", skipped);
        }

        let declarations = collect_declarations(root, css);
        let variables = VariableMap::from_declarations(&declarations);
        let usage = VariableUsage::from_css(css);
        debug!(
            "Collected {} declarations and {} custom properties",
            declarations.len(),
            variables.len()
        );

        let resolved = if variables.is_empty() {
            ResolvedVariables::default()
        } else {
            ResolvedVariables::resolve(&variables)
        };
        let literals = literal_declarations(&declarations, &variables);
        debug!(
            "Resolved {} custom properties and {} literal declarations",
            resolved.len(),
            literals.len()
        );

        let context = ExtractionContext {
            css,
            literals: &literals,
            variables: &variables,
            resolved: &resolved,
            usage: &usage,
            confidence: &self.config.confidence,
        };

        let mut groups = TokenGroups::default();
        for extractor in all_extractors() {
            let category = extractor.category();
            let tokens = rank_tokens(extractor.extract(&context));
            debug!("Extracted {} {} tokens", tokens.len(), category.prefix());
            *groups.get_mut(category) = tokens;
        }
        groups
    }
}

/// Extract tokens with the default configuration
pub fn generate_token_set(sources: &[CssSource], origin: Origin) -> GeneratedTokenSet {
    TokenExtractor::default().generate(sources, origin)
}
