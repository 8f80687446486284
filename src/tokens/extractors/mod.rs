//! Category extractors
//!
//! Every category is extracted through two lanes:
//!
//! - **Alias lane**: custom properties whose resolved value passes the
//!   category predicate become `<category>-<variable>` tokens. Their usage is
//!   the number of `var(--name)` references (at least 1).
//! - **Generic lane**: literal values of matching declarations are counted,
//!   one `<category>-generic-<n>` token per distinct value, numbered in order
//!   of first appearance.
//!
//! The lanes are merged with [`merge_lanes`], alias tokens first.
//!
//! Variables and declaration values are resolved once per extraction, in
//! [`ResolvedVariables`] and [`literal_declarations`], and shared by every
//! extractor through the [`ExtractionContext`].

pub mod border;
pub mod color;
pub mod dimensions;
pub mod gradient;
pub mod motion;
pub mod shadow;
pub mod typography;

use std::collections::HashMap;

use crate::config::ConfidenceTable;
use crate::css::declarations::Declaration;
use crate::tokens::dedupe::merge_lanes;
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::resolver::{
    ResolvedVariables, contains_var_reference, is_single_var_reference, resolve_value,
};
use crate::tokens::values::{is_css_wide_keyword, sanitize_value};
use crate::tokens::variables::{VariableMap, VariableUsage};

/// A regular declaration with its literal value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralDeclaration {
    pub property: String,
    pub value: String,
}

/// Literal values of every declaration that is not a custom property, in
/// document order. Declarations without a literal value are left out, see
/// [`literal_value`].
pub fn literal_declarations(declarations: &[Declaration], variables: &VariableMap) -> Vec<LiteralDeclaration> {
    declarations
        .iter()
        .filter(|d| !d.is_custom_property())
        .filter_map(|d| {
            literal_value(&d.value, variables).map(|value| LiteralDeclaration {
                property: d.property.clone(),
                value,
            })
        })
        .collect()
}

/// Everything an extractor may read. Built once per extraction, read only.
pub struct ExtractionContext<'a> {
    /// Concatenated CSS text, for extractors that scan text instead of declarations
    pub css: &'a str,
    /// Regular declarations with their literal values, feed the generic lanes
    pub literals: &'a [LiteralDeclaration],
    pub variables: &'a VariableMap,
    /// Variables resolved once, feed the alias lanes
    pub resolved: &'a ResolvedVariables,
    pub usage: &'a VariableUsage,
    pub confidence: &'a ConfidenceTable,
}

impl<'a> ExtractionContext<'a> {
    /// Regular declarations with a literal value, custom properties only feed the alias lane
    pub fn regular_declarations(&self) -> impl Iterator<Item = &'a LiteralDeclaration> + 'a {
        self.literals.iter()
    }

    /// Alias confidence of a category
    pub fn alias_confidence(&self, category: TokenCategory) -> u8 {
        self.confidence.for_category(category).alias
    }

    /// Generic confidence of a category
    pub fn generic_confidence(&self, category: TokenCategory) -> u8 {
        self.confidence.for_category(category).generic
    }
}

/// Extractor of one token category
pub trait CategoryExtractor {
    fn category(&self) -> TokenCategory;

    /// Tokens backed by custom properties
    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary>;

    /// Tokens backed by repeated literal values
    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary>;

    /// Both lanes merged and deduplicated, not ranked yet
    fn extract(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        merge_lanes(self.alias_tokens(context), self.generic_tokens(context))
    }
}

/// All extractors in output order
pub fn all_extractors() -> Vec<Box<dyn CategoryExtractor>> {
    vec![
        Box::new(color::ColorExtractor),
        Box::new(typography::TypographyExtractor),
        Box::new(dimensions::DimensionExtractor::spacing()),
        Box::new(dimensions::DimensionExtractor::radius()),
        Box::new(shadow::ShadowExtractor),
        Box::new(motion::MotionExtractor),
        Box::new(gradient::GradientExtractor),
        Box::new(border::BorderExtractor),
    ]
}

/// A resolved alias candidate accepted by a category
pub struct AliasMatch {
    pub value: String,
    pub kind: Option<&'static str>,
}

impl AliasMatch {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Run the alias lane of a category.
///
/// `accept` gets the variable name (with `--`) and its resolved value, and
/// returns the canonical token value when the variable belongs to the category.
pub fn alias_lane(
    context: &ExtractionContext,
    category: TokenCategory,
    accept: impl Fn(&str, &str) -> Option<AliasMatch>,
) -> Vec<TokenSummary> {
    let confidence = context.alias_confidence(category);
    let mut tokens = Vec::new();

    for (name, resolved) in context.resolved.iter() {
        let Some(matched) = accept(name, resolved) else {
            continue;
        };

        let mut details = TokenDetails::alias(name);
        if let Some(kind) = matched.kind {
            details = details.with_kind(kind);
        }
        tokens.push(
            TokenSummary::new(
                alias_token_name(category, name),
                matched.value,
                confidence,
                context.usage.alias_usage(name),
            )
            .with_details(details),
        );
    }
    tokens
}

/// `<category>-<variable name without -->`
pub fn alias_token_name(category: TokenCategory, variable: &str) -> String {
    format!("{}-{}", category.prefix(), variable.trim_start_matches("--"))
}

/// Check whether a variable name contains any of the hint fragments
pub fn name_has_hint(variable: &str, hints: &[&str]) -> bool {
    let lower = variable.to_ascii_lowercase();
    hints.iter().any(|hint| lower.contains(hint))
}

/// Literal value of a declaration for the generic lane.
///
/// A value that is just one `var()` reference belongs to the alias lane and
/// yields None. Values mixing literals and references are resolved. CSS-wide
/// keywords are dropped.
pub fn literal_value(raw: &str, variables: &VariableMap) -> Option<String> {
    let value = sanitize_value(raw)?;
    if is_single_var_reference(&value) || is_css_wide_keyword(&value) {
        return None;
    }
    if contains_var_reference(&value) {
        let resolved = resolve_value(&value, variables)?;
        if contains_var_reference(&resolved) {
            return None;
        }
        return Some(resolved);
    }
    Some(value)
}

/// Occurrence counter that remembers first-seen order
#[derive(Debug, Default)]
pub struct ValueCounter {
    order: Vec<String>,
    counts: HashMap<String, u32>,
}

impl ValueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.clone(), 1);
                self.order.push(value);
            }
        }
    }

    /// Distinct values with their counts, in first-seen order
    pub fn into_entries(self) -> Vec<(String, u32)> {
        let Self { order, mut counts } = self;
        order
            .into_iter()
            .map(|value| {
                let count = counts.remove(&value).unwrap_or(1);
                (value, count)
            })
            .collect()
    }

    /// Turn the counts into generic tokens named `<prefix>-generic-<n>`
    pub fn into_generic_tokens(
        self,
        prefix: &str,
        confidence: u8,
        details: impl Fn(&str) -> TokenDetails,
    ) -> Vec<TokenSummary> {
        self.into_entries()
            .into_iter()
            .enumerate()
            .map(|(index, (value, count))| {
                let token_details = details(&value);
                TokenSummary::new(format!("{}-generic-{}", prefix, index + 1), value, confidence, count)
                    .with_details(token_details)
            })
            .collect()
    }
}
