//! Spacing and radius tokens
//!
//! Both are property allow-list extractors over dimension values. Generic
//! values are only whitespace collapsed, multi value shorthands like
//! `8px 16px` are kept as one token. Aliases need a name hint and a value
//! made of dimensions, since a bare `8px` could be anything.

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
    name_has_hint,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::{collapse_whitespace, is_dimension_list};

pub const SPACING_PROPERTIES: &[&str] = &[
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "gap",
    "row-gap",
    "column-gap",
    "width",
    "height",
    "min-width",
    "max-width",
    "min-height",
    "max-height",
    "inset",
    "top",
    "right",
    "bottom",
    "left",
];

const SPACING_HINTS: &[&str] = &[
    "space", "spacing", "gap", "gutter", "margin", "padding", "inset", "offset",
];

pub const RADIUS_PROPERTIES: &[&str] = &[
    "border-radius",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-right-radius",
    "border-bottom-left-radius",
];

const RADIUS_HINTS: &[&str] = &["radius", "radii", "rounded", "corner"];

/// Allow-list extractor for dimension valued categories
pub struct DimensionExtractor {
    category: TokenCategory,
    properties: &'static [&'static str],
    name_hints: &'static [&'static str],
}

impl DimensionExtractor {
    pub fn spacing() -> Self {
        Self {
            category: TokenCategory::Spacing,
            properties: SPACING_PROPERTIES,
            name_hints: SPACING_HINTS,
        }
    }

    pub fn radius() -> Self {
        Self {
            category: TokenCategory::Radius,
            properties: RADIUS_PROPERTIES,
            name_hints: RADIUS_HINTS,
        }
    }

    fn accepts_property(&self, property: &str) -> bool {
        self.properties.contains(&property)
    }
}

impl CategoryExtractor for DimensionExtractor {
    fn category(&self) -> TokenCategory {
        self.category
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category, |name, value| {
            (name_has_hint(name, self.name_hints) && is_dimension_list(value))
                .then(|| AliasMatch::new(collapse_whitespace(value)))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut counter = ValueCounter::new();
        for declaration in context
            .regular_declarations()
            .filter(|d| self.accepts_property(&d.property))
        {
            counter.record(collapse_whitespace(&declaration.value));
        }

        counter.into_generic_tokens(
            self.category.prefix(),
            context.generic_confidence(self.category),
            |_| TokenDetails::generic(),
        )
    }
}
