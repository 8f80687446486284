//! Shadow tokens
//!
//! `box-shadow` and `text-shadow` lists are split on commas outside
//! parentheses, each shadow becomes its own token.

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::{collapse_whitespace, is_shadow_value, split_top_level};

pub const SHADOW_PROPERTIES: &[&str] = &["box-shadow", "text-shadow"];

/// Split a shadow list into individual, whitespace collapsed shadows.
/// `none` yields nothing.
pub fn split_shadows(value: &str) -> Vec<String> {
    split_top_level(value, ',')
        .iter()
        .map(|segment| collapse_whitespace(segment))
        .filter(|segment| !segment.eq_ignore_ascii_case("none"))
        .collect()
}

pub struct ShadowExtractor;

impl CategoryExtractor for ShadowExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Shadow
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category(), |_, value| {
            is_shadow_value(value).then(|| AliasMatch::new(split_shadows(value).join(", ")))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut counter = ValueCounter::new();
        for declaration in context
            .regular_declarations()
            .filter(|d| SHADOW_PROPERTIES.contains(&d.property.as_str()))
        {
            let value = declaration.value.as_str();
            for shadow in split_shadows(value) {
                counter.record(shadow);
            }
        }

        counter.into_generic_tokens(
            self.category().prefix(),
            context.generic_confidence(self.category()),
            |_| TokenDetails::generic(),
        )
    }
}
