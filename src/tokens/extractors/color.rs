//! Color tokens
//!
//! Generic lane scans every declaration value for hex colors. Aliases accept
//! any color token: hex, `rgb()`/`hsl()` functions or named colors.

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::{find_hex_colors, is_color_token, normalize_color};

pub struct ColorExtractor;

impl CategoryExtractor for ColorExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Color
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category(), |_, value| {
            is_color_token(value).then(|| AliasMatch::new(normalize_color(value)))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut counter = ValueCounter::new();
        for declaration in context.regular_declarations() {
            let value = declaration.value.as_str();
            for hex in find_hex_colors(value) {
                counter.record(hex);
            }
        }

        counter.into_generic_tokens(
            self.category().prefix(),
            context.generic_confidence(self.category()),
            |_| TokenDetails::generic(),
        )
    }
}
