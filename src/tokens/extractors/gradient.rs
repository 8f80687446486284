//! Gradient tokens
//!
//! Gradient functions are picked out of any declaration value, e.g. a
//! `background` shorthand that also carries an image url.

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::find_gradients;

pub struct GradientExtractor;

impl CategoryExtractor for GradientExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Gradient
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category(), |_, value| {
            let gradients = find_gradients(value);
            (!gradients.is_empty()).then(|| AliasMatch::new(gradients.join(", ")))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut counter = ValueCounter::new();
        for declaration in context.regular_declarations() {
            let value = declaration.value.as_str();
            for gradient in find_gradients(value) {
                counter.record(gradient);
            }
        }

        counter.into_generic_tokens(
            self.category().prefix(),
            context.generic_confidence(self.category()),
            |_| TokenDetails::generic(),
        )
    }
}
