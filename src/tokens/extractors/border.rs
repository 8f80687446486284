//! Border tokens
//!
//! Border and outline shorthands and longhands are decomposed into width,
//! style and color. The token value is the canonical `width style color`
//! form and the parts are kept in the token details.

use std::collections::HashMap;

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
};
use crate::tokens::model::{BorderParts, TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::parse_border;

pub const BORDER_PROPERTIES: &[&str] = &[
    "border",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-width",
    "border-style",
    "border-color",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline",
    "outline-width",
    "outline-style",
    "outline-color",
];

/// Whether a custom property value reads as a full border: a visible style
/// plus a width or a color
pub fn is_border_value(parts: &BorderParts) -> bool {
    let visible_style = matches!(parts.style.as_deref(), Some(style) if style != "none" && style != "hidden");
    visible_style && (parts.width.is_some() || parts.color.is_some())
}

pub struct BorderExtractor;

impl CategoryExtractor for BorderExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Border
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut tokens = alias_lane(context, self.category(), |_, value| {
            let parts = parse_border(value);
            is_border_value(&parts).then(|| AliasMatch::new(parts.to_value()))
        });
        for token in &mut tokens {
            if let Some(details) = token.details.take() {
                token.details = Some(details.with_border(parse_border(&token.value)));
            }
        }
        tokens
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let mut counter = ValueCounter::new();
        let mut parts_by_value: HashMap<String, BorderParts> = HashMap::new();

        for declaration in context
            .regular_declarations()
            .filter(|d| BORDER_PROPERTIES.contains(&d.property.as_str()))
        {
            let value = declaration.value.as_str();
            let parts = parse_border(value);
            let canonical = parts.to_value();
            parts_by_value.entry(canonical.clone()).or_insert(parts);
            counter.record(canonical);
        }

        counter.into_generic_tokens(
            self.category().prefix(),
            context.generic_confidence(self.category()),
            |value| {
                let details = TokenDetails::generic();
                match parts_by_value.get(value) {
                    Some(parts) => details.with_border(parts.clone()),
                    None => details,
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_border_value() {
        assert!(is_border_value(&parse_border("1px solid #eee")));
        assert!(is_border_value(&parse_border("dashed red")));
        assert!(!is_border_value(&parse_border("none")));
        assert!(!is_border_value(&parse_border("8px")));
        assert!(!is_border_value(&parse_border("solid")));
    }
}
