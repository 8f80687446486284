//! Typography tokens
//!
//! Five sub kinds are tracked independently, each with its own property and
//! validity predicate. Generic tokens are numbered per kind, e.g.
//! `typography-size-generic-2`.

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane,
    name_has_hint,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::{
    collapse_whitespace, is_color_token, is_valid_font_size, is_valid_font_weight, is_valid_letter_spacing,
    is_valid_line_height, normalize_font_family,
};

/// Variable name fragments that mark a custom property as typography
const TYPOGRAPHY_HINTS: &[&str] = &[
    "font", "text", "type", "leading", "tracking", "line-height", "letter", "weight",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographyKind {
    Family,
    Size,
    Weight,
    LineHeight,
    LetterSpacing,
}

impl TypographyKind {
    pub const ALL: [TypographyKind; 5] = [
        TypographyKind::Family,
        TypographyKind::Size,
        TypographyKind::Weight,
        TypographyKind::LineHeight,
        TypographyKind::LetterSpacing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypographyKind::Family => "family",
            TypographyKind::Size => "size",
            TypographyKind::Weight => "weight",
            TypographyKind::LineHeight => "line-height",
            TypographyKind::LetterSpacing => "letter-spacing",
        }
    }

    /// The longhand property this kind is read from
    pub fn property(self) -> &'static str {
        match self {
            TypographyKind::Family => "font-family",
            TypographyKind::Size => "font-size",
            TypographyKind::Weight => "font-weight",
            TypographyKind::LineHeight => "line-height",
            TypographyKind::LetterSpacing => "letter-spacing",
        }
    }

    /// Canonical value, or None when the value is not valid for this kind
    pub fn normalize(self, value: &str) -> Option<String> {
        let canonical = || collapse_whitespace(value).to_ascii_lowercase();
        match self {
            TypographyKind::Family => normalize_font_family(value),
            TypographyKind::Size => Some(canonical()).filter(|v| is_valid_font_size(v)),
            TypographyKind::Weight => Some(canonical()).filter(|v| is_valid_font_weight(v)),
            TypographyKind::LineHeight => Some(canonical()).filter(|v| is_valid_line_height(v)),
            TypographyKind::LetterSpacing => {
                Some(canonical()).filter(|v| is_valid_letter_spacing(v))
            }
        }
    }
}

/// Decide which typography kind a custom property holds, if any
pub fn classify_typography_variable(name: &str, value: &str) -> Option<(TypographyKind, String)> {
    if !name_has_hint(name, TYPOGRAPHY_HINTS) {
        return None;
    }
    let lower = name.to_ascii_lowercase();

    let hinted = if lower.contains("weight") {
        Some(TypographyKind::Weight)
    } else if lower.contains("line-height") || lower.contains("leading") {
        Some(TypographyKind::LineHeight)
    } else if lower.contains("letter") || lower.contains("tracking") {
        Some(TypographyKind::LetterSpacing)
    } else if lower.contains("family") {
        Some(TypographyKind::Family)
    } else {
        None
    };
    if let Some(kind) = hinted {
        return kind.normalize(value).map(|v| (kind, v));
    }

    // no specific hint, go by the value shape
    for kind in [TypographyKind::Size, TypographyKind::Weight] {
        if let Some(normalized) = kind.normalize(value) {
            return Some((kind, normalized));
        }
    }
    if !value.chars().any(|c| c.is_ascii_digit()) && !value.contains('(') && !is_color_token(value) {
        return TypographyKind::Family
            .normalize(value)
            .map(|v| (TypographyKind::Family, v));
    }
    None
}

pub struct TypographyExtractor;

impl CategoryExtractor for TypographyExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Typography
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category(), |name, value| {
            classify_typography_variable(name, value)
                .map(|(kind, normalized)| AliasMatch::new(normalized).with_kind(kind.as_str()))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let confidence = context.generic_confidence(self.category());
        let mut tokens = Vec::new();

        for kind in TypographyKind::ALL {
            let mut counter = ValueCounter::new();
            for declaration in context
                .regular_declarations()
                .filter(|d| d.property == kind.property())
            {
                if let Some(value) = kind.normalize(&declaration.value) {
                    counter.record(value);
                }
            }

            let prefix = format!("{}-{}", self.category().prefix(), kind.as_str());
            tokens.extend(counter.into_generic_tokens(&prefix, confidence, |_| {
                TokenDetails::generic().with_kind(kind.as_str())
            }));
        }
        tokens
    }
}
