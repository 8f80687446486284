//! Test utilities shared across the codebase

use crate::tokens::generator::{GeneratedTokenSet, generate_token_set};
use crate::tokens::model::{CssSource, Origin, SourceKind};

/// An inline source with the given CSS
pub fn css_source(content: &str) -> CssSource {
    CssSource::new(SourceKind::Inline, None, content)
}

/// Origin used by tests that don't care about it
pub fn test_origin() -> Origin {
    Origin::new("example.com", "https://example.com/")
}

/// Run the default extractor over one inline CSS text
pub fn extract(css: &str) -> GeneratedTokenSet {
    generate_token_set(&[css_source(css)], test_origin())
}
