//! CSS Design Tokens Library
//!
//! Extracts design tokens (colors, typography, spacing, radius, shadows,
//! motion, gradients and borders) from collected website CSS, ranks them and
//! assembles a Design-Tokens shaped document with quality insights.

pub mod config;
pub mod css;
pub mod error;
pub mod logging;
pub mod tokens;
#[cfg(test)]
pub mod test_utils;

pub use config::ExtractorConfig;
pub use error::{TokenError, TokenResult};
pub use tokens::generator::{GeneratedTokenSet, TokenExtractor, generate_token_set};
pub use tokens::model::{CssSource, Origin, SourceKind, TokenCategory, TokenSummary};
