//! Extractor configuration
//!
//! All fields have defaults, so a config file only needs the keys it wants to
//! override. Config files can be JSON or YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoContext, JsonContext, TokenError, TokenResult};
use crate::tokens::model::TokenCategory;

/// Upstream collection caps computed CSS at 5MB, we use the same ceiling for the concatenated input
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_CATEGORY_TOP_TOKENS: usize = 5;
pub const DEFAULT_OVERALL_TOP_TOKENS: usize = 10;

/// Confidence assigned to the two extraction lanes of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfidence {
    /// Tokens backed by a custom property
    pub alias: u8,
    /// Tokens backed by a repeated literal value
    pub generic: u8,
}

impl LaneConfidence {
    pub const fn new(alias: u8, generic: u8) -> Self {
        Self { alias, generic }
    }

    fn clamped(self) -> Self {
        Self {
            alias: self.alias.min(100),
            generic: self.generic.min(100),
        }
    }
}

/// Provenance based confidence per category.
///
/// These are heuristics, not calibrated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceTable {
    pub color: LaneConfidence,
    pub typography: LaneConfidence,
    pub spacing: LaneConfidence,
    pub radius: LaneConfidence,
    pub shadow: LaneConfidence,
    pub motion: LaneConfidence,
    pub gradient: LaneConfidence,
    pub border: LaneConfidence,
}

impl Default for ConfidenceTable {
    fn default() -> Self {
        Self {
            color: LaneConfidence::new(88, 82),
            typography: LaneConfidence::new(86, 76),
            spacing: LaneConfidence::new(86, 72),
            radius: LaneConfidence::new(86, 72),
            shadow: LaneConfidence::new(86, 74),
            motion: LaneConfidence::new(84, 68),
            gradient: LaneConfidence::new(86, 70),
            border: LaneConfidence::new(84, 66),
        }
    }
}

impl ConfidenceTable {
    /// Get the lane confidences for a category
    pub fn for_category(&self, category: TokenCategory) -> LaneConfidence {
        match category {
            TokenCategory::Color => self.color,
            TokenCategory::Typography => self.typography,
            TokenCategory::Spacing => self.spacing,
            TokenCategory::Radius => self.radius,
            TokenCategory::Shadow => self.shadow,
            TokenCategory::Motion => self.motion,
            TokenCategory::Gradient => self.gradient,
            TokenCategory::Border => self.border,
        }
    }

    fn clamped(&self) -> Self {
        Self {
            color: self.color.clamped(),
            typography: self.typography.clamped(),
            spacing: self.spacing.clamped(),
            radius: self.radius.clamped(),
            shadow: self.shadow.clamped(),
            motion: self.motion.clamped(),
            gradient: self.gradient.clamped(),
            border: self.border.clamped(),
        }
    }
}

/// Configuration for a [`crate::tokens::generator::TokenExtractor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractorConfig {
    /// Ceiling on the concatenated CSS text, longer input is truncated
    pub max_input_bytes: usize,
    /// How many tokens each category insight lists
    pub category_top_tokens: usize,
    /// How many tokens the overall insight lists
    pub overall_top_tokens: usize,
    pub confidence: ConfidenceTable,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            category_top_tokens: DEFAULT_CATEGORY_TOP_TOKENS,
            overall_top_tokens: DEFAULT_OVERALL_TOP_TOKENS,
            confidence: ConfidenceTable::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse a config from a JSON string
    pub fn from_json_str(content: &str) -> TokenResult<Self> {
        let config: Self =
            serde_json::from_str(content).with_json_context("Failed to parse JSON config")?;
        Ok(config.normalized())
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(content: &str) -> TokenResult<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| TokenError::Yaml {
            message: "Failed to parse YAML config".to_string(),
            source: e,
        })?;
        Ok(config.normalized())
    }

    /// Load a config file, the format is picked by extension (`json`, `yaml`, `yml`)
    pub fn from_path(path: &Path) -> TokenResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let read = || {
            fs::read_to_string(path)
                .with_io_context(&format!("Failed to read config file {}", path.display()))
        };

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&read()?),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&read()?),
            _ => Err(TokenError::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Clamp confidences into 0-100 and make sure the top-N limits are usable
    fn normalized(mut self) -> Self {
        self.confidence = self.confidence.clamped();
        if self.max_input_bytes == 0 {
            self.max_input_bytes = DEFAULT_MAX_INPUT_BYTES;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_confidences_are_in_range() {
        let table = ConfidenceTable::default();
        for category in TokenCategory::ALL {
            let lanes = table.for_category(category);
            assert!(lanes.alias >= 84 && lanes.alias <= 88, "{:?}", category);
            assert!(lanes.generic >= 60 && lanes.generic <= 82, "{:?}", category);
            assert!(lanes.alias > lanes.generic);
        }
    }

    #[test]
    fn test_partial_json_config() {
        let config = ExtractorConfig::from_json_str(
            r#"{ "overallTopTokens": 3, "confidence": { "color": { "alias": 95, "generic": 50 } } }"#,
        )
        .unwrap();

        assert_eq!(config.overall_top_tokens, 3);
        assert_eq!(config.category_top_tokens, DEFAULT_CATEGORY_TOP_TOKENS);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(config.confidence.color, LaneConfidence::new(95, 50));
        assert_eq!(config.confidence.spacing, LaneConfidence::new(86, 72));
    }

    #[test]
    fn test_confidence_is_clamped() {
        let config = ExtractorConfig::from_json_str(
            r#"{ "confidence": { "border": { "alias": 200, "generic": 101 } } }"#,
        )
        .unwrap();
        assert_eq!(config.confidence.border, LaneConfidence::new(100, 100));
    }

    #[test]
    fn test_yaml_config_from_path() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "maxInputBytes: 1024").unwrap();
        writeln!(file, "categoryTopTokens: 2").unwrap();
        writeln!(file, "confidence:").unwrap();
        writeln!(file, "  motion:").unwrap();
        writeln!(file, "    alias: 80").unwrap();
        writeln!(file, "    generic: 61").unwrap();

        let config = ExtractorConfig::from_path(file.path()).unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.category_top_tokens, 2);
        assert_eq!(config.confidence.motion, LaneConfidence::new(80, 61));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = ExtractorConfig::from_path(file.path());
        assert!(matches!(result, Err(TokenError::UnsupportedConfigFormat { .. })));
    }

    #[test]
    fn test_invalid_json_reports_json_error() {
        let result = ExtractorConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(TokenError::Json { .. })));
    }
}
