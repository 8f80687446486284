//! Token data model
//!
//! Input sources, the atomic [`TokenSummary`] and the per-category
//! [`TokenGroups`]. Everything here serializes in camelCase for downstream
//! consumers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{TokenError, TokenResult};

/// Where a stylesheet fragment was harvested from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `<style>` block in the page
    Inline,
    /// Linked stylesheet
    Link,
    /// Browser computed style fragment
    Computed,
}

/// One stylesheet or style fragment handed over by the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssSource {
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content: String,
    pub bytes: usize,
    /// Hex SHA-256 of `content`
    pub sha: String,
}

impl CssSource {
    /// Create a source, computing `bytes` and `sha` from the content
    pub fn new(kind: SourceKind, url: Option<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind,
            url,
            bytes: content.len(),
            sha: sha256_hex(content.as_bytes()),
            content,
        }
    }
}

/// The page the sources were collected from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub domain: String,
    pub url: String,
}

impl Origin {
    pub fn new(domain: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
        }
    }

    /// Build an origin from a page url, the domain is the url host
    pub fn from_url(url: &str) -> TokenResult<Self> {
        let parsed = Url::parse(url).map_err(|e| TokenError::InvalidOrigin {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let domain = parsed
            .host_str()
            .ok_or_else(|| TokenError::InvalidOrigin {
                url: url.to_string(),
                message: "url has no host".to_string(),
            })?
            .to_string();

        Ok(Self {
            domain,
            url: parsed.to_string(),
        })
    }
}

/// Token families, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Color,
    Typography,
    Spacing,
    Radius,
    Shadow,
    Motion,
    Gradient,
    Border,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 8] = [
        TokenCategory::Color,
        TokenCategory::Typography,
        TokenCategory::Spacing,
        TokenCategory::Radius,
        TokenCategory::Shadow,
        TokenCategory::Motion,
        TokenCategory::Gradient,
        TokenCategory::Border,
    ];

    /// Prefix of every token name in this category
    pub fn prefix(self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::Typography => "typography",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Radius => "radius",
            TokenCategory::Shadow => "shadow",
            TokenCategory::Motion => "motion",
            TokenCategory::Gradient => "gradient",
            TokenCategory::Border => "border",
        }
    }
}

/// Diagnostic flags attached by the ranker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenFlag {
    /// Value seen at most once
    LowUsage,
    /// Confidence below 70
    LowConfidence,
}

/// Which extraction lane produced a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSourceLane {
    Alias,
    Generic,
}

/// Decomposed border shorthand
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BorderParts {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.style.is_none() && self.color.is_none()
    }

    /// Canonical `width style color` form, missing parts are left out
    pub fn to_value(&self) -> String {
        [&self.width, &self.style, &self.color]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Optional structured payload of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub source: TokenSourceLane,
    /// Custom property the token came from, including the `--` prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Sub kind, e.g. `size` for typography or `animation` for motion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderParts>,
}

impl TokenDetails {
    pub fn alias(variable: &str) -> Self {
        Self {
            source: TokenSourceLane::Alias,
            alias: Some(variable.to_string()),
            kind: None,
            border: None,
        }
    }

    pub fn generic() -> Self {
        Self {
            source: TokenSourceLane::Generic,
            alias: None,
            kind: None,
            border: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_border(mut self, border: BorderParts) -> Self {
        self.border = Some(border);
        self
    }
}

/// The atomic output unit: one named design value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub name: String,
    pub value: String,
    /// Provenance based, 0-100
    pub confidence: u8,
    /// Observed occurrences, at least 1
    pub usage: u32,
    /// Computed by the ranker, 0-100
    #[serde(default)]
    pub quality_score: u8,
    #[serde(default)]
    pub flags: Vec<TokenFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TokenDetails>,
}

impl TokenSummary {
    /// Create an unranked token, usage is clamped to at least 1
    pub fn new(name: impl Into<String>, value: impl Into<String>, confidence: u8, usage: u32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            confidence: confidence.min(100),
            usage: usage.max(1),
            quality_score: 0,
            flags: Vec::new(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: TokenDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether the token came from a custom property
    pub fn is_alias(&self) -> bool {
        matches!(
            self.details,
            Some(TokenDetails {
                source: TokenSourceLane::Alias,
                ..
            })
        )
    }

    /// Sub kind from the details, if any
    pub fn kind(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.kind.as_deref())
    }
}

/// Ranked tokens of all eight categories
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenGroups {
    pub colors: Vec<TokenSummary>,
    pub typography: Vec<TokenSummary>,
    pub spacing: Vec<TokenSummary>,
    pub radius: Vec<TokenSummary>,
    pub shadows: Vec<TokenSummary>,
    pub motion: Vec<TokenSummary>,
    pub gradients: Vec<TokenSummary>,
    pub borders: Vec<TokenSummary>,
}

impl TokenGroups {
    pub fn get(&self, category: TokenCategory) -> &[TokenSummary] {
        match category {
            TokenCategory::Color => &self.colors,
            TokenCategory::Typography => &self.typography,
            TokenCategory::Spacing => &self.spacing,
            TokenCategory::Radius => &self.radius,
            TokenCategory::Shadow => &self.shadows,
            TokenCategory::Motion => &self.motion,
            TokenCategory::Gradient => &self.gradients,
            TokenCategory::Border => &self.borders,
        }
    }

    pub fn get_mut(&mut self, category: TokenCategory) -> &mut Vec<TokenSummary> {
        match category {
            TokenCategory::Color => &mut self.colors,
            TokenCategory::Typography => &mut self.typography,
            TokenCategory::Spacing => &mut self.spacing,
            TokenCategory::Radius => &mut self.radius,
            TokenCategory::Shadow => &mut self.shadows,
            TokenCategory::Motion => &mut self.motion,
            TokenCategory::Gradient => &mut self.gradients,
            TokenCategory::Border => &mut self.borders,
        }
    }

    /// Iterate categories with their tokens in output order
    pub fn iter(&self) -> impl Iterator<Item = (TokenCategory, &[TokenSummary])> {
        TokenCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Total number of tokens across all categories
    pub fn total(&self) -> usize {
        self.iter().map(|(_, tokens)| tokens.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Lower-case hex SHA-256 of some bytes
pub(crate) fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
