//! Assembled token document
//!
//! A Design-Tokens shaped document: one group per non-empty category, each
//! keyed by token name in rank order, every leaf carrying `$type`, `$value`
//! and `$extensions`. Leaves are a sum type so consumers get the `$type` and
//! `$value` shape checked at compile time.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tokens::extractors::typography::TypographyKind;
use crate::tokens::model::{TokenCategory, TokenGroups, TokenSummary, sha256_hex};

/// Scalar value or a list, lists are used for font stacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Single(String),
    List(Vec<String>),
}

impl TokenValue {
    /// Comma separated values become a list
    pub fn from_typography(value: &str) -> Self {
        if value.contains(',') {
            TokenValue::List(
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect(),
            )
        } else {
            TokenValue::Single(value.to_string())
        }
    }
}

/// Extraction metadata attached to every leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExtensions {
    pub confidence: u8,
    pub usage: u32,
}

/// One leaf of the token document, tagged by `$type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "camelCase")]
pub enum DesignToken {
    Color {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    FontFamily {
        #[serde(rename = "$value")]
        value: TokenValue,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    /// Typography values other than families
    #[serde(rename = "string")]
    Text {
        #[serde(rename = "$value")]
        value: TokenValue,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    Dimension {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    Shadow {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    Transition {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    Gradient {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
    Border {
        #[serde(rename = "$value")]
        value: String,
        #[serde(rename = "$extensions")]
        extensions: TokenExtensions,
    },
}

impl DesignToken {
    /// Build the leaf for a ranked token of a category
    pub fn from_summary(category: TokenCategory, token: &TokenSummary) -> Self {
        let extensions = TokenExtensions {
            confidence: token.confidence,
            usage: token.usage,
        };
        let value = token.value.clone();

        match category {
            TokenCategory::Color => DesignToken::Color { value, extensions },
            TokenCategory::Typography => {
                let value = TokenValue::from_typography(&token.value);
                if token.kind() == Some(TypographyKind::Family.as_str()) {
                    DesignToken::FontFamily { value, extensions }
                } else {
                    DesignToken::Text { value, extensions }
                }
            }
            TokenCategory::Spacing | TokenCategory::Radius => {
                DesignToken::Dimension { value, extensions }
            }
            TokenCategory::Shadow => DesignToken::Shadow { value, extensions },
            TokenCategory::Motion => DesignToken::Transition { value, extensions },
            TokenCategory::Gradient => DesignToken::Gradient { value, extensions },
            TokenCategory::Border => DesignToken::Border { value, extensions },
        }
    }

    /// The `$type` string of this leaf
    pub fn type_name(&self) -> &'static str {
        match self {
            DesignToken::Color { .. } => "color",
            DesignToken::FontFamily { .. } => "fontFamily",
            DesignToken::Text { .. } => "string",
            DesignToken::Dimension { .. } => "dimension",
            DesignToken::Shadow { .. } => "shadow",
            DesignToken::Transition { .. } => "transition",
            DesignToken::Gradient { .. } => "gradient",
            DesignToken::Border { .. } => "border",
        }
    }

    pub fn extensions(&self) -> &TokenExtensions {
        match self {
            DesignToken::Color { extensions, .. }
            | DesignToken::FontFamily { extensions, .. }
            | DesignToken::Text { extensions, .. }
            | DesignToken::Dimension { extensions, .. }
            | DesignToken::Shadow { extensions, .. }
            | DesignToken::Transition { extensions, .. }
            | DesignToken::Gradient { extensions, .. }
            | DesignToken::Border { extensions, .. } => extensions,
        }
    }
}

/// Tokens of one category keyed by name, in rank order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenGroup {
    tokens: Vec<(String, DesignToken)>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, token: DesignToken) {
        self.tokens.push((name.into(), token));
    }

    pub fn get(&self, name: &str) -> Option<&DesignToken> {
        self.tokens.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DesignToken)> {
        self.tokens.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> Vec<&str> {
        self.tokens.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Serialize for TokenGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tokens.len()))?;
        for (name, token) in &self.tokens {
            map.serialize_entry(name, token)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TokenGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenGroupVisitor;

        impl<'de> Visitor<'de> for TokenGroupVisitor {
            type Value = TokenGroup;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of token names to design tokens")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TokenGroup, A::Error> {
                let mut group = TokenGroup::new();
                while let Some((name, token)) = access.next_entry::<String, DesignToken>()? {
                    group.push(name, token);
                }
                Ok(group)
            }
        }

        deserializer.deserialize_map(TokenGroupVisitor)
    }
}

/// The assembled token document. Empty categories are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenSetDocument {
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub color: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub typography: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub spacing: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub radius: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub shadow: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub motion: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub gradient: TokenGroup,
    #[serde(default, skip_serializing_if = "TokenGroup::is_empty")]
    pub border: TokenGroup,
}

impl TokenSetDocument {
    /// Assemble the document from ranked token groups, keeping rank order
    pub fn assemble(groups: &TokenGroups) -> Self {
        let mut document = Self::default();
        for (category, tokens) in groups.iter() {
            let group = document.group_mut(category);
            for token in tokens {
                group.push(token.name.clone(), DesignToken::from_summary(category, token));
            }
        }
        document
    }

    pub fn group(&self, category: TokenCategory) -> &TokenGroup {
        match category {
            TokenCategory::Color => &self.color,
            TokenCategory::Typography => &self.typography,
            TokenCategory::Spacing => &self.spacing,
            TokenCategory::Radius => &self.radius,
            TokenCategory::Shadow => &self.shadow,
            TokenCategory::Motion => &self.motion,
            TokenCategory::Gradient => &self.gradient,
            TokenCategory::Border => &self.border,
        }
    }

    fn group_mut(&mut self, category: TokenCategory) -> &mut TokenGroup {
        match category {
            TokenCategory::Color => &mut self.color,
            TokenCategory::Typography => &mut self.typography,
            TokenCategory::Spacing => &mut self.spacing,
            TokenCategory::Radius => &mut self.radius,
            TokenCategory::Shadow => &mut self.shadow,
            TokenCategory::Motion => &mut self.motion,
            TokenCategory::Gradient => &mut self.gradient,
            TokenCategory::Border => &mut self.border,
        }
    }

    /// Every leaf with its `category.name` path, in document order
    pub fn leaves(&self) -> Vec<(String, &DesignToken)> {
        TokenCategory::ALL
            .into_iter()
            .flat_map(|category| {
                self.group(category)
                    .iter()
                    .map(move |(name, token)| (format!("{}.{}", category.prefix(), name), token))
            })
            .collect()
    }

    pub fn token_count(&self) -> usize {
        TokenCategory::ALL
            .into_iter()
            .map(|category| self.group(category).len())
            .sum()
    }

    /// Stable JSON serialization of the document
    pub fn to_canonical_json(&self) -> String {
        // string keys and plain values only, serialization can't fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// SHA-256 hex of the canonical JSON, for cache keys and change detection
    pub fn content_hash(&self) -> String {
        sha256_hex(self.to_canonical_json().as_bytes())
    }
}
