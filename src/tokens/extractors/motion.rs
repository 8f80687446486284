//! Motion tokens
//!
//! Transitions and animations are read from the raw CSS text rather than the
//! declaration list, together with `@keyframes` names. Every comma separated
//! segment is classified positionally into name, duration, easing, delay and
//! iteration count and rejoined as `name | duration | easing | ...`.
//!
//! The patterns are compiled once and shared. `Regex` carries no scan
//! position, each `captures_iter` call owns its own iterator state.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::tokens::extractors::{
    AliasMatch, CategoryExtractor, ExtractionContext, ValueCounter, alias_lane, literal_value,
};
use crate::tokens::model::{TokenCategory, TokenDetails, TokenSummary};
use crate::tokens::values::{split_top_level, split_top_level_whitespace};

const ANIMATION_KEYWORDS: &[&str] = &[
    "normal",
    "reverse",
    "alternate",
    "alternate-reverse",
    "forwards",
    "backwards",
    "both",
    "running",
    "paused",
];

fn transition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[\s;{])transition(?:-[a-z-]+)?\s*:\s*([^;{}]+)")
            .expect("hard-coded regex is valid")
    })
}

fn animation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[\s;{])animation(?:-[a-z-]+)?\s*:\s*([^;{}]+)")
            .expect("hard-coded regex is valid")
    })
}

fn keyframes_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)@(?:-webkit-|-moz-|-o-)?keyframes\s+([A-Za-z0-9_-]+)")
            .expect("hard-coded regex is valid")
    })
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^-?(?:\d+\.?\d*|\.\d+)(?:ms|s)$").expect("hard-coded regex is valid")
    })
}

fn easing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:ease|ease-in|ease-out|ease-in-out|linear|step-start|step-end|(?:cubic-bezier|steps|linear)\(.*\))$",
        )
        .expect("hard-coded regex is valid")
    })
}

fn iteration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:infinite|\d+\.?\d*|\.\d+)$").expect("hard-coded regex is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Transition,
    Animation,
}

impl MotionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionKind::Transition => "transition",
            MotionKind::Animation => "animation",
        }
    }
}

pub const KEYFRAMES_KIND: &str = "keyframes";

/// Positional parts of one transition or animation segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionParts {
    /// Transitioned property or animation name
    pub name: Option<String>,
    pub duration: Option<String>,
    pub easing: Option<String>,
    pub delay: Option<String>,
    pub iteration_count: Option<String>,
}

impl MotionParts {
    /// Classify the space separated tokens of a segment. Tokens that fit no
    /// free slot are dropped.
    pub fn parse(segment: &str, kind: MotionKind) -> Self {
        let mut parts = Self::default();

        for token in split_top_level_whitespace(segment) {
            let lower = token.to_ascii_lowercase();
            if duration_regex().is_match(&lower) {
                if parts.duration.is_none() {
                    parts.duration = Some(lower);
                } else if parts.delay.is_none() {
                    parts.delay = Some(lower);
                }
            } else if easing_regex().is_match(&lower) {
                if parts.easing.is_none() {
                    parts.easing = Some(lower);
                }
            } else if kind == MotionKind::Animation && iteration_regex().is_match(&lower) {
                if parts.iteration_count.is_none() {
                    parts.iteration_count = Some(lower);
                }
            } else if kind == MotionKind::Animation && ANIMATION_KEYWORDS.contains(&lower.as_str())
            {
                // direction, fill mode and play state are not part of the token
            } else if parts.name.is_none() {
                parts.name = Some(token);
            }
        }
        parts
    }

    /// Whether a duration or an easing was found
    pub fn has_timing(&self) -> bool {
        self.duration.is_some() || self.easing.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && !self.has_timing() && self.delay.is_none() && self.iteration_count.is_none()
    }

    /// `name | duration | easing | delay | iteration`, missing parts left out
    pub fn to_value(&self) -> String {
        [
            &self.name,
            &self.duration,
            &self.easing,
            &self.delay,
            &self.iteration_count,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

/// Split a transition/animation value into formatted segments
pub fn format_motion_segments(value: &str, kind: MotionKind) -> Vec<String> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    split_top_level(value, ',')
        .iter()
        .map(|segment| MotionParts::parse(segment, kind))
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.to_value())
        .collect()
}

/// Keyframes names defined in a CSS text with their definition counts, in
/// first-seen order
pub fn find_keyframes(css: &str) -> Vec<(String, u32)> {
    let mut counter = ValueCounter::new();
    for captures in keyframes_regex().captures_iter(css) {
        if let Some(name) = captures.get(1) {
            counter.record(name.as_str());
        }
    }
    counter.into_entries()
}

pub struct MotionExtractor;

impl MotionExtractor {
    fn scan(
        &self,
        context: &ExtractionContext,
        regex: &Regex,
        kind: MotionKind,
        counter: &mut ValueCounter,
        kinds: &mut HashMap<String, MotionKind>,
    ) {
        for captures in regex.captures_iter(context.css) {
            let Some(raw) = captures.get(1) else {
                continue;
            };
            let Some(value) = literal_value(raw.as_str(), context.variables) else {
                continue;
            };
            for segment in format_motion_segments(&value, kind) {
                kinds.entry(segment.clone()).or_insert(kind);
                counter.record(segment);
            }
        }
    }
}

impl CategoryExtractor for MotionExtractor {
    fn category(&self) -> TokenCategory {
        TokenCategory::Motion
    }

    fn alias_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        alias_lane(context, self.category(), |name, value| {
            let kind = if name.to_ascii_lowercase().contains("anim") {
                MotionKind::Animation
            } else {
                MotionKind::Transition
            };
            let segments: Vec<MotionParts> = split_top_level(value, ',')
                .iter()
                .map(|segment| MotionParts::parse(segment, kind))
                .collect();
            if segments.is_empty() || !segments.iter().any(MotionParts::has_timing) {
                return None;
            }
            let formatted = segments
                .iter()
                .filter(|parts| !parts.is_empty())
                .map(MotionParts::to_value)
                .collect::<Vec<_>>()
                .join(", ");
            Some(AliasMatch::new(formatted).with_kind(kind.as_str()))
        })
    }

    fn generic_tokens(&self, context: &ExtractionContext) -> Vec<TokenSummary> {
        let confidence = context.generic_confidence(self.category());
        let mut counter = ValueCounter::new();
        let mut kinds = HashMap::new();

        self.scan(context, transition_regex(), MotionKind::Transition, &mut counter, &mut kinds);
        self.scan(context, animation_regex(), MotionKind::Animation, &mut counter, &mut kinds);

        let mut tokens = counter.into_generic_tokens(self.category().prefix(), confidence, |value| {
            let kind = kinds.get(value).copied().unwrap_or(MotionKind::Transition);
            TokenDetails::generic().with_kind(kind.as_str())
        });

        for (name, count) in find_keyframes(context.css) {
            tokens.push(
                TokenSummary::new(
                    format!("{}-keyframes-{}", self.category().prefix(), name),
                    format!("keyframes {}", name),
                    confidence,
                    count,
                )
                .with_details(TokenDetails::generic().with_kind(KEYFRAMES_KIND)),
            );
        }
        tokens
    }
}
