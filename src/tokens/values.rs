//! Value normalizers and validators
//!
//! Per-category predicates and canonicalizers shared by the extractors. None
//! of these fail, a value that doesn't fit is simply rejected.

use std::sync::OnceLock;

use regex::Regex;

use crate::tokens::color_keywords::is_color_keyword;
use crate::tokens::model::BorderParts;

/// Border and outline style keywords
pub const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// Named font sizes accepted besides `<number><unit>`
pub const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "smaller", "larger",
];

/// CSS-wide keywords, never useful as a token on their own
pub const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "revert-layer"];

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("hard-coded regex is valid"))
        }
    };
}

cached_regex!(important_regex, r"(?i)\s*!\s*important\s*$");
cached_regex!(hex_in_text_regex, r"#[0-9a-fA-F]{3,8}\b");
cached_regex!(hex_color_regex, r"^#[0-9a-fA-F]{3,8}$");
cached_regex!(color_function_regex, r"(?i)^(?:rgba?|hsla?)\(.*\)$");
cached_regex!(font_size_regex, r"(?i)^(?:\d+\.?\d*|\.\d+)(?:px|rem|em|%|pt|vh|vw)$");
cached_regex!(font_weight_regex, r"(?i)^(?:normal|bold|bolder|lighter|[1-9]00)$");
cached_regex!(line_height_regex, r"(?i)^(?:normal|(?:\d+\.?\d*|\.\d+)(?:px|rem|em|%)?)$");
cached_regex!(letter_spacing_regex, r"(?i)^(?:normal|-?(?:\d+\.?\d*|\.\d+)(?:px|rem|em)?)$");
cached_regex!(
    dimension_regex,
    r"(?i)^-?(?:\d+\.?\d*|\.\d+)(?:px|rem|em|%|vh|vw|vmin|vmax|ch|ex|pt)?$"
);
cached_regex!(length_regex, r"(?i)^-?(?:\d+\.?\d*|\.\d+)(?:px|rem|em)?$");
cached_regex!(math_function_regex, r"(?i)^(?:calc|clamp|min|max)\(.*\)$");
cached_regex!(
    gradient_start_regex,
    r"(?i)(?:repeating-)?(?:linear|radial|conic)-gradient\("
);
cached_regex!(var_reference_regex, r"var\(\s*(--[A-Za-z0-9_-]+)");

/// Clean a raw declaration value.
///
/// Strips a trailing `!important`, cuts everything from the first unmatched
/// `{` or `}` on and trims. Returns None when nothing is left.
pub fn sanitize_value(raw: &str) -> Option<String> {
    let mut value = raw.trim();

    let mut depth = 0usize;
    let mut first_open = None;
    let mut cut = None;
    for (index, ch) in value.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    first_open = Some(index);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    cut = Some(index);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if cut.is_none() && depth > 0 {
        cut = first_open;
    }
    if let Some(index) = cut {
        value = &value[..index];
    }

    let value = important_regex().replace(value.trim(), "");
    let value = value.trim().trim_end_matches(';').trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Trim and collapse every run of whitespace into a single space
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on a separator that is not inside parentheses or quotes
///
/// Segments are trimmed and empty segments dropped. This is what keeps
/// `rgba(0,0,0,.1)` in one piece when splitting a shadow list on commas.
pub fn split_top_level(value: &str, separator: char) -> Vec<String> {
    split_top_level_by(value, |ch| ch == separator)
}

/// Split on whitespace that is not inside parentheses or quotes
pub fn split_top_level_whitespace(value: &str) -> Vec<String> {
    split_top_level_by(value, char::is_whitespace)
}

fn split_top_level_by(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in value.chars() {
        if let Some(q) = quote {
            current.push(ch);
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            _ if depth == 0 && is_separator(ch) => {
                let segment = current.trim();
                if !segment.is_empty() {
                    segments.push(segment.to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let segment = current.trim();
    if !segment.is_empty() {
        segments.push(segment.to_string());
    }
    segments
}

/// Find the end (exclusive byte index) of a parenthesised group whose `(` is at `open`
pub fn matching_paren_end(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Whether a value is a single hex color like `#fff` or `#112233cc`
pub fn is_hex_color(value: &str) -> bool {
    hex_color_regex().is_match(value.trim())
}

/// Whether a value is a color: hex, `rgb()`/`rgba()`/`hsl()`/`hsla()` or a named keyword
pub fn is_color_token(value: &str) -> bool {
    let value = value.trim();
    is_hex_color(value) || color_function_regex().is_match(value) || is_color_keyword(value)
}

/// Canonical form of a color: hex and keywords lowercased, functions whitespace collapsed
pub fn normalize_color(value: &str) -> String {
    let value = collapse_whitespace(value);
    if is_hex_color(&value) || is_color_keyword(&value) {
        value.to_ascii_lowercase()
    } else {
        value
    }
}

/// All hex colors anywhere in a value, lowercased
pub fn find_hex_colors(value: &str) -> Vec<String> {
    hex_in_text_regex()
        .find_iter(value)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

pub fn is_valid_font_size(value: &str) -> bool {
    let value = value.trim();
    font_size_regex().is_match(value)
        || FONT_SIZE_KEYWORDS.contains(&value.to_ascii_lowercase().as_str())
}

pub fn is_valid_font_weight(value: &str) -> bool {
    font_weight_regex().is_match(value.trim())
}

pub fn is_valid_line_height(value: &str) -> bool {
    line_height_regex().is_match(value.trim())
}

pub fn is_valid_letter_spacing(value: &str) -> bool {
    letter_spacing_regex().is_match(value.trim())
}

/// Normalize a font stack: split on commas, strip quotes, drop `var(`
/// leftovers and rejoin with `, `
pub fn normalize_font_family(value: &str) -> Option<String> {
    let families: Vec<String> = value
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|part| !part.is_empty() && !part.contains("var("))
        .map(collapse_whitespace)
        .collect();

    if families.is_empty() {
        None
    } else {
        Some(families.join(", "))
    }
}

/// Whether every whitespace separated part is a length, a percentage, `auto`
/// or a math function. A `/` part is allowed for elliptical radii.
pub fn is_dimension_list(value: &str) -> bool {
    let parts = split_top_level_whitespace(value);
    !parts.is_empty()
        && parts.iter().all(|part| {
            dimension_regex().is_match(part)
                || part.eq_ignore_ascii_case("auto")
                || part == "/"
                || math_function_regex().is_match(part)
        })
}

/// Whether a value looks like a box or text shadow list.
///
/// Every segment needs at least two length tokens, and at least one segment
/// needs a color or the `inset` keyword, which keeps plain spacing values like
/// `8px 16px` out.
pub fn is_shadow_value(value: &str) -> bool {
    let segments = split_top_level(value, ',');
    if segments.is_empty() {
        return false;
    }

    let mut has_marker = false;
    for segment in &segments {
        let parts = split_top_level_whitespace(segment);
        let lengths = parts.iter().filter(|p| length_regex().is_match(p)).count();
        if lengths < 2 {
            return false;
        }
        if parts
            .iter()
            .any(|p| p.eq_ignore_ascii_case("inset") || is_color_token(p))
        {
            has_marker = true;
        }
    }
    has_marker
}

/// All gradient functions in a value, whitespace collapsed
pub fn find_gradients(value: &str) -> Vec<String> {
    let mut gradients = Vec::new();
    for m in gradient_start_regex().find_iter(value) {
        let open = m.end() - 1;
        if let Some(end) = matching_paren_end(value, open) {
            gradients.push(collapse_whitespace(&value[m.start()..end]));
        }
    }
    gradients
}

/// Decompose a border shorthand into width, style and color.
///
/// Width is the first token starting with a digit, style the first border
/// style keyword and color the first color token. Other tokens are dropped.
/// When nothing matches the whole value becomes the width.
pub fn parse_border(value: &str) -> BorderParts {
    let mut parts = BorderParts::default();

    for token in split_top_level_whitespace(value) {
        let lower = token.to_ascii_lowercase();
        if parts.width.is_none() && token.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            parts.width = Some(lower);
        } else if parts.style.is_none() && BORDER_STYLES.contains(&lower.as_str()) {
            parts.style = Some(lower);
        } else if parts.color.is_none() && is_color_token(&token) {
            parts.color = Some(normalize_color(&token));
        }
    }

    if parts.is_empty() {
        parts.width = Some(collapse_whitespace(value));
    }
    parts
}

/// Whether a value is only a CSS-wide keyword such as `inherit`
pub fn is_css_wide_keyword(value: &str) -> bool {
    CSS_WIDE_KEYWORDS.contains(&value.trim().to_ascii_lowercase().as_str())
}

/// Every custom property name referenced through `var(--name ...)` in a text,
/// in order of appearance, repeats included
pub fn find_var_references(text: &str) -> Vec<&str> {
    var_reference_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value("  #fff !important "), Some("#fff".to_string()));
        assert_eq!(sanitize_value("#fff!IMPORTANT"), Some("#fff".to_string()));
        assert_eq!(sanitize_value("8px } .b { color: red"), Some("8px".to_string()));
        assert_eq!(sanitize_value("8px { broken"), Some("8px".to_string()));
        assert_eq!(sanitize_value("   "), None);
        assert_eq!(sanitize_value("!important"), None);
        assert_eq!(sanitize_value("red;"), Some("red".to_string()));
    }

    #[test]
    fn test_split_top_level_respects_parentheses() {
        let segments = split_top_level("0 1px 2px rgba(0,0,0,.1), 0 2px 4px rgba(0,0,0,.2)", ',');
        assert_eq!(
            segments,
            vec!["0 1px 2px rgba(0,0,0,.1)", "0 2px 4px rgba(0,0,0,.2)"]
        );
    }

    #[test]
    fn test_split_top_level_respects_quotes() {
        let segments = split_top_level(r#""Foo, Bar", serif"#, ',');
        assert_eq!(segments, vec![r#""Foo, Bar""#, "serif"]);
    }

    #[test]
    fn test_split_top_level_whitespace() {
        let parts = split_top_level_whitespace("opacity  200ms cubic-bezier(0.4, 0, 0.2, 1)");
        assert_eq!(parts, vec!["opacity", "200ms", "cubic-bezier(0.4, 0, 0.2, 1)"]);
    }

    #[test]
    fn test_color_predicates() {
        assert!(is_color_token("#abc"));
        assert!(is_color_token("#AABBCCDD"));
        assert!(is_color_token("rgb(1, 2, 3)"));
        assert!(is_color_token("HSLA(120, 50%, 50%, .5)"));
        assert!(is_color_token("tomato"));
        assert!(!is_color_token("#ggg"));
        assert!(!is_color_token("8px"));
        assert!(!is_color_token("var(--brand)"));
    }

    #[test]
    fn test_find_hex_colors() {
        assert_eq!(
            find_hex_colors("1px solid #AABBCC, 0 0 0 #fff"),
            vec!["#aabbcc", "#fff"]
        );
        assert!(find_hex_colors("url(#icon-sprite)").is_empty());
    }

    #[test]
    fn test_font_predicates() {
        assert!(is_valid_font_size("16px"));
        assert!(is_valid_font_size("1.125rem"));
        assert!(is_valid_font_size("x-large"));
        assert!(!is_valid_font_size("16"));
        assert!(!is_valid_font_size("big"));

        assert!(is_valid_font_weight("600"));
        assert!(is_valid_font_weight("bold"));
        assert!(!is_valid_font_weight("650"));

        assert!(is_valid_line_height("1.5"));
        assert!(is_valid_line_height("24px"));
        assert!(is_valid_line_height("normal"));
        assert!(!is_valid_line_height("tall"));

        assert!(is_valid_letter_spacing("-0.02em"));
        assert!(!is_valid_letter_spacing("wide"));
    }

    #[test]
    fn test_normalize_font_family() {
        assert_eq!(
            normalize_font_family(r#""Inter",  'Helvetica Neue' ,sans-serif"#),
            Some("Inter, Helvetica Neue, sans-serif".to_string())
        );
        assert_eq!(
            normalize_font_family("var(--font-sans), system-ui"),
            Some("system-ui".to_string())
        );
        assert_eq!(normalize_font_family("var(--font-sans)"), None);
    }

    #[test]
    fn test_dimension_list() {
        assert!(is_dimension_list("8px"));
        assert!(is_dimension_list("8px 16px"));
        assert!(is_dimension_list("calc(100% - 8px) auto"));
        assert!(is_dimension_list("10px / 20px"));
        assert!(!is_dimension_list("#fff"));
        assert!(!is_dimension_list(""));
    }

    #[test]
    fn test_shadow_predicate() {
        assert!(is_shadow_value("0 1px 2px rgba(0,0,0,.1)"));
        assert!(is_shadow_value("inset 0 0 4px"));
        assert!(!is_shadow_value("8px 16px"));
        assert!(!is_shadow_value("none"));
    }

    #[test]
    fn test_find_gradients() {
        let gradients = find_gradients(
            "url(a.png), linear-gradient(to right,\n  #fff 0%, rgba(0,0,0,.5) 100%)",
        );
        assert_eq!(
            gradients,
            vec!["linear-gradient(to right, #fff 0%, rgba(0,0,0,.5) 100%)"]
        );
        assert_eq!(find_gradients("repeating-conic-gradient(red, blue)").len(), 1);
        assert!(find_gradients("linear-gradient(unterminated").is_empty());
    }

    #[test]
    fn test_parse_border() {
        let parts = parse_border("1px solid #E5E7EB");
        assert_eq!(parts.width.as_deref(), Some("1px"));
        assert_eq!(parts.style.as_deref(), Some("solid"));
        assert_eq!(parts.color.as_deref(), Some("#e5e7eb"));

        let parts = parse_border("dashed rgba(0, 0, 0, 0.1) extra");
        assert_eq!(parts.width, None);
        assert_eq!(parts.style.as_deref(), Some("dashed"));
        assert_eq!(parts.color.as_deref(), Some("rgba(0, 0, 0, 0.1)"));

        let parts = parse_border("thin");
        assert_eq!(parts.width.as_deref(), Some("thin"));
        assert_eq!(parts.style, None);
    }

    #[test]
    fn test_find_var_references() {
        let refs = find_var_references("a{color:var(--brand)} b{color:var( --brand, red);margin:var(--gap)}");
        assert_eq!(refs, vec!["--brand", "--brand", "--gap"]);
    }
}
