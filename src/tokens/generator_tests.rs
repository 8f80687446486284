use crate::config::{ExtractorConfig, LaneConfidence};
use crate::test_utils::{css_source, extract, test_origin};
use crate::tokens::generator::{GeneratedTokenSet, TokenExtractor, TokenSetSummary};
use crate::tokens::model::{CssSource, SourceKind, TokenCategory, TokenFlag};
use crate::tokens::token_set::DesignToken;

#[test]
fn test_empty_input_yields_zeros() {
    let result = TokenExtractor::default().generate(&[], test_origin());

    assert_eq!(result.summary, TokenSetSummary::default());
    assert!(result.token_groups.is_empty());
    assert_eq!(result.token_set.token_count(), 0);
    assert_eq!(result.quality_insights.categories.len(), 8);
    for insight in result.quality_insights.categories.values() {
        assert_eq!(insight.total_usage, 0);
        assert_eq!(insight.average_confidence, 0);
        assert!(insight.top_tokens.is_empty());
    }
    assert!(result.quality_insights.overall.top_tokens.is_empty());
    assert_eq!(result, GeneratedTokenSet::empty(test_origin()));
}

#[test]
fn test_whitespace_only_sources_are_skipped() {
    let sources = vec![css_source("   \n "), css_source("")];
    let result = TokenExtractor::default().generate(&sources, test_origin());
    assert_eq!(result.summary.tokens_extracted, 0);
}

#[test]
fn test_alias_precedence() {
    let result = extract(":root{--brand:#112233} .a{color:var(--brand)} .b{color:#445566}");
    let colors = &result.token_groups.colors;

    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0].name, "color-brand");
    assert_eq!(colors[0].value, "#112233");
    assert!(colors[0].confidence >= 88);
    assert!(colors[0].is_alias());
    assert_eq!(colors[1].name, "color-generic-1");
    assert_eq!(colors[1].value, "#445566");
    assert!(colors[1].usage <= colors[0].usage);
}

#[test]
fn test_end_to_end_spacing_and_radius() {
    let result = extract(":root{--space-sm:8px}\n.card{padding:var(--space-sm);margin:8px;border-radius:4px}");

    let spacing = &result.token_groups.spacing;
    assert_eq!(spacing.len(), 2);
    assert_eq!(spacing[0].name, "spacing-space-sm");
    assert_eq!(spacing[0].value, "8px");
    assert!(spacing[0].is_alias());
    assert!(spacing[0].usage >= 1);
    assert_eq!(spacing[1].name, "spacing-generic-1");
    assert_eq!(spacing[1].value, "8px");
    assert_eq!(spacing[1].usage, 1);

    let radius = &result.token_groups.radius;
    assert_eq!(radius.len(), 1);
    assert_eq!(radius[0].value, "4px");

    assert!(result.summary.tokens_extracted >= 2);
    assert_eq!(result.summary.tokens_extracted, 3);
    assert_eq!(result.summary.confidence, 82);
    assert_eq!(result.summary.completeness, 81);
    assert_eq!(result.summary.reliability, 80);
}

#[test]
fn test_shadow_list_yields_two_tokens() {
    let result = extract(".a{box-shadow: 0 1px 2px rgba(0,0,0,.1), 0 2px 4px rgba(0,0,0,.2)}");
    let shadows = &result.token_groups.shadows;

    assert_eq!(shadows.len(), 2);
    for shadow in shadows {
        assert_eq!(shadow.value.matches('(').count(), shadow.value.matches(')').count());
        assert!(!shadow.value.starts_with(','));
        assert!(!shadow.value.ends_with(','));
    }
}

#[test]
fn test_deep_variable_chain_terminates() {
    let mut css = String::from(":root{");
    for i in 0..15 {
        css.push_str(&format!("--v{}: var(--v{});", i, i + 1));
    }
    css.push_str("--v15: #112233;} .a{color: var(--v0)}");

    let result = extract(&css);
    for (_, tokens) in result.token_groups.iter() {
        for token in tokens {
            assert!(!token.value.contains("var("), "{} = {}", token.name, token.value);
        }
    }
    assert!(result.token_groups.colors.iter().any(|t| t.name == "color-v15"));
    assert!(!result.token_groups.colors.iter().any(|t| t.name == "color-v0"));
}

#[test]
fn test_self_referencing_variable_is_dropped() {
    let result = extract(
        ":root{--a: var(--a) var(--a) var(--a) var(--a) var(--a) var(--a);} .x{margin:var(--a) 1px}",
    );

    assert!(result.token_groups.spacing.is_empty());
    for (_, tokens) in result.token_groups.iter() {
        for token in tokens {
            assert!(!token.value.contains("var("), "{} = {}", token.name, token.value);
        }
    }
}

#[test]
fn test_wide_variable_fan_out_is_dropped() {
    let mut css = String::from(":root{");
    for i in 0..9 {
        let reference = format!("var(--space-{}) ", i + 1);
        css.push_str(&format!("--space-{}: {};", i, reference.repeat(8).trim_end()));
    }
    css.push_str("--space-9: 1px;} .a{padding: var(--space-0) 2px; margin: 4px}");

    let result = extract(&css);
    let spacing = &result.token_groups.spacing;
    assert!(spacing.iter().any(|t| t.name == "spacing-space-9"));
    assert!(!spacing.iter().any(|t| t.name == "spacing-space-0"));
    assert!(spacing.iter().any(|t| t.value == "4px"));
    assert!(spacing.iter().all(|t| t.value.len() <= 64 * 1024));
}

#[test]
fn test_deeply_nested_input_is_extracted() {
    let depth = 200_000;
    let calc = format!(".a{{width:{}1px{}}}", "calc(".repeat(depth), ")".repeat(depth));
    let result = extract(&calc);
    assert_eq!(result.summary.tokens_extracted, result.token_groups.total());

    let depth = 20_000;
    let media = format!(
        "{}.a{{margin:4px;color:#112233}}{}",
        "@media screen{".repeat(depth),
        "}".repeat(depth)
    );
    let result = extract(&media);
    assert_eq!(result.token_groups.colors[0].value, "#112233");
    assert_eq!(result.token_groups.spacing[0].value, "4px");
}

#[test]
fn test_shadow_alias() {
    let result = extract(":root{--shadow-sm: 0 1px 2px rgba(0,0,0,.1)} .a{box-shadow:var(--shadow-sm)}");
    let shadows = &result.token_groups.shadows;

    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].name, "shadow-shadow-sm");
    assert_eq!(shadows[0].value, "0 1px 2px rgba(0,0,0,.1)");
    assert!(shadows[0].is_alias());
    assert!(matches!(
        result.token_set.shadow.get("shadow-shadow-sm"),
        Some(DesignToken::Shadow { .. })
    ));
}

#[test]
fn test_border_alias_has_parts() {
    let result = extract(":root{--border-default: 1px solid #e5e5e5} .a{border:var(--border-default)}");
    let border = result
        .token_groups
        .borders
        .iter()
        .find(|t| t.name == "border-border-default")
        .unwrap();

    assert_eq!(border.value, "1px solid #e5e5e5");
    assert!(border.is_alias());
    let parts = border.details.as_ref().and_then(|d| d.border.as_ref()).unwrap();
    assert_eq!(parts.width.as_deref(), Some("1px"));
    assert_eq!(parts.style.as_deref(), Some("solid"));
    assert_eq!(parts.color.as_deref(), Some("#e5e5e5"));
}

#[test]
fn test_motion_alias_kind() {
    let result = extract(":root{--transition-fast: opacity 150ms ease} .a{transition:var(--transition-fast)}");
    let motion = result
        .token_groups
        .motion
        .iter()
        .find(|t| t.name == "motion-transition-fast")
        .unwrap();

    assert_eq!(motion.value, "opacity | 150ms | ease");
    assert_eq!(motion.kind(), Some("transition"));
    assert!(motion.is_alias());
}

#[test]
fn test_gradient_alias() {
    let result = extract(":root{--hero: linear-gradient(90deg, #0a84ff, #5e5ce6)} .a{background:var(--hero)}");
    let gradient = result
        .token_groups
        .gradients
        .iter()
        .find(|t| t.name == "gradient-hero")
        .unwrap();

    assert_eq!(gradient.value, "linear-gradient(90deg, #0a84ff, #5e5ce6)");
    assert!(gradient.is_alias());
}

#[test]
fn test_font_family_alias_is_a_list() {
    let result = extract(r#":root{--font-sans: "Inter", system-ui, sans-serif} body{font-family:var(--font-sans)}"#);
    assert!(
        result
            .token_groups
            .typography
            .iter()
            .any(|t| t.name == "typography-font-sans" && t.is_alias())
    );

    let json = serde_json::to_value(&result.token_set).unwrap();
    let leaf = &json["typography"]["typography-font-sans"];
    assert_eq!(leaf["$type"], "fontFamily");
    assert_eq!(leaf["$value"], serde_json::json!(["Inter", "system-ui", "sans-serif"]));
}

#[test]
fn test_spacing_variable_without_name_hint_is_not_an_alias() {
    let result = extract(":root{--card-pad: 12px} .a{padding:var(--card-pad)}");
    assert!(
        !result
            .token_groups
            .spacing
            .iter()
            .any(|t| t.name == "spacing-card-pad")
    );
    assert!(result.token_groups.spacing.iter().all(|t| !t.is_alias()));
}

#[test]
fn test_generation_is_deterministic() {
    let css = r#"
        :root { --brand: #0a84ff; --radius-md: 6px; --font-sans: "Inter", sans-serif; }
        .btn { color: #fff; background: linear-gradient(90deg, #0a84ff, #5e5ce6); border-radius: var(--radius-md); }
        .card { box-shadow: 0 1px 2px rgba(0,0,0,.1); padding: 16px; transition: opacity 200ms ease; }
        .title { font-family: var(--font-sans); font-size: 24px; font-weight: 700; border: 1px solid #e5e5e5; }
    "#;

    let first = extract(css);
    let second = extract(css);

    assert_eq!(first, second);
    assert_eq!(first.token_set_hash, second.token_set_hash);
    assert_eq!(first.token_set_hash, first.token_set.content_hash());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_every_category_extracted() {
    let css = r#"
        :root { --brand: #0a84ff; }
        .btn { color: #ffffff; border-radius: 6px; padding: 8px 16px; }
        .card { box-shadow: 0 1px 2px rgba(0,0,0,.1); border: 1px solid #e5e5e5; }
        .hero { background-image: linear-gradient(90deg, #0a84ff, #5e5ce6); }
        .title { font-size: 24px; }
        .fade { transition: opacity 200ms ease-in-out; }
    "#;
    let result = extract(css);

    for category in TokenCategory::ALL {
        assert!(
            !result.token_groups.get(category).is_empty(),
            "no {:?} tokens",
            category
        );
        assert!(!result.token_set.group(category).is_empty());
    }
    assert_eq!(result.token_groups.gradients[0].value, "linear-gradient(90deg, #0a84ff, #5e5ce6)");
    assert_eq!(result.token_groups.borders[0].value, "1px solid #e5e5e5");
    assert_eq!(result.token_groups.motion[0].value, "opacity | 200ms | ease-in-out");
}

#[test]
fn test_token_set_leaf_types() {
    let result = extract(
        ".a{color:#112233;font-family:Inter, sans-serif;font-size:16px;margin:4px;transition:color 1s}",
    );
    let document = &result.token_set;

    assert!(matches!(document.color.get("color-generic-1"), Some(DesignToken::Color { .. })));
    assert_eq!(
        document.typography.get("typography-family-generic-1").map(DesignToken::type_name),
        Some("fontFamily")
    );
    assert_eq!(
        document.typography.get("typography-size-generic-1").map(DesignToken::type_name),
        Some("string")
    );
    assert_eq!(
        document.spacing.get("spacing-generic-1").map(DesignToken::type_name),
        Some("dimension")
    );
    assert_eq!(
        document.motion.get("motion-generic-1").map(DesignToken::type_name),
        Some("transition")
    );

    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("tokenSet").is_some());
    assert!(json.get("tokenSetHash").is_some());
    assert!(json.get("qualityInsights").is_some());
    assert!(json["tokenSet"].get("border").is_none());
    assert_eq!(json["origin"]["domain"], "example.com");
}

#[test]
fn test_flags_on_single_use_tokens() {
    let result = extract(".a{color:#112233} .b{color:#112233} .c{color:#445566}");
    let colors = &result.token_groups.colors;

    assert_eq!(colors[0].value, "#112233");
    assert_eq!(colors[0].usage, 2);
    assert!(colors[0].flags.is_empty());
    assert_eq!(colors[1].flags, vec![TokenFlag::LowUsage]);
}

#[test]
fn test_duplicate_sources_are_counted_once() {
    let css = ".a{color:#112233} .b{color:#112233}";
    let single = TokenExtractor::default().generate(&[css_source(css)], test_origin());
    let repeated = TokenExtractor::default().generate(
        &[
            css_source(css),
            CssSource::new(SourceKind::Link, Some("https://example.com/a.css".to_string()), css),
        ],
        test_origin(),
    );

    assert_eq!(single.token_groups, repeated.token_groups);
    assert_eq!(repeated.token_groups.colors[0].usage, 2);
}

#[test]
fn test_sources_are_concatenated() {
    let sources = vec![
        css_source(":root{--brand:#112233}"),
        css_source(".a{color:var(--brand)}"),
    ];
    let result = TokenExtractor::default().generate(&sources, test_origin());
    assert_eq!(result.token_groups.colors[0].name, "color-brand");
    assert_eq!(result.token_groups.colors[0].usage, 1);
}

#[test]
fn test_input_is_truncated_at_char_boundary() {
    let config = ExtractorConfig {
        max_input_bytes: 5,
        ..ExtractorConfig::default()
    };
    let extractor = TokenExtractor::new(config);

    let css = extractor.concatenate_sources(&[css_source("ééééé")]);
    assert_eq!(css, "éé");

    let result = extractor.generate(&[css_source(".a{color:#112233}")], test_origin());
    assert_eq!(result.summary.tokens_extracted, 0);
}

#[test]
fn test_configured_confidence() {
    let mut config = ExtractorConfig::default();
    config.confidence.color = LaneConfidence::new(95, 40);
    let extractor = TokenExtractor::new(config);

    let result = extractor.generate(
        &[css_source(":root{--brand:#112233} .b{color:#445566}")],
        test_origin(),
    );
    let colors = &result.token_groups.colors;
    assert_eq!(colors[0].confidence, 95);
    assert_eq!(colors[1].confidence, 40);
    assert!(colors[1].flags.contains(&TokenFlag::LowConfidence));
}

#[test]
fn test_malformed_css_does_not_fail() {
    let result = extract("}}} .a{color:#112233 .b{margin: 4px}} @media (min-width:{ .c{color:#445566}");
    assert_eq!(result.summary.tokens_extracted, result.token_groups.total());
    assert_eq!(result.token_set.token_count(), result.token_groups.total());

    let garbage = extract("not css at all ::: ;;; {{{");
    assert_eq!(garbage.token_set_hash, garbage.token_set.content_hash());
}

#[test]
fn test_extractor_is_shareable_across_threads() {
    let extractor = std::sync::Arc::new(TokenExtractor::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = extractor.clone();
            std::thread::spawn(move || {
                extractor
                    .generate(&[css_source(".a{margin:8px}")], test_origin())
                    .token_set_hash
            })
        })
        .collect();

    let hashes: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(hashes.windows(2).all(|w| w[0] == w[1]));
}
