// Unit tests for the view-model builders.
//
// The builders are pure, so the presentation rules are asserted on
// plain data: banner tone, score bar, warning styling, check labels and
// polarity, and the five advanced panels with their availability rules.

use std::collections::BTreeMap;

use lurecheck::classify::{Polarity, RecommendationClass, ScoreColor};
use lurecheck::output::view::{self, PanelState, PanelView};
use lurecheck::verdict::{
    AdvancedAnalysis, AnalysisResult, BrandSimilarityReport, CheckValue, ContentReport,
    RedirectReport, RiskBand, SslReport, WhoisReport,
};

fn verdict(score: u8) -> AnalysisResult {
    AnalysisResult {
        url: "https://suspect.example/login".to_string(),
        domain: "suspect.example".to_string(),
        subdomain: None,
        is_phishing: score >= 50,
        phishing_score: score,
        risk_level: RiskBand::from_score(score),
        recommendation: "Do not enter credentials on this page.".to_string(),
        warnings: vec![],
        checks: BTreeMap::new(),
        advanced: None,
    }
}

fn ready_rows(panel: &PanelView) -> &[view::DetailRow] {
    match &panel.state {
        PanelState::Ready(rows) => rows,
        PanelState::Unavailable(reason) => {
            panic!("expected {} to be ready, got unavailable: {reason}", panel.title)
        }
    }
}

fn unavailable_reason(panel: &PanelView) -> &str {
    match &panel.state {
        PanelState::Unavailable(reason) => reason,
        PanelState::Ready(_) => panic!("expected {} to be unavailable", panel.title),
    }
}

fn row<'a>(rows: &'a [view::DetailRow], label: &str) -> &'a view::DetailRow {
    rows.iter()
        .find(|r| r.label == label)
        .unwrap_or_else(|| panic!("no row labeled {label:?}"))
}

// ============================================================
// Banner and headline fields
// ============================================================

#[test]
fn phishing_verdict_gets_the_danger_banner() {
    let view = view::result_view(&verdict(85));
    assert_eq!(view.banner.tone, view::BannerTone::Danger);
    assert_eq!(view.banner.text, "ALERT: likely phishing site");
}

#[test]
fn clean_verdict_gets_the_safe_banner() {
    let view = view::result_view(&verdict(5));
    assert_eq!(view.banner.tone, view::BannerTone::Safe);
    assert_eq!(view.banner.text, "This URL appears safe");
}

#[test]
fn headline_fields_carry_over_verbatim() {
    let mut result = verdict(42);
    result.subdomain = Some("login".to_string());
    let view = view::result_view(&result);
    assert_eq!(view.url, result.url);
    assert_eq!(view.domain, result.domain);
    assert_eq!(view.subdomain.as_deref(), Some("login"));
    assert_eq!(view.recommendation, result.recommendation);
}

// ============================================================
// Score bar
// ============================================================

#[test]
fn score_bar_reflects_the_score() {
    let view = view::result_view(&verdict(64));
    assert_eq!(view.score.percent, 64);
    assert_eq!(view.score.color, ScoreColor::Orange);
    assert_eq!(view.score.label, "64/100");
}

#[test]
fn the_three_scales_are_kept_separately_on_the_view() {
    // 55 renders an orange bar and a HIGH band, but warning-styled advice.
    let view = view::result_view(&verdict(55));
    assert_eq!(view.band, RiskBand::High);
    assert_eq!(view.score.color, ScoreColor::Orange);
    assert_eq!(view.recommendation_class, RecommendationClass::Warning);
}

// ============================================================
// Warnings
// ============================================================

#[test]
fn plain_warnings_are_not_affirmative() {
    let mut result = verdict(70);
    result.warnings = vec!["Domain registered 3 days ago".to_string()];
    let view = view::result_view(&result);
    assert_eq!(view.warnings.len(), 1);
    assert!(!view.warnings[0].affirmative);
    assert_eq!(view.warnings[0].text, "Domain registered 3 days ago");
}

#[test]
fn marker_prefixed_warnings_are_affirmative() {
    let mut result = verdict(10);
    result.warnings = vec![
        "✅ No phishing indicators found".to_string(),
        "  ✅ Certificate is valid".to_string(),
        "Minor: URL is fairly long".to_string(),
    ];
    let view = view::result_view(&result);
    assert!(view.warnings[0].affirmative);
    assert!(view.warnings[1].affirmative, "leading whitespace is tolerated");
    assert!(!view.warnings[2].affirmative);
}

#[test]
fn warning_order_is_preserved() {
    let mut result = verdict(70);
    result.warnings = vec!["first".to_string(), "second".to_string(), "third".to_string()];
    let view = view::result_view(&result);
    let texts: Vec<&str> = view.warnings.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

// ============================================================
// Check rows
// ============================================================

#[test]
fn known_checks_get_human_labels() {
    assert_eq!(view::check_label("has_ip_address"), Some("Uses a raw IP address"));
    assert_eq!(view::check_label("uses_https"), Some("Uses HTTPS"));
    assert_eq!(view::check_label("mimics_brand"), Some("Mimics a known brand"));
    assert_eq!(view::check_label("never_heard_of_it"), None);
}

#[test]
fn every_check_the_service_emits_has_a_label() {
    // The full key set the analysis engine reports on every verdict.
    // None of these may fall through to the raw-key fallback.
    let service_keys = [
        "has_ip_address",
        "has_at_symbol",
        "url_length",
        "is_url_too_long",
        "has_suspicious_tld",
        "has_excessive_subdomains",
        "has_numbers_in_domain",
        "has_special_chars",
        "uses_https",
        "has_suspicious_words",
        "mimics_brand",
        "subdomain_mimics_brand",
        "has_many_dots",
        "has_double_slash",
        "domain_length",
        "subdomain_count",
        "has_repeated_letters",
        "uses_trusted_hosting",
    ];
    assert_eq!(service_keys.len(), 18);
    for key in service_keys {
        let label = view::check_label(key);
        assert!(label.is_some(), "{key} is missing from the label table");
        assert_ne!(label, Some(key), "{key} must get a human label");
    }
}

#[test]
fn unknown_checks_fall_back_to_the_raw_key() {
    let mut result = verdict(40);
    result
        .checks
        .insert("experimental_check".to_string(), CheckValue::Flag(true));
    let view = view::result_view(&result);
    let row = row(&view.checks, "experimental_check");
    assert_eq!(row.value, "yes");
    assert_eq!(row.polarity, Polarity::Negative);
}

#[test]
fn check_values_render_by_shape() {
    let mut result = verdict(40);
    result.checks.insert("uses_https".to_string(), CheckValue::Flag(false));
    result.checks.insert("url_length".to_string(), CheckValue::Count(137));
    // A text-valued check the vocabulary does not know yet
    result
        .checks
        .insert("suffix".to_string(), CheckValue::Text("zip".to_string()));
    let view = view::result_view(&result);

    let https = row(&view.checks, "Uses HTTPS");
    assert_eq!(https.value, "no");
    assert_eq!(https.polarity, Polarity::Negative);

    let length = row(&view.checks, "URL length");
    assert_eq!(length.value, "137");
    assert_eq!(length.polarity, Polarity::Neutral);

    let suffix = row(&view.checks, "suffix");
    assert_eq!(suffix.value, "zip");
    assert_eq!(suffix.polarity, Polarity::Neutral);
}

#[test]
fn critical_phishing_scenario_reads_dangerous_end_to_end() {
    let mut result = verdict(85);
    result.checks.insert("has_ip_address".to_string(), CheckValue::Flag(true));
    result.checks.insert("uses_https".to_string(), CheckValue::Flag(false));
    let view = view::result_view(&result);

    assert_eq!(view.banner.tone, view::BannerTone::Danger);
    assert_eq!(view.band, RiskBand::Critical);
    assert_eq!(view.score.color, ScoreColor::Red);
    assert_eq!(view.recommendation_class, RecommendationClass::Danger);
    assert_eq!(row(&view.checks, "Uses a raw IP address").polarity, Polarity::Negative);
    assert_eq!(row(&view.checks, "Uses HTTPS").polarity, Polarity::Negative);
}

// ============================================================
// Advanced panels: availability
// ============================================================

#[test]
fn no_advanced_block_means_no_advanced_view() {
    let view = view::result_view(&verdict(40));
    assert!(view.advanced.is_none());
}

#[test]
fn empty_advanced_block_renders_five_not_included_panels() {
    let mut result = verdict(40);
    result.advanced = Some(AdvancedAnalysis::default());
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();

    for panel in [
        &advanced.whois,
        &advanced.ssl,
        &advanced.brand,
        &advanced.content,
        &advanced.redirects,
    ] {
        assert_eq!(
            unavailable_reason(panel),
            "not included in this analysis",
            "{} should be marked not included",
            panel.title
        );
    }
}

#[test]
fn failed_lookup_shows_the_service_error() {
    let mut result = verdict(40);
    result.advanced = Some(AdvancedAnalysis {
        whois: Some(WhoisReport {
            available: false,
            error: Some("WHOIS lookup timed out".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    assert_eq!(unavailable_reason(&advanced.whois), "WHOIS lookup timed out");
}

#[test]
fn failed_lookup_without_error_text_gets_the_fallback() {
    let mut result = verdict(40);
    result.advanced = Some(AdvancedAnalysis {
        ssl: Some(SslReport {
            available: false,
            error: Some("   ".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    assert_eq!(unavailable_reason(&advanced.ssl), "no data from the service");
}

#[test]
fn available_report_with_no_fields_is_still_unavailable() {
    let mut result = verdict(40);
    result.advanced = Some(AdvancedAnalysis {
        whois: Some(WhoisReport {
            available: true,
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    assert_eq!(unavailable_reason(&advanced.whois), "no data from the service");
}

// ============================================================
// Advanced panels: row content
// ============================================================

#[test]
fn whois_panel_flags_new_domains() {
    let mut result = verdict(75);
    result.advanced = Some(AdvancedAnalysis {
        whois: Some(WhoisReport {
            available: true,
            domain_age_days: Some(4),
            is_new_domain: Some(true),
            registrar: Some("Cheap Domains LLC".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.whois);

    let age = row(rows, "Domain age");
    assert_eq!(age.value, "4 days");
    assert_eq!(age.polarity, Polarity::Negative);
    assert_eq!(row(rows, "Registrar").value, "Cheap Domains LLC");
    assert_eq!(row(rows, "Country").polarity, Polarity::Neutral);
}

#[test]
fn whois_panel_treats_old_domains_as_positive() {
    let mut result = verdict(10);
    result.advanced = Some(AdvancedAnalysis {
        whois: Some(WhoisReport {
            available: true,
            domain_age_days: Some(5840),
            is_new_domain: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let age = row(ready_rows(&advanced.whois), "Domain age");
    assert_eq!(age.value, "5840 days");
    assert_eq!(age.polarity, Polarity::Positive);
}

#[test]
fn ssl_panel_polarities_follow_the_flag_meaning() {
    let mut result = verdict(60);
    result.advanced = Some(AdvancedAnalysis {
        ssl: Some(SslReport {
            available: true,
            issuer: Some("Let's Encrypt".to_string()),
            is_self_signed: Some(false),
            uses_free_ssl: Some(true),
            is_expired: Some(false),
            domain_matches: Some(true),
            days_until_expiry: Some(42),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.ssl);

    // Bad-when-true flags
    assert_eq!(row(rows, "Self-signed").value, "no");
    assert_eq!(row(rows, "Self-signed").polarity, Polarity::Positive);
    assert_eq!(row(rows, "Free certificate").polarity, Polarity::Negative);
    assert_eq!(row(rows, "Expired").polarity, Polarity::Positive);
    // Good-when-true flag
    assert_eq!(row(rows, "Matches domain").value, "yes");
    assert_eq!(row(rows, "Matches domain").polarity, Polarity::Positive);
    // Plain facts
    assert_eq!(row(rows, "Days until expiry").value, "42");
    assert_eq!(row(rows, "Days until expiry").polarity, Polarity::Neutral);
}

#[test]
fn brand_panel_ranks_top_candidates_descending() {
    let mut similarities = BTreeMap::new();
    for (brand, score) in [
        ("paypal", 92.31_f64),
        ("paypa1", 92.31),
        ("apple", 80.0),
        ("amazon", 75.0),
        ("google", 60.0),
        ("microsoft", 55.0),
        ("netflix", 40.0),
    ] {
        similarities.insert(brand.to_string(), score);
    }
    let mut result = verdict(80);
    result.advanced = Some(AdvancedAnalysis {
        brand_similarity: Some(BrandSimilarityReport {
            most_similar_brand: Some("paypal".to_string()),
            similarity_score: 92.31,
            is_similar_to_brand: true,
            all_similarities: similarities,
            error: None,
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.brand);

    assert_eq!(row(rows, "Closest brand").value, "paypal (92%)");
    assert_eq!(row(rows, "Closest brand").polarity, Polarity::Negative);
    assert_eq!(row(rows, "Flagged as lookalike").value, "yes");

    // Two header rows, then at most five ranked candidates
    assert_eq!(rows.len(), 2 + 5);
    let ranked: Vec<&str> = rows[2..].iter().map(|r| r.label.as_str()).collect();
    // Ties break on the brand name, so paypa1 sorts before paypal
    assert_eq!(ranked, ["paypa1", "paypal", "apple", "amazon", "google"]);
    assert_eq!(rows[2].value, "92%");
}

#[test]
fn brand_scores_render_as_the_percentages_they_arrive_as() {
    // The service sends percentages, already scaled: a score of 87.5
    // means 87.5%, not 0.875.
    let mut similarities = BTreeMap::new();
    similarities.insert("paypal".to_string(), 87.5_f64);
    similarities.insert("apple".to_string(), 33.33);
    let mut result = verdict(47);
    result.advanced = Some(AdvancedAnalysis {
        brand_similarity: Some(BrandSimilarityReport {
            most_similar_brand: Some("paypal".to_string()),
            similarity_score: 87.5,
            is_similar_to_brand: true,
            all_similarities: similarities,
            error: None,
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.brand);

    assert_eq!(row(rows, "Closest brand").value, "paypal (88%)");
    assert_eq!(row(rows, "apple").value, "33%");
}

#[test]
fn brand_panel_without_candidate_is_not_flagged() {
    let mut result = verdict(20);
    result.advanced = Some(AdvancedAnalysis {
        brand_similarity: Some(BrandSimilarityReport {
            most_similar_brand: None,
            similarity_score: 0.0,
            is_similar_to_brand: false,
            all_similarities: BTreeMap::new(),
            error: None,
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    // No candidate and no comparisons leaves nothing to show
    assert_eq!(unavailable_reason(&advanced.brand), "no data from the service");
}

#[test]
fn content_panel_highlights_credential_harvesting() {
    let mut result = verdict(88);
    result.advanced = Some(AdvancedAnalysis {
        content: Some(ContentReport {
            available: true,
            has_forms: true,
            form_count: 1,
            has_login_form: true,
            has_sensitive_fields: true,
            sensitive_field_count: 3,
            asks_for_financial_info: true,
            title: Some("Secure Login".to_string()),
            error: None,
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.content);

    assert_eq!(row(rows, "Title").value, "Secure Login");
    assert_eq!(row(rows, "Forms on page").value, "1");
    assert_eq!(row(rows, "Login form").polarity, Polarity::Negative);
    let sensitive = row(rows, "Sensitive fields");
    assert_eq!(sensitive.value, "3");
    assert_eq!(sensitive.polarity, Polarity::Negative);
    assert_eq!(row(rows, "Asks for financial data").polarity, Polarity::Negative);
}

#[test]
fn redirect_panel_reports_the_chain() {
    let mut result = verdict(65);
    result.advanced = Some(AdvancedAnalysis {
        redirects: Some(RedirectReport {
            has_redirects: true,
            redirect_count: 3,
            has_multiple_redirects: true,
            crosses_domains: true,
            final_url: Some("https://elsewhere.example/landing".to_string()),
            status_code: Some(200),
            error: None,
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    let rows = ready_rows(&advanced.redirects);

    assert_eq!(row(rows, "Redirect hops").value, "3");
    assert_eq!(row(rows, "Multiple redirects").polarity, Polarity::Negative);
    assert_eq!(row(rows, "Crosses domains").polarity, Polarity::Negative);
    assert_eq!(row(rows, "Final URL").value, "https://elsewhere.example/landing");
    assert_eq!(row(rows, "Status code").value, "200");
}

#[test]
fn redirect_error_marks_the_panel_unavailable() {
    let mut result = verdict(65);
    result.advanced = Some(AdvancedAnalysis {
        redirects: Some(RedirectReport {
            error: Some("too many redirects".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let view = view::result_view(&result);
    let advanced = view.advanced.unwrap();
    assert_eq!(unavailable_reason(&advanced.redirects), "too many redirects");
}
