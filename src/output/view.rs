// View models: everything the terminal needs, computed before printing.
//
// The builders here are pure: given a verdict they produce plain data,
// so the presentation rules (banner tone, bar color, polarity marks,
// label fallbacks) are testable without capturing terminal output.

use crate::classify::{check_polarity, Polarity, RecommendationClass, ScoreColor};
use crate::verdict::{
    AdvancedAnalysis, AnalysisResult, BrandSimilarityReport, CheckValue, ContentReport,
    RedirectReport, RiskBand, SslReport, WhoisReport,
};

/// Warnings starting with this marker are good news and get the positive
/// style. The marker comes from the service's own warning text.
pub const AFFIRMATIVE_MARKER: char = '✅';

/// How many candidate brands the similarity panel lists.
const BRAND_TOP_N: usize = 5;

const NOT_INCLUDED: &str = "not included in this analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Safe,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub tone: BannerTone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    /// Fill percentage; equals the score.
    pub percent: u8,
    pub color: ScoreColor,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarningLine {
    pub text: String,
    pub affirmative: bool,
}

/// One labeled line in the check table or an advanced panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Ready(Vec<DetailRow>),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: &'static str,
    pub state: PanelState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedView {
    pub whois: PanelView,
    pub ssl: PanelView,
    pub brand: PanelView,
    pub content: PanelView,
    pub redirects: PanelView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub banner: Banner,
    pub url: String,
    pub domain: String,
    pub subdomain: Option<String>,
    pub band: RiskBand,
    pub score: ScoreBar,
    pub recommendation: String,
    pub recommendation_class: RecommendationClass,
    pub warnings: Vec<WarningLine>,
    pub checks: Vec<DetailRow>,
    pub advanced: Option<AdvancedView>,
}

/// Build the complete view for one verdict.
pub fn result_view(result: &AnalysisResult) -> ResultView {
    let score = result.phishing_score;
    ResultView {
        banner: banner(result.is_phishing),
        url: result.url.clone(),
        domain: result.domain.clone(),
        subdomain: result.subdomain.clone(),
        band: result.risk_level,
        score: ScoreBar {
            percent: score.min(100),
            color: ScoreColor::from_score(score),
            label: format!("{score}/100"),
        },
        recommendation: result.recommendation.clone(),
        recommendation_class: RecommendationClass::from_score(score),
        warnings: result.warnings.iter().map(|w| warning_line(w)).collect(),
        checks: result
            .checks
            .iter()
            .map(|(name, value)| check_row(name, value))
            .collect(),
        advanced: result.advanced.as_ref().map(advanced_view),
    }
}

/// Human labels for the checks the service is known to report. Unknown
/// checks fall back to the raw key, so a new service check surfaces
/// without a client release.
pub fn check_label(key: &str) -> Option<&'static str> {
    let label = match key {
        "has_ip_address" => "Uses a raw IP address",
        "has_at_symbol" => "@ symbol in URL",
        "url_length" => "URL length",
        "is_url_too_long" => "Unusually long URL",
        "has_suspicious_tld" => "Suspicious top-level domain",
        "has_excessive_subdomains" => "Excessive subdomains",
        "has_numbers_in_domain" => "Numbers in domain",
        "has_special_chars" => "Special characters in domain",
        "uses_https" => "Uses HTTPS",
        "has_suspicious_words" => "Suspicious keywords",
        "mimics_brand" => "Mimics a known brand",
        "subdomain_mimics_brand" => "Subdomain mimics a brand",
        "has_many_dots" => "Many dots in URL",
        "has_double_slash" => "Double slash in path",
        "domain_length" => "Domain length",
        "subdomain_count" => "Subdomain count",
        "has_repeated_letters" => "Suspicious repeated letters",
        "uses_trusted_hosting" => "Trusted hosting provider",
        _ => return None,
    };
    Some(label)
}

fn banner(is_phishing: bool) -> Banner {
    if is_phishing {
        Banner {
            text: "ALERT: likely phishing site".to_string(),
            tone: BannerTone::Danger,
        }
    } else {
        Banner {
            text: "This URL appears safe".to_string(),
            tone: BannerTone::Safe,
        }
    }
}

fn warning_line(text: &str) -> WarningLine {
    WarningLine {
        text: text.to_string(),
        affirmative: text.trim_start().starts_with(AFFIRMATIVE_MARKER),
    }
}

fn check_row(name: &str, value: &CheckValue) -> DetailRow {
    DetailRow {
        label: check_label(name).unwrap_or(name).to_string(),
        value: check_value_text(value),
        polarity: check_polarity(name, value),
    }
}

fn check_value_text(value: &CheckValue) -> String {
    match value {
        CheckValue::Flag(true) => "yes".to_string(),
        CheckValue::Flag(false) => "no".to_string(),
        CheckValue::Count(n) => n.to_string(),
        CheckValue::Text(s) => s.clone(),
        CheckValue::Other(v) => v.to_string(),
    }
}

fn advanced_view(advanced: &AdvancedAnalysis) -> AdvancedView {
    AdvancedView {
        whois: whois_panel(advanced.whois.as_ref()),
        ssl: ssl_panel(advanced.ssl.as_ref()),
        brand: brand_panel(advanced.brand_similarity.as_ref()),
        content: content_panel(advanced.content.as_ref()),
        redirects: redirect_panel(advanced.redirects.as_ref()),
    }
}

fn whois_panel(report: Option<&WhoisReport>) -> PanelView {
    let title = "WHOIS";
    let Some(report) = report else {
        return not_included(title);
    };
    if !report.available {
        return unavailable(title, report.error.as_deref());
    }

    let mut rows = Vec::new();
    if let Some(age) = report.domain_age_days {
        rows.push(DetailRow {
            label: "Domain age".to_string(),
            value: format!("{age} days"),
            polarity: match report.is_new_domain {
                Some(true) => Polarity::Negative,
                Some(false) => Polarity::Positive,
                None => Polarity::Neutral,
            },
        });
    }
    push_text(&mut rows, "Created", report.creation_date.as_deref());
    push_text(&mut rows, "Expires", report.expiration_date.as_deref());
    push_text(&mut rows, "Registrar", report.registrar.as_deref());
    push_text(&mut rows, "Country", report.country.as_deref());
    ready_or_empty(title, rows)
}

fn ssl_panel(report: Option<&SslReport>) -> PanelView {
    let title = "SSL certificate";
    let Some(report) = report else {
        return not_included(title);
    };
    if !report.available {
        return unavailable(title, report.error.as_deref());
    }

    let mut rows = Vec::new();
    push_text(&mut rows, "Issuer", report.issuer.as_deref());
    push_text(&mut rows, "Common name", report.common_name.as_deref());
    push_flag(&mut rows, "Self-signed", report.is_self_signed, true);
    push_flag(&mut rows, "Free certificate", report.uses_free_ssl, true);
    push_flag(&mut rows, "Expired", report.is_expired, true);
    push_flag(&mut rows, "Expires soon", report.expires_soon, true);
    if let Some(days) = report.days_until_expiry {
        rows.push(DetailRow {
            label: "Days until expiry".to_string(),
            value: days.to_string(),
            polarity: Polarity::Neutral,
        });
    }
    push_flag(&mut rows, "Matches domain", report.domain_matches, false);
    push_text(&mut rows, "Valid from", report.valid_from.as_deref());
    push_text(&mut rows, "Valid until", report.valid_until.as_deref());
    ready_or_empty(title, rows)
}

fn brand_panel(report: Option<&BrandSimilarityReport>) -> PanelView {
    let title = "Brand similarity";
    let Some(report) = report else {
        return not_included(title);
    };
    if !report.is_available() {
        return unavailable(title, report.error.as_deref());
    }

    let mut rows = Vec::new();
    if let Some(brand) = report.most_similar_brand.as_deref() {
        rows.push(DetailRow {
            label: "Closest brand".to_string(),
            // The service already reports percentages (0-100)
            value: format!("{brand} ({:.0}%)", report.similarity_score),
            polarity: if report.is_similar_to_brand {
                Polarity::Negative
            } else {
                Polarity::Neutral
            },
        });
        rows.push(DetailRow {
            label: "Flagged as lookalike".to_string(),
            value: yes_no(report.is_similar_to_brand),
            polarity: if report.is_similar_to_brand {
                Polarity::Negative
            } else {
                Polarity::Positive
            },
        });
    }
    for (brand, score) in report.ranked(BRAND_TOP_N) {
        rows.push(DetailRow {
            label: brand.to_string(),
            value: format!("{score:.0}%"),
            polarity: Polarity::Neutral,
        });
    }
    ready_or_empty(title, rows)
}

fn content_panel(report: Option<&ContentReport>) -> PanelView {
    let title = "Page content";
    let Some(report) = report else {
        return not_included(title);
    };
    if !report.available {
        return unavailable(title, report.error.as_deref());
    }

    let mut rows = Vec::new();
    push_text(&mut rows, "Title", report.title.as_deref());
    rows.push(DetailRow {
        label: "Forms on page".to_string(),
        value: report.form_count.to_string(),
        polarity: Polarity::Neutral,
    });
    push_flag(&mut rows, "Login form", Some(report.has_login_form), true);
    rows.push(DetailRow {
        label: "Sensitive fields".to_string(),
        value: report.sensitive_field_count.to_string(),
        polarity: if report.has_sensitive_fields {
            Polarity::Negative
        } else {
            Polarity::Neutral
        },
    });
    push_flag(
        &mut rows,
        "Asks for financial data",
        Some(report.asks_for_financial_info),
        true,
    );
    ready_or_empty(title, rows)
}

fn redirect_panel(report: Option<&RedirectReport>) -> PanelView {
    let title = "Redirects";
    let Some(report) = report else {
        return not_included(title);
    };
    if !report.is_available() {
        return unavailable(title, report.error.as_deref());
    }

    let mut rows = Vec::new();
    rows.push(DetailRow {
        label: "Redirect hops".to_string(),
        value: report.redirect_count.to_string(),
        polarity: Polarity::Neutral,
    });
    push_flag(
        &mut rows,
        "Multiple redirects",
        Some(report.has_multiple_redirects),
        true,
    );
    push_flag(&mut rows, "Crosses domains", Some(report.crosses_domains), true);
    push_text(&mut rows, "Final URL", report.final_url.as_deref());
    if let Some(code) = report.status_code {
        rows.push(DetailRow {
            label: "Status code".to_string(),
            value: code.to_string(),
            polarity: Polarity::Neutral,
        });
    }
    ready_or_empty(title, rows)
}

fn not_included(title: &'static str) -> PanelView {
    PanelView {
        title,
        state: PanelState::Unavailable(NOT_INCLUDED.to_string()),
    }
}

fn unavailable(title: &'static str, error: Option<&str>) -> PanelView {
    let reason = error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or("no data from the service")
        .to_string();
    PanelView {
        title,
        state: PanelState::Unavailable(reason),
    }
}

fn ready_or_empty(title: &'static str, rows: Vec<DetailRow>) -> PanelView {
    if rows.is_empty() {
        PanelView {
            title,
            state: PanelState::Unavailable("no data from the service".to_string()),
        }
    } else {
        PanelView {
            title,
            state: PanelState::Ready(rows),
        }
    }
}

fn push_text(rows: &mut Vec<DetailRow>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        rows.push(DetailRow {
            label: label.to_string(),
            value: value.to_string(),
            polarity: Polarity::Neutral,
        });
    }
}

fn push_flag(rows: &mut Vec<DetailRow>, label: &str, value: Option<bool>, bad_when_true: bool) {
    if let Some(flag) = value {
        rows.push(DetailRow {
            label: label.to_string(),
            value: yes_no(flag),
            polarity: if flag == bad_when_true {
                Polarity::Negative
            } else {
                Polarity::Positive
            },
        });
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
