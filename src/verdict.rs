// Data model: the analysis verdict as the service reports it.
//
// These are the types that flow through the application. They mirror the
// wire format of the analysis API so one serde representation serves
// decoding, history persistence, and export alike.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One analyzed URL: verdict, score, advice, and the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The URL exactly as submitted (surrounding whitespace trimmed).
    pub url: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    pub is_phishing: bool,
    /// 0 (benign) to 100 (certain phishing).
    pub phishing_score: u8,
    pub risk_level: RiskBand,
    pub recommendation: String,
    /// Ordered most-salient-first; rendered verbatim.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Loose bag of named checks; values are flags, counts, or text.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedAnalysis>,
}

/// Risk bands derived from the phishing score. The service localizes the
/// wire tokens, so the decoder accepts those spellings as aliases while
/// everything stored or exported locally uses the canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBand {
    #[serde(rename = "LOW", alias = "BAIXO")]
    Low,
    #[serde(rename = "MEDIUM", alias = "MÉDIO", alias = "MEDIO")]
    Medium,
    #[serde(rename = "HIGH", alias = "ALTO")]
    High,
    #[serde(rename = "CRITICAL", alias = "CRÍTICO", alias = "CRITICO")]
    Critical,
}

impl RiskBand {
    /// Determine the band from a phishing score (0-100). Boundary scores
    /// fall in the upper band: 30 is already MEDIUM, 70 already CRITICAL.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => RiskBand::Critical,
            s if s >= 50 => RiskBand::High,
            s if s >= 30 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
            RiskBand::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single technical check value. The service is free to add checks, so
/// unknown shapes are carried verbatim instead of failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckValue {
    Flag(bool),
    Count(i64),
    Text(String),
    Other(serde_json::Value),
}

impl CheckValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CheckValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

/// The deeper sub-reports. Every sub-report is independently optional and
/// carries its own availability; a missing or failed one renders as
/// "unavailable", never as a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whois: Option<WhoisReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SslReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_similarity: Option<BrandSimilarityReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirects: Option<RedirectReport>,
}

/// Domain registration data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisReport {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub domain_age_days: Option<i64>,
    #[serde(default)]
    pub is_new_domain: Option<bool>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub registrar: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Certificate inspection data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SslReport {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub is_self_signed: Option<bool>,
    #[serde(default)]
    pub uses_free_ssl: Option<bool>,
    #[serde(default)]
    pub is_expired: Option<bool>,
    #[serde(default)]
    pub expires_soon: Option<bool>,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
    #[serde(default)]
    pub domain_matches: Option<bool>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// How close the domain name sits to known brand names (typosquatting).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandSimilarityReport {
    #[serde(default)]
    pub most_similar_brand: Option<String>,
    /// Percentage, 0 to 100, against the closest brand. The service flags
    /// a lookalike above 70.
    #[serde(default)]
    pub similarity_score: f64,
    #[serde(default)]
    pub is_similar_to_brand: bool,
    /// Every compared brand with its similarity percentage.
    #[serde(default)]
    pub all_similarities: BTreeMap<String, f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BrandSimilarityReport {
    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }

    /// The closest candidate brands, best first. Ties break on the brand
    /// name so the ranking is deterministic.
    pub fn ranked(&self, top: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .all_similarities
            .iter()
            .map(|(brand, score)| (brand.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(b.0))
        });
        ranked.truncate(top);
        ranked
    }
}

/// What the fetched page itself contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentReport {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub has_forms: bool,
    #[serde(default)]
    pub form_count: u32,
    #[serde(default)]
    pub has_login_form: bool,
    #[serde(default)]
    pub has_sensitive_fields: bool,
    #[serde(default)]
    pub sensitive_field_count: u32,
    #[serde(default)]
    pub asks_for_financial_info: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Where the URL actually leads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedirectReport {
    #[serde(default)]
    pub has_redirects: bool,
    #[serde(default)]
    pub redirect_count: u32,
    #[serde(default)]
    pub has_multiple_redirects: bool,
    #[serde(default)]
    pub crosses_domains: bool,
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RedirectReport {
    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }
}
