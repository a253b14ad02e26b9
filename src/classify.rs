// Presentation classifiers over the phishing score and check values.
//
// Two score scales live side by side and they are NOT the same thing:
// the score bar uses four color bands while the recommendation styling
// uses three coarser classes. MEDIUM and HIGH scores look different on
// the bar but share the "warning" treatment on the advice text. Keep
// them keyed separately.

use crate::verdict::CheckValue;

/// Fill color for the score bar, four bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ScoreColor {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => ScoreColor::Red,
            s if s >= 50 => ScoreColor::Orange,
            s if s >= 30 => ScoreColor::Yellow,
            _ => ScoreColor::Green,
        }
    }

    /// The web palette these bands came from; kept for export consumers
    /// that want the original colors.
    pub fn hex(&self) -> &'static str {
        match self {
            ScoreColor::Green => "#10b981",
            ScoreColor::Yellow => "#f59e0b",
            ScoreColor::Orange => "#fb923c",
            ScoreColor::Red => "#ef4444",
        }
    }
}

/// Styling class for the recommendation text, three bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationClass {
    Safe,
    Warning,
    Danger,
}

impl RecommendationClass {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => RecommendationClass::Danger,
            s if s >= 30 => RecommendationClass::Warning,
            _ => RecommendationClass::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationClass::Safe => "safe",
            RecommendationClass::Warning => "warning",
            RecommendationClass::Danger => "danger",
        }
    }
}

/// How a check value should read: good news, bad news, or just a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Boolean checks where `true` is the GOOD outcome. Everything else is a
/// detection flag where `true` means trouble. Extend by name when the
/// service grows new positive checks.
const POSITIVE_WHEN_TRUE: &[&str] = &["uses_https", "uses_trusted_hosting"];

/// Classify one check for display. Non-boolean values (lengths, counts,
/// free text) carry no polarity.
pub fn check_polarity(name: &str, value: &CheckValue) -> Polarity {
    let Some(flag) = value.as_flag() else {
        return Polarity::Neutral;
    };
    let good_when_true = POSITIVE_WHEN_TRUE.contains(&name);
    if flag == good_when_true {
        Polarity::Positive
    } else {
        Polarity::Negative
    }
}
