use serde::Serialize;

pub const BADGE_THRESHOLD: f64 = 0.5;

// Lower bounds of the half-open tier ranges.
const MODERATE_FROM: f64 = 0.3;
const MODERATE_HIGH_FROM: f64 = 0.5;
const HIGH_FROM: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Moderate,
    ModerateHigh,
    High,
}

impl RiskTier {
    pub fn from_default_probability(p: f64) -> Self {
        match p {
            p if p >= HIGH_FROM => RiskTier::High,
            p if p >= MODERATE_HIGH_FROM => RiskTier::ModerateHigh,
            p if p >= MODERATE_FROM => RiskTier::Moderate,
            _ => RiskTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::ModerateHigh => "Moderate-high",
            RiskTier::High => "High",
        }
    }

    /// The emphasised phrase inside [`RiskTier::advisory`].
    pub fn headline(self) -> &'static str {
        match self {
            RiskTier::Low => "low risk",
            RiskTier::Moderate => "moderate risk",
            RiskTier::ModerateHigh => "moderate-to-high risk",
            RiskTier::High => "very high risk",
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            RiskTier::Low => "This borrower appears to be low risk based on the current data.",
            RiskTier::Moderate => {
                "This borrower has a moderate risk level. Standard checks are recommended."
            }
            RiskTier::ModerateHigh => {
                "This borrower is at moderate-to-high risk. Review additional documents or \
                 collateral before approval."
            }
            RiskTier::High => {
                "This borrower is at very high risk of not fully paying the loan. Consider \
                 stricter conditions, smaller amounts, or rejection."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBadge {
    Low,
    High,
}

impl RiskBadge {
    pub fn from_default_probability(p: f64) -> Self {
        if p >= BADGE_THRESHOLD {
            RiskBadge::High
        } else {
            RiskBadge::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBadge::Low => "LOW RISK",
            RiskBadge::High => "HIGH RISK",
        }
    }

    /// CSS modifier used by the dashboard badge.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskBadge::Low => "low",
            RiskBadge::High => "high",
        }
    }
}

/// Badge and tier derived together from one probability so they can never disagree on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub default_probability: f64,
    pub badge: RiskBadge,
    pub tier: RiskTier,
}

impl RiskAssessment {
    pub fn from_default_probability(default_probability: f64) -> Self {
        Self {
            default_probability,
            badge: RiskBadge::from_default_probability(default_probability),
            tier: RiskTier::from_default_probability(default_probability),
        }
    }
}
