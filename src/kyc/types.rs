use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentExperience {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentGoal {
    Preservation,
    Income,
    Growth,
    Speculation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentHorizon {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum IncomeBracket {
    #[serde(rename = "under_25k")]
    Under25k,
    #[serde(rename = "25k_50k")]
    From25kTo50k,
    #[serde(rename = "50k_100k")]
    From50kTo100k,
    #[serde(rename = "100k_250k")]
    From100kTo250k,
    #[serde(rename = "over_250k")]
    Over250k,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum NetWorthBracket {
    #[serde(rename = "under_50k")]
    Under50k,
    #[serde(rename = "50k_100k")]
    From50kTo100k,
    #[serde(rename = "100k_500k")]
    From100kTo500k,
    #[serde(rename = "500k_1m")]
    From500kTo1m,
    #[serde(rename = "over_1m")]
    Over1m,
}

/// Completed questionnaire answer set.
#[derive(Debug, Clone, Deserialize)]
pub struct KycAnswers {
    pub investment_experience: InvestmentExperience,
    pub investment_goals: InvestmentGoal,
    pub investment_horizon: InvestmentHorizon,
    /// 1-10 scale.
    pub risk_tolerance: u8,
    /// 1-10 scale.
    pub loss_tolerance: u8,
    /// 18-100.
    pub age: u8,
    pub annual_income: IncomeBracket,
    pub net_worth: NetWorthBracket,
    pub regulatory_compliance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

/// Recommended percentage allocation across five asset classes.
/// Always sums to 100.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Allocation {
    pub stocks: u8,
    pub bonds: u8,
    pub crypto: u8,
    pub commodities: u8,
    pub cash: u8,
}

impl Allocation {
    pub fn total(&self) -> u32 {
        self.stocks as u32
            + self.bonds as u32
            + self.crypto as u32
            + self.commodities as u32
            + self.cash as u32
    }
}

/// Scored risk profile for one questionnaire submission.
#[derive(Debug, Clone, Serialize)]
pub struct KycAssessment {
    pub risk_profile: RiskProfile,
    /// Normalized 1-10 score.
    pub risk_score: u8,
    /// Unnormalized weighted sum of all answers.
    pub raw_score: u32,
    pub recommended_allocation: Allocation,
}
