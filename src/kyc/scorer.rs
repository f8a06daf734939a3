use super::types::{
    Allocation, IncomeBracket, InvestmentExperience, InvestmentGoal, InvestmentHorizon,
    KycAnswers, KycAssessment, NetWorthBracket, RiskProfile,
};

const CONSERVATIVE_ALLOCATION: Allocation = Allocation {
    stocks: 20,
    bonds: 60,
    crypto: 5,
    commodities: 5,
    cash: 10,
};

const BALANCED_ALLOCATION: Allocation = Allocation {
    stocks: 50,
    bonds: 30,
    crypto: 10,
    commodities: 5,
    cash: 5,
};

const AGGRESSIVE_ALLOCATION: Allocation = Allocation {
    stocks: 70,
    bonds: 10,
    crypto: 15,
    commodities: 3,
    cash: 2,
};

/// Score a completed questionnaire into a risk profile, a normalized 1-10
/// score, and a recommended allocation. Pure function; the caller persists
/// the result. Scale and age answers outside their documented ranges are
/// rejected rather than silently scored.
pub fn score_kyc(answers: &KycAnswers) -> eyre::Result<KycAssessment> {
    validate(answers)?;

    let raw_score = experience_points(answers.investment_experience)
        + goal_points(answers.investment_goals)
        + horizon_points(answers.investment_horizon)
        + answers.risk_tolerance as u32
        + answers.loss_tolerance as u32
        + age_points(answers.age)
        + income_points(answers.annual_income)
        + net_worth_points(answers.net_worth);

    let raw = raw_score as f64;
    let (risk_profile, normalized) = if raw_score <= 15 {
        (RiskProfile::Conservative, (raw / 5.0).clamp(1.0, 3.0))
    } else if raw_score <= 30 {
        (RiskProfile::Balanced, ((raw - 15.0) / 3.0).clamp(4.0, 6.0))
    } else {
        (RiskProfile::Aggressive, ((raw - 30.0) / 2.0).clamp(7.0, 10.0))
    };

    Ok(KycAssessment {
        risk_profile,
        risk_score: normalized.round() as u8,
        raw_score,
        recommended_allocation: allocation_for(risk_profile),
    })
}

pub fn allocation_for(profile: RiskProfile) -> Allocation {
    match profile {
        RiskProfile::Conservative => CONSERVATIVE_ALLOCATION,
        RiskProfile::Balanced => BALANCED_ALLOCATION,
        RiskProfile::Aggressive => AGGRESSIVE_ALLOCATION,
    }
}

fn validate(answers: &KycAnswers) -> eyre::Result<()> {
    if !(1..=10).contains(&answers.risk_tolerance) {
        return Err(eyre::eyre!(
            "risk_tolerance must be between 1 and 10, got {}",
            answers.risk_tolerance
        ));
    }
    if !(1..=10).contains(&answers.loss_tolerance) {
        return Err(eyre::eyre!(
            "loss_tolerance must be between 1 and 10, got {}",
            answers.loss_tolerance
        ));
    }
    if !(18..=100).contains(&answers.age) {
        return Err(eyre::eyre!(
            "age must be between 18 and 100, got {}",
            answers.age
        ));
    }
    Ok(())
}

fn experience_points(experience: InvestmentExperience) -> u32 {
    match experience {
        InvestmentExperience::Beginner => 2,
        InvestmentExperience::Intermediate => 5,
        InvestmentExperience::Advanced => 8,
    }
}

fn goal_points(goal: InvestmentGoal) -> u32 {
    match goal {
        InvestmentGoal::Preservation => 1,
        InvestmentGoal::Income => 3,
        InvestmentGoal::Growth => 6,
        InvestmentGoal::Speculation => 9,
    }
}

fn horizon_points(horizon: InvestmentHorizon) -> u32 {
    match horizon {
        InvestmentHorizon::Short => 2,
        InvestmentHorizon::Medium => 5,
        InvestmentHorizon::Long => 8,
    }
}

/// Younger investors absorb more risk.
fn age_points(age: u8) -> u32 {
    if age < 30 {
        3
    } else if age < 50 {
        2
    } else if age < 65 {
        1
    } else {
        0
    }
}

fn income_points(income: IncomeBracket) -> u32 {
    match income {
        IncomeBracket::Under25k => 1,
        IncomeBracket::From25kTo50k => 2,
        IncomeBracket::From50kTo100k => 4,
        IncomeBracket::From100kTo250k => 6,
        IncomeBracket::Over250k => 8,
    }
}

fn net_worth_points(net_worth: NetWorthBracket) -> u32 {
    match net_worth {
        NetWorthBracket::Under50k => 1,
        NetWorthBracket::From50kTo100k => 2,
        NetWorthBracket::From100kTo500k => 4,
        NetWorthBracket::From500kTo1m => 6,
        NetWorthBracket::Over1m => 8,
    }
}
