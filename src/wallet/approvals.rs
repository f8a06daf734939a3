use serde::Serialize;

use crate::scoring;

/// Risk tier of a token-spending approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalRisk {
    High,
    Low,
}

/// A token-spending approval granted by a wallet.
#[derive(Debug, Clone, Serialize)]
pub struct TokenApproval {
    pub spender: String,
    pub allowance: String,
    pub risk: ApprovalRisk,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalReport {
    pub wallet_address: String,
    pub approvals: Vec<TokenApproval>,
    pub risk_score: f64,
    pub has_high_risk_approvals: bool,
}

/// Source of a wallet's outstanding approvals. The scoring below is
/// independent of where the records come from; a real deployment injects a
/// chain- or database-backed implementation here.
pub trait ApprovalSource {
    fn approvals_for(&self, address: &str) -> Vec<TokenApproval>;
}

/// Fixed demonstration data standing in for on-chain approval records.
pub struct StaticApprovalSource {
    approvals: Vec<TokenApproval>,
}

impl StaticApprovalSource {
    pub fn demo() -> Self {
        Self {
            approvals: vec![
                TokenApproval {
                    spender: "0x1111111111111111111111111111111111111111".to_string(),
                    allowance: "UNLIMITED".to_string(),
                    risk: ApprovalRisk::High,
                },
                TokenApproval {
                    spender: "0x2222222222222222222222222222222222222222".to_string(),
                    allowance: "100 USDC".to_string(),
                    risk: ApprovalRisk::Low,
                },
                TokenApproval {
                    spender: "0x3333333333333333333333333333333333333333".to_string(),
                    allowance: "UNLIMITED".to_string(),
                    risk: ApprovalRisk::High,
                },
            ],
        }
    }

    pub fn with_approvals(approvals: Vec<TokenApproval>) -> Self {
        Self { approvals }
    }
}

impl ApprovalSource for StaticApprovalSource {
    fn approvals_for(&self, _address: &str) -> Vec<TokenApproval> {
        self.approvals.clone()
    }
}

/// Score a wallet's approvals: each high-risk approval adds `weight`,
/// capped at the score ceiling.
pub fn check_approvals(
    source: &impl ApprovalSource,
    weight: f64,
    address: &str,
) -> ApprovalReport {
    let approvals = source.approvals_for(address);
    let high_risk = approvals
        .iter()
        .filter(|a| a.risk == ApprovalRisk::High)
        .count();

    ApprovalReport {
        wallet_address: address.to_string(),
        risk_score: scoring::cap(high_risk as f64 * weight),
        has_high_risk_approvals: high_risk > 0,
        approvals,
    }
}
