use serde::Serialize;

use crate::kyc::types::KycAssessment;
use crate::threat::types::{SecurityAlert, ThreatReport};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub monitored_users: usize,
}

#[derive(Debug, Serialize)]
pub struct ThreatScanResponse {
    #[serde(flatten)]
    pub report: ThreatReport,
    pub alert: Option<SecurityAlert>,
}

#[derive(Debug, Serialize)]
pub struct KycScoreResponse {
    #[serde(flatten)]
    pub assessment: KycAssessment,
    pub kyc_status: &'static str,
    pub xp_awarded: u32,
}
