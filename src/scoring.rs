use serde::Serialize;

/// Maximum aggregate score any component can report.
pub const MAX_SCORE: f64 = 10.0;

/// Clamp an aggregate rule score to the 0..=10 range.
pub fn cap(score: f64) -> f64 {
    score.clamp(0.0, MAX_SCORE)
}

/// Severity tier attached to a fired rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Three-tier bucketing of an aggregate risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Bucket a score against the configured thresholds (high first).
    pub fn classify(score: f64, high_at: f64, medium_at: f64) -> Self {
        if score >= high_at {
            Self::High
        } else if score >= medium_at {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_clamps_both_ends() {
        assert_eq!(cap(12.5), 10.0);
        assert_eq!(cap(-1.0), 0.0);
        assert_eq!(cap(4.5), 4.5);
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(ThreatLevel::classify(5.0, 5.0, 2.0), ThreatLevel::High);
        assert_eq!(ThreatLevel::classify(4.9, 5.0, 2.0), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::classify(2.0, 5.0, 2.0), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::classify(1.9, 5.0, 2.0), ThreatLevel::Low);
        assert_eq!(ThreatLevel::classify(0.0, 5.0, 2.0), ThreatLevel::Low);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
