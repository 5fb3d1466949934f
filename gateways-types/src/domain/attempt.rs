//! Per-candidate results of the automatic bank selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bank_type::{BankType, Identifier};

/// Step of the selection at which a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStage {
    /// Class or settings lookup.
    Resolve,
    /// Bank constructor rejected the settings.
    Construct,
    /// The bank was built but `check_gateway` failed.
    CheckGateway,
}

impl AsRef<str> for AttemptStage {
    fn as_ref(&self) -> &str {
        match self {
            Self::Resolve => "RESOLVE",
            Self::Construct => "CONSTRUCT",
            Self::CheckGateway => "CHECK_GATEWAY",
        }
    }
}

impl fmt::Display for AttemptStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptOutcome {
    Connected,
    Failed { stage: AttemptStage, reason: String },
}

/// One candidate tried by the automatic selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttempt {
    pub bank_type: BankType,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

impl CandidateAttempt {
    pub fn connected(bank_type: BankType) -> Self {
        Self {
            bank_type,
            outcome: AttemptOutcome::Connected,
        }
    }

    pub fn failed(bank_type: BankType, stage: AttemptStage, reason: impl Into<String>) -> Self {
        Self {
            bank_type,
            outcome: AttemptOutcome::Failed {
                stage,
                reason: reason.into(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Connected)
    }
}

/// Every failed candidate of an exhausted automatic selection, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoConnectionReport {
    pub identifier: Identifier,
    pub attempts: Vec<CandidateAttempt>,
}

impl AutoConnectionReport {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            attempts: Vec::new(),
        }
    }

    pub fn push(&mut self, attempt: CandidateAttempt) {
        self.attempts.push(attempt);
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Bank types in the order they were tried.
    pub fn tried(&self) -> Vec<BankType> {
        self.attempts.iter().map(|a| a.bank_type).collect()
    }
}

impl fmt::Display for AutoConnectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return write!(f, "no banks prioritized for identifier {}", self.identifier);
        }

        write!(f, "tried ")?;
        for (i, attempt) in self.attempts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &attempt.outcome {
                AttemptOutcome::Connected => write!(f, "{} (connected)", attempt.bank_type)?,
                AttemptOutcome::Failed { stage, reason } => {
                    write!(f, "{} ({}: {})", attempt.bank_type, stage, reason)?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let mut report = AutoConnectionReport::new(Identifier::default());
        report.push(CandidateAttempt::failed(
            BankType::ZARINPAL,
            AttemptStage::CheckGateway,
            "timeout",
        ));
        report.push(CandidateAttempt::failed(
            BankType::IDPAY,
            AttemptStage::Resolve,
            "no class",
        ));

        assert_eq!(
            report.to_string(),
            "tried ZARINPAL (CHECK_GATEWAY: timeout), IDPAY (RESOLVE: no class)"
        );
        assert_eq!(report.tried(), vec![BankType::ZARINPAL, BankType::IDPAY]);
    }

    #[test]
    fn test_connected_attempt_display() {
        let mut report = AutoConnectionReport::new(Identifier::default());
        report.push(CandidateAttempt::failed(
            BankType::BMI,
            AttemptStage::Construct,
            "bad terminal",
        ));
        report.push(CandidateAttempt::connected(BankType::SEP));

        assert!(report.attempts[1].is_connected());
        assert_eq!(
            report.to_string(),
            "tried BMI (CONSTRUCT: bad terminal), SEP (connected)"
        );
    }

    #[test]
    fn test_empty_report_display() {
        let report = AutoConnectionReport::new(Identifier::default());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "no banks prioritized for identifier 1");
    }

    #[test]
    fn test_attempt_serializes_flat() {
        let attempt = CandidateAttempt::failed(BankType::SEP, AttemptStage::Construct, "bad");
        let json = serde_json::to_value(&attempt).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bank_type": "SEP",
                "status": "FAILED",
                "stage": "CONSTRUCT",
                "reason": "bad"
            })
        );
    }
}
