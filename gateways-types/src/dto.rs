//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BankType, CandidateAttempt, Currency, Identifier};
use crate::ports::Bank;

// ─────────────────────────────────────────────────────────────────────────────
// Bank creation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to build a specific bank (or the merchant's default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBankRequest {
    /// Bank to build; the merchant's default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_type: Option<BankType>,
    #[serde(default)]
    pub identifier: Identifier,
}

/// Request to pick the first reachable bank by priority.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoCreateRequest {
    #[serde(default)]
    pub identifier: Identifier,
    /// Amount in the merchant's currency to check the gateway with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

/// Summary of a constructed bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankResponse {
    pub bank_type: BankType,
    pub identifier: Identifier,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl BankResponse {
    pub fn from_bank(bank: &dyn Bank) -> Self {
        Self {
            bank_type: bank.bank_type(),
            identifier: bank.identifier().clone(),
            currency: bank.currency(),
            callback_url: bank.callback_url().map(str::to_string),
        }
    }
}

/// Result of an automatic selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoCreateResponse {
    pub bank: BankResponse,
    /// Candidates in the order tried; the last one is `bank`
    pub attempts: Vec<CandidateAttempt>,
}
