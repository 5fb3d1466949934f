//! Error types for bank gateway selection.

use crate::domain::{Amount, AutoConnectionReport, BankType, Currency, Identifier};

/// Domain-level errors (invalid values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Unknown bank type: {0}")]
    UnknownBankType(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Cannot convert {value} {from} to whole {to}")]
    InexactConversion {
        value: i64,
        from: Currency,
        to: Currency,
    },

    #[error("Converting {value} {from} to {to} overflows")]
    ConversionOverflow {
        value: i64,
        from: Currency,
        to: Currency,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while resolving, building or checking a bank.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No gateway account configured for identifier {0}")]
    UnknownIdentifier(Identifier),

    #[error("Bank {bank_type} is not configured for identifier {identifier}")]
    BankNotConfigured {
        bank_type: BankType,
        identifier: Identifier,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bank class not found: {0}")]
    BankClassNotFound(String),

    #[error("Invalid settings for {bank_type}: {reason}")]
    InvalidBankSettings { bank_type: BankType, reason: String },

    #[error("{bank_type} does not accept {amount}: allowed range is {min}..={max}")]
    AmountNotSupported {
        bank_type: BankType,
        amount: Amount,
        min: i64,
        max: i64,
    },

    #[error("Gateway {bank_type} is unavailable: {reason}")]
    GatewayUnavailable { bank_type: BankType, reason: String },

    #[error("Bank gateway auto connection failed: {0}")]
    AutoConnectionFailed(AutoConnectionReport),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No gateway available: {0}")]
    Unavailable(AutoConnectionReport),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::AutoConnectionFailed(report) => AppError::Unavailable(report),
            GatewayError::Domain(e) => AppError::BadRequest(e.to_string()),
            e @ (GatewayError::UnknownIdentifier(_)
            | GatewayError::BankNotConfigured { .. }
            | GatewayError::AmountNotSupported { .. }) => AppError::BadRequest(e.to_string()),
            e @ (GatewayError::Configuration(_)
            | GatewayError::BankClassNotFound(_)
            | GatewayError::InvalidBankSettings { .. }
            | GatewayError::GatewayUnavailable { .. }) => AppError::Internal(e.to_string()),
        }
    }
}
