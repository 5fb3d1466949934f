//! # Gateways Types
//!
//! Domain types and port traits for bank gateway selection.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (BankType, Identifier, Amount, attempts)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Amount, AttemptOutcome, AttemptStage, AutoConnectionReport, BankType, CandidateAttempt,
    Currency, Identifier,
};
pub use dto::*;
pub use error::{AppError, DomainError, GatewayError};
pub use ports::{Bank, BankConstructor, BankSettings, RequestContext, SecretValueReader};
