//! Domain models for gateway selection.

pub mod attempt;
pub mod bank_type;
pub mod money;

pub use attempt::{AttemptOutcome, AttemptStage, AutoConnectionReport, CandidateAttempt};
pub use bank_type::{BankType, Identifier};
pub use money::{Amount, Currency};
