//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The factory depends on these traits, not concrete implementations.

mod bank;
mod reader;

pub use bank::{Bank, BankConstructor, BankSettings, RequestContext};
pub use reader::SecretValueReader;
