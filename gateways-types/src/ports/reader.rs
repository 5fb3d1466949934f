//! Secret value reader port.
//!
//! Supplies merchant configuration and credentials. The factory holds exactly
//! one reader for its whole lifetime and never mutates it.

use crate::domain::{BankType, Currency, Identifier};
use crate::error::GatewayError;

use super::bank::BankSettings;

/// Configuration and credential provider, keyed by merchant identifier.
pub trait SecretValueReader: Send + Sync + 'static {
    /// Bank used when a caller does not pick one.
    fn default(&self, identifier: &Identifier) -> Result<BankType, GatewayError>;

    /// Candidates for automatic selection, highest priority first.
    fn get_bank_priorities(&self, identifier: &Identifier) -> Result<Vec<BankType>, GatewayError>;

    /// Currency the merchant prices its amounts in.
    fn currency(&self, identifier: &Identifier) -> Result<Currency, GatewayError>;

    /// Registry class name implementing `bank_type` for this merchant.
    fn klass(&self, bank_type: BankType, identifier: &Identifier) -> Result<String, GatewayError>;

    /// Settings handed to the bank constructor.
    fn read(&self, bank_type: BankType, identifier: &Identifier)
    -> Result<BankSettings, GatewayError>;
}
