//! Settings-file secret value reader.
//!
//! Reads merchant accounts from a JSON document of the form:
//!
//! ```json
//! {
//!   "accounts": {
//!     "1": {
//!       "default": "ZARINPAL",
//!       "currency": "IRR",
//!       "bank_priorities": ["ZARINPAL", "IDPAY"],
//!       "banks": {
//!         "ZARINPAL": { "class": "sandbox", "settings": { "merchant_code": "abc" } },
//!         "IDPAY": { "settings": { "merchant_code": "def" } }
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use gateways_types::{
    BankSettings, BankType, Currency, GatewayError, Identifier, SecretValueReader,
};

// ─────────────────────────────────────────────────────────────────────────────
// Document model
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySettings {
    #[serde(default)]
    pub accounts: BTreeMap<Identifier, AccountSettings>,
}

/// One merchant account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSettings {
    #[serde(default)]
    pub default: Option<BankType>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub bank_priorities: Option<Vec<BankType>>,
    #[serde(default)]
    pub banks: BTreeMap<BankType, BankEntry>,
}

/// Settings of one bank within an account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BankEntry {
    /// Registry class; the bank type's lower-case name when omitted
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub settings: BankSettings,
}

impl AccountSettings {
    fn resolved_default(&self) -> Option<BankType> {
        self.default.or_else(|| {
            self.bank_priorities
                .as_ref()
                .and_then(|list| list.first().copied())
        })
    }

    fn validate(&self, identifier: &Identifier) -> Result<(), GatewayError> {
        let default = self.resolved_default().ok_or_else(|| {
            GatewayError::Configuration(format!(
                "account {} has neither a default bank nor bank priorities",
                identifier
            ))
        })?;

        let priorities = self.bank_priorities.iter().flatten();
        for bank_type in std::iter::once(&default).chain(priorities) {
            if !self.banks.contains_key(bank_type) {
                return Err(GatewayError::Configuration(format!(
                    "account {} references {} but has no settings for it",
                    identifier, bank_type
                )));
            }
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reader
// ─────────────────────────────────────────────────────────────────────────────

/// `SecretValueReader` backed by a validated [`GatewaySettings`] document.
#[derive(Debug, Clone)]
pub struct SettingsReader {
    settings: GatewaySettings,
}

impl SettingsReader {
    /// Validates the document and wraps it.
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        for (identifier, account) in &settings.accounts {
            account.validate(identifier)?;
        }
        Ok(Self { settings })
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, GatewayError> {
        let settings: GatewaySettings = serde_json::from_str(json)
            .map_err(|e| GatewayError::Configuration(format!("invalid settings: {}", e)))?;
        Self::new(settings)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "Loaded gateway settings");
        Self::from_json_str(&json)
    }

    /// Configured identifiers, sorted.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.settings.accounts.keys().cloned().collect()
    }

    fn account(&self, identifier: &Identifier) -> Result<&AccountSettings, GatewayError> {
        self.settings
            .accounts
            .get(identifier)
            .ok_or_else(|| GatewayError::UnknownIdentifier(identifier.clone()))
    }

    fn bank(&self, bank_type: BankType, identifier: &Identifier) -> Result<&BankEntry, GatewayError> {
        self.account(identifier)?
            .banks
            .get(&bank_type)
            .ok_or_else(|| GatewayError::BankNotConfigured {
                bank_type,
                identifier: identifier.clone(),
            })
    }
}

impl SecretValueReader for SettingsReader {
    fn default(&self, identifier: &Identifier) -> Result<BankType, GatewayError> {
        let account = self.account(identifier)?;
        account.resolved_default().ok_or_else(|| {
            GatewayError::Configuration(format!("no default bank for identifier {}", identifier))
        })
    }

    fn get_bank_priorities(&self, identifier: &Identifier) -> Result<Vec<BankType>, GatewayError> {
        let account = self.account(identifier)?;
        match &account.bank_priorities {
            Some(list) => Ok(list.clone()),
            None => Ok(account.resolved_default().into_iter().collect()),
        }
    }

    fn currency(&self, identifier: &Identifier) -> Result<Currency, GatewayError> {
        Ok(self.account(identifier)?.currency)
    }

    fn klass(&self, bank_type: BankType, identifier: &Identifier) -> Result<String, GatewayError> {
        let entry = self.bank(bank_type, identifier)?;
        Ok(entry
            .class
            .clone()
            .unwrap_or_else(|| bank_type.default_class()))
    }

    fn read(
        &self,
        bank_type: BankType,
        identifier: &Identifier,
    ) -> Result<BankSettings, GatewayError> {
        Ok(self.bank(bank_type, identifier)?.settings.clone())
    }
}
