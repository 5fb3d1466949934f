//! Bank type and merchant identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Payment gateways known to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BankType {
    BMI,
    SEP,
    ZARINPAL,
    IDPAY,
    ZIBAL,
    BAHAMTA,
    MELLAT,
    PAYV1,
    ASANPARDAKHT,
}

impl BankType {
    pub const ALL: [BankType; 9] = [
        BankType::BMI,
        BankType::SEP,
        BankType::ZARINPAL,
        BankType::IDPAY,
        BankType::ZIBAL,
        BankType::BAHAMTA,
        BankType::MELLAT,
        BankType::PAYV1,
        BankType::ASANPARDAKHT,
    ];

    /// Upper-case wire name, e.g. `"ZARINPAL"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BankType::BMI => "BMI",
            BankType::SEP => "SEP",
            BankType::ZARINPAL => "ZARINPAL",
            BankType::IDPAY => "IDPAY",
            BankType::ZIBAL => "ZIBAL",
            BankType::BAHAMTA => "BAHAMTA",
            BankType::MELLAT => "MELLAT",
            BankType::PAYV1 => "PAYV1",
            BankType::ASANPARDAKHT => "ASANPARDAKHT",
        }
    }

    /// Class name used when the settings don't name one explicitly.
    pub fn default_class(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for BankType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BankType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        BankType::ALL
            .into_iter()
            .find(|bank| bank.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownBankType(s.to_string()))
    }
}

/// Key of a configured merchant account.
///
/// Several accounts may use the same gateway; the identifier picks which
/// credentials and priorities apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Creates an identifier, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Identifier cannot be empty".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self("1".to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_type_parse_is_case_insensitive() {
        assert_eq!("zarinpal".parse::<BankType>().unwrap(), BankType::ZARINPAL);
        assert_eq!(" IDPAY ".parse::<BankType>().unwrap(), BankType::IDPAY);
    }

    #[test]
    fn test_unknown_bank_type() {
        let result = "PAYPAL".parse::<BankType>();
        assert!(matches!(result, Err(DomainError::UnknownBankType(name)) if name == "PAYPAL"));
    }

    #[test]
    fn test_bank_type_serde_uses_upper_case() {
        let json = serde_json::to_string(&BankType::ASANPARDAKHT).unwrap();
        assert_eq!(json, "\"ASANPARDAKHT\"");
        assert_eq!(BankType::MELLAT.default_class(), "mellat");
    }

    #[test]
    fn test_default_identifier() {
        assert_eq!(Identifier::default().as_str(), "1");
    }

    #[test]
    fn test_blank_identifier_rejected() {
        assert!(Identifier::new("  ").is_err());
        assert!(serde_json::from_str::<Identifier>("\"\"").is_err());
        let id: Identifier = serde_json::from_str("\"shop-2\"").unwrap();
        assert_eq!(id.as_str(), "shop-2");
    }
}
