//! Currency and amount types shared by every gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Currencies a merchant account or bank can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Iranian rial.
    #[default]
    IRR,
    /// Iranian toman (10 rials).
    IRT,
}

impl Currency {
    /// Number of rials in one unit of this currency.
    pub fn rials_per_unit(&self) -> i64 {
        match self {
            Currency::IRR => 1,
            Currency::IRT => 10,
        }
    }

    /// Returns the display suffix.
    pub fn label(&self) -> &'static str {
        match self {
            Currency::IRR => "rial",
            Currency::IRT => "toman",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IRR" => Ok(Currency::IRR),
            "IRT" => Ok(Currency::IRT),
            other => Err(DomainError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Non-negative amount tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    value: i64,
    currency: Currency,
}

impl Amount {
    /// Creates a new amount.
    pub fn new(value: i64, currency: Currency) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { value, currency })
    }

    /// Returns the raw value in `currency()` units.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Converts into another currency.
    ///
    /// Fails when the result would not be a whole number of target units,
    /// e.g. 15 IRR cannot be expressed in tomans.
    pub fn convert_to(&self, target: Currency) -> Result<Amount, DomainError> {
        if self.currency == target {
            return Ok(*self);
        }

        let rials = self
            .value
            .checked_mul(self.currency.rials_per_unit())
            .ok_or(DomainError::ConversionOverflow {
                value: self.value,
                from: self.currency,
                to: target,
            })?;
        let per_unit = target.rials_per_unit();
        if rials % per_unit != 0 {
            return Err(DomainError::InexactConversion {
                value: self.value,
                from: self.currency,
                to: target,
            });
        }

        Ok(Amount {
            value: rials / per_unit,
            currency: target,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency.label())
    }
}
