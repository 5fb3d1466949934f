//! Sandbox bank adapter.
//!
//! Never talks to a network. Availability is a settings flag, which makes it
//! useful for local development and for exercising priority fallbacks.

use async_trait::async_trait;
use serde::Deserialize;

use gateways_types::{
    Amount, Bank, BankSettings, BankType, Currency, GatewayError, Identifier, RequestContext,
};

use super::core::{BankCore, CoreOptions, parse_settings};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SandboxSettings {
    merchant_code: String,
    #[serde(default = "available_by_default")]
    available: bool,
    #[serde(default)]
    native_currency: Option<Currency>,
    #[serde(default)]
    min_amount: Option<i64>,
    #[serde(default)]
    max_amount: Option<i64>,
    #[serde(default)]
    callback_path: Option<String>,
}

fn available_by_default() -> bool {
    true
}

/// Offline bank whose gateway check only validates the amount.
#[derive(Debug)]
pub struct SandboxBank {
    core: BankCore,
    merchant_code: String,
    available: bool,
}

impl SandboxBank {
    /// Registry constructor.
    pub fn construct(
        bank_type: BankType,
        settings: BankSettings,
        identifier: Identifier,
    ) -> Result<Box<dyn Bank>, GatewayError> {
        let settings: SandboxSettings = parse_settings(bank_type, settings)?;
        let core = BankCore::new(
            bank_type,
            identifier,
            CoreOptions {
                native_currency: settings.native_currency,
                min_amount: settings.min_amount,
                max_amount: settings.max_amount,
                callback_path: settings.callback_path,
            },
        )?;

        Ok(Box::new(Self {
            core,
            merchant_code: settings.merchant_code,
            available: settings.available,
        }))
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }
}

#[async_trait]
impl Bank for SandboxBank {
    fn bank_type(&self) -> BankType {
        self.core.bank_type()
    }

    fn identifier(&self) -> &Identifier {
        self.core.identifier()
    }

    fn currency(&self) -> Currency {
        self.core.currency()
    }

    fn set_currency(&mut self, currency: Currency) {
        self.core.set_currency(currency);
    }

    fn set_request(&mut self, request: &dyn RequestContext) {
        self.core.set_request(request);
    }

    fn callback_url(&self) -> Option<&str> {
        self.core.callback_url()
    }

    async fn check_gateway(&self, amount: Option<Amount>) -> Result<(), GatewayError> {
        let amount = self.core.gateway_amount(amount)?;
        if !self.available {
            return Err(GatewayError::GatewayUnavailable {
                bank_type: self.core.bank_type(),
                reason: "sandbox gateway switched off".into(),
            });
        }

        tracing::debug!(
            bank_type = %self.core.bank_type(),
            merchant = %self.merchant_code,
            %amount,
            "Sandbox gateway accepted check"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: serde_json::Value) -> BankSettings {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("settings must be an object"),
        }
    }

    #[tokio::test]
    async fn test_available_sandbox_passes_check() {
        let bank = SandboxBank::construct(
            BankType::ZARINPAL,
            settings(json!({ "merchant_code": "zp-1" })),
            Identifier::default(),
        )
        .unwrap();

        assert_eq!(bank.bank_type(), BankType::ZARINPAL);
        assert!(bank.check_gateway(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_switched_off_sandbox_is_unavailable() {
        let bank = SandboxBank::construct(
            BankType::IDPAY,
            settings(json!({ "merchant_code": "id-1", "available": false })),
            Identifier::default(),
        )
        .unwrap();

        let result = bank.check_gateway(None).await;
        assert!(matches!(
            result,
            Err(GatewayError::GatewayUnavailable {
                bank_type: BankType::IDPAY,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_amount_checked_in_merchant_currency() {
        let mut bank = SandboxBank::construct(
            BankType::SEP,
            settings(json!({ "merchant_code": "sep", "max_amount": 20000 })),
            Identifier::default(),
        )
        .unwrap();
        bank.set_currency(Currency::IRT);

        let ok = Amount::new(2000, bank.currency()).unwrap();
        assert!(bank.check_gateway(Some(ok)).await.is_ok());

        let too_much = Amount::new(2001, bank.currency()).unwrap();
        assert!(matches!(
            bank.check_gateway(Some(too_much)).await,
            Err(GatewayError::AmountNotSupported { .. })
        ));
    }

    #[test]
    fn test_missing_merchant_code_is_invalid() {
        let result =
            SandboxBank::construct(BankType::BMI, BankSettings::new(), Identifier::default());
        assert!(matches!(
            result,
            Err(GatewayError::InvalidBankSettings {
                bank_type: BankType::BMI,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_setting_is_invalid() {
        let result = SandboxBank::construct(
            BankType::BMI,
            settings(json!({ "merchant_code": "bmi", "terminal_id": "x" })),
            Identifier::default(),
        );
        assert!(matches!(result, Err(GatewayError::InvalidBankSettings { reason, .. }) if reason.contains("terminal_id")));
    }
}
