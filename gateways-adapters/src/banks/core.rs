//! State and amount rules shared by the bundled bank adapters.

use serde::de::DeserializeOwned;

use gateways_types::{
    Amount, BankSettings, BankType, Currency, GatewayError, Identifier, RequestContext,
};

pub const DEFAULT_CALLBACK_PATH: &str = "/bankgateways/callback/";
/// Smallest payment most Iranian gateways accept, in rials.
pub const DEFAULT_MIN_AMOUNT: i64 = 1_000;
pub const DEFAULT_MAX_AMOUNT: i64 = 500_000_000;

/// Optional limits an adapter's settings may override.
#[derive(Debug, Clone, Default)]
pub struct CoreOptions {
    pub native_currency: Option<Currency>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub callback_path: Option<String>,
}

/// Fields every bundled adapter carries.
#[derive(Debug, Clone)]
pub struct BankCore {
    bank_type: BankType,
    identifier: Identifier,
    currency: Currency,
    native_currency: Currency,
    min_amount: i64,
    max_amount: i64,
    callback_path: String,
    callback_url: Option<String>,
}

impl BankCore {
    pub fn new(
        bank_type: BankType,
        identifier: Identifier,
        options: CoreOptions,
    ) -> Result<Self, GatewayError> {
        let min_amount = options.min_amount.unwrap_or(DEFAULT_MIN_AMOUNT);
        let max_amount = options.max_amount.unwrap_or(DEFAULT_MAX_AMOUNT);
        if min_amount < 0 || min_amount > max_amount {
            return Err(GatewayError::InvalidBankSettings {
                bank_type,
                reason: format!(
                    "min_amount {} and max_amount {} do not form a range",
                    min_amount, max_amount
                ),
            });
        }

        Ok(Self {
            bank_type,
            identifier,
            currency: Currency::default(),
            native_currency: options.native_currency.unwrap_or_default(),
            min_amount,
            max_amount,
            callback_path: options
                .callback_path
                .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string()),
            callback_url: None,
        })
    }

    pub fn bank_type(&self) -> BankType {
        self.bank_type
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_request(&mut self, request: &dyn RequestContext) {
        self.callback_url = Some(request.build_absolute_uri(&self.callback_path));
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Converts `amount` into the bank's native currency and checks its limits.
    ///
    /// `None` yields the minimum amount.
    pub fn gateway_amount(&self, amount: Option<Amount>) -> Result<Amount, GatewayError> {
        let Some(amount) = amount else {
            return Ok(Amount::new(self.min_amount, self.native_currency)?);
        };

        let native = amount.convert_to(self.native_currency)?;
        if native.value() < self.min_amount || native.value() > self.max_amount {
            return Err(GatewayError::AmountNotSupported {
                bank_type: self.bank_type,
                amount: native,
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        Ok(native)
    }
}

/// Deserializes adapter settings, reporting mismatches against the bank type.
pub fn parse_settings<T: DeserializeOwned>(
    bank_type: BankType,
    settings: BankSettings,
) -> Result<T, GatewayError> {
    serde_json::from_value(serde_json::Value::Object(settings)).map_err(|e| {
        GatewayError::InvalidBankSettings {
            bank_type,
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host(&'static str);

    impl RequestContext for Host {
        fn build_absolute_uri(&self, location: &str) -> String {
            format!("https://{}{}", self.0, location)
        }
    }

    fn core(options: CoreOptions) -> BankCore {
        BankCore::new(BankType::ZIBAL, Identifier::default(), options).unwrap()
    }

    #[test]
    fn test_defaults() {
        let core = core(CoreOptions::default());
        assert_eq!(core.currency(), Currency::IRR);
        assert_eq!(core.callback_url(), None);

        let amount = core.gateway_amount(None).unwrap();
        assert_eq!(amount.value(), DEFAULT_MIN_AMOUNT);
        assert_eq!(amount.currency(), Currency::IRR);
    }

    #[test]
    fn test_callback_url_uses_request_host() {
        let mut core = core(CoreOptions {
            callback_path: Some("/pay/back/".into()),
            ..Default::default()
        });
        core.set_request(&Host("shop.example"));
        assert_eq!(core.callback_url(), Some("https://shop.example/pay/back/"));
    }

    #[test]
    fn test_amount_converted_to_native_currency() {
        let core = core(CoreOptions::default());
        let tomans = Amount::new(500, Currency::IRT).unwrap();
        let native = core.gateway_amount(Some(tomans)).unwrap();
        assert_eq!(native.value(), 5000);
        assert_eq!(native.currency(), Currency::IRR);
    }

    #[test]
    fn test_amount_below_minimum_rejected() {
        let core = core(CoreOptions::default());
        let result = core.gateway_amount(Some(Amount::new(99, Currency::IRT).unwrap()));
        assert!(matches!(
            result,
            Err(GatewayError::AmountNotSupported { min: 1000, .. })
        ));
    }

    #[test]
    fn test_amount_above_maximum_rejected() {
        let core = core(CoreOptions {
            max_amount: Some(10_000),
            ..Default::default()
        });
        let result = core.gateway_amount(Some(Amount::new(10_001, Currency::IRR).unwrap()));
        assert!(matches!(result, Err(GatewayError::AmountNotSupported { .. })));
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let result = BankCore::new(
            BankType::ZIBAL,
            Identifier::default(),
            CoreOptions {
                min_amount: Some(5_000),
                max_amount: Some(10),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(GatewayError::InvalidBankSettings { .. })));
    }
}
