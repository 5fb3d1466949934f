//! HTTP probe bank adapter.
//!
//! Checks a gateway by issuing a `GET` against a configured health URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use gateways_types::{
    Amount, Bank, BankSettings, BankType, Currency, GatewayError, Identifier, RequestContext,
};

use super::core::{BankCore, CoreOptions, parse_settings};

const DEFAULT_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpProbeSettings {
    merchant_code: String,
    gateway_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default)]
    native_currency: Option<Currency>,
    #[serde(default)]
    min_amount: Option<i64>,
    #[serde(default)]
    max_amount: Option<i64>,
    #[serde(default)]
    callback_path: Option<String>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Bank whose availability is a successful HTTP response from its gateway.
#[derive(Debug)]
pub struct HttpProbeBank {
    core: BankCore,
    merchant_code: String,
    gateway_url: reqwest::Url,
    http: reqwest::Client,
}

impl HttpProbeBank {
    /// Registry constructor.
    pub fn construct(
        bank_type: BankType,
        settings: BankSettings,
        identifier: Identifier,
    ) -> Result<Box<dyn Bank>, GatewayError> {
        let settings: HttpProbeSettings = parse_settings(bank_type, settings)?;

        let gateway_url = reqwest::Url::parse(&settings.gateway_url).map_err(|e| {
            GatewayError::InvalidBankSettings {
                bank_type,
                reason: format!("gateway_url: {}", e),
            }
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

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
            gateway_url,
            http,
        }))
    }

    fn unavailable(&self, reason: String) -> GatewayError {
        GatewayError::GatewayUnavailable {
            bank_type: self.core.bank_type(),
            reason,
        }
    }
}

#[async_trait]
impl Bank for HttpProbeBank {
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
        tracing::debug!(bank_type = %self.core.bank_type(), url = %self.gateway_url, "Probing gateway");

        let resp = self
            .http
            .get(self.gateway_url.clone())
            .send()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(self.unavailable(format!("HTTP {}", resp.status())));
        }

        tracing::debug!(merchant = %self.merchant_code, %amount, "Gateway probe succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn settings(value: serde_json::Value) -> BankSettings {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("settings must be an object"),
        }
    }

    /// Serves a single canned HTTP response and returns its URL.
    async fn one_shot_server(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                status_line
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/health", addr)
    }

    fn probe(url: &str) -> Box<dyn Bank> {
        HttpProbeBank::construct(
            BankType::MELLAT,
            settings(json!({ "merchant_code": "m-1", "gateway_url": url, "timeout_ms": 2000 })),
            Identifier::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_healthy_gateway_passes() {
        let url = one_shot_server("200 OK").await;
        assert!(probe(&url).check_gateway(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let url = one_shot_server("503 Service Unavailable").await;
        let result = probe(&url).check_gateway(None).await;
        assert!(matches!(
            result,
            Err(GatewayError::GatewayUnavailable { reason, .. }) if reason.contains("503")
        ));
    }

    #[tokio::test]
    async fn test_amount_rejected_before_probe() {
        // Nothing listens here; the amount check must fail first.
        let bank = probe("http://127.0.0.1:1/health");
        let amount = Amount::new(1, Currency::IRR).unwrap();
        assert!(matches!(
            bank.check_gateway(Some(amount)).await,
            Err(GatewayError::AmountNotSupported { .. })
        ));
    }

    #[test]
    fn test_bad_url_is_invalid_settings() {
        let result = HttpProbeBank::construct(
            BankType::MELLAT,
            settings(json!({ "merchant_code": "m-1", "gateway_url": "not a url" })),
            Identifier::default(),
        );
        assert!(matches!(
            result,
            Err(GatewayError::InvalidBankSettings { reason, .. }) if reason.starts_with("gateway_url")
        ));
    }
}
