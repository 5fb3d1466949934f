//! Bank port.
//!
//! A bank is a single payment-gateway integration. Instances are built per
//! request by the factory and dropped once the request is handled.

use crate::domain::{Amount, BankType, Currency, Identifier};
use crate::error::GatewayError;

/// Raw per-bank settings, passed verbatim to the constructor.
pub type BankSettings = serde_json::Map<String, serde_json::Value>;

/// Builds a bank from its settings. Registered by class name at startup.
pub type BankConstructor =
    fn(BankType, BankSettings, Identifier) -> Result<Box<dyn Bank>, GatewayError>;

/// The inbound request a bank is created for.
pub trait RequestContext: Send + Sync {
    /// Turns a path into an absolute URI on the host that served the request.
    fn build_absolute_uri(&self, location: &str) -> String;
}

#[async_trait::async_trait]
pub trait Bank: Send + Sync {
    fn bank_type(&self) -> BankType;

    fn identifier(&self) -> &Identifier;

    /// Currency amounts passed to this bank are expressed in.
    fn currency(&self) -> Currency;

    fn set_currency(&mut self, currency: Currency);

    /// Binds the bank to the request it serves (callback URLs etc.).
    fn set_request(&mut self, request: &dyn RequestContext);

    /// Callback URL derived from the bound request, if any.
    fn callback_url(&self) -> Option<&str>;

    /// Verifies the gateway can take a payment of `amount` right now.
    ///
    /// `None` checks with the smallest amount the bank accepts.
    async fn check_gateway(&self, amount: Option<Amount>) -> Result<(), GatewayError>;
}
