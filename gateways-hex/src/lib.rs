//! # Gateways Hex
//!
//! Bank factory and HTTP adapter for the gateway selection service.
//!
//! ## Architecture
//!
//! - `registry/` - Bank class registry (class name -> constructor)
//! - `factory/` - Bank factory (explicit creation and priority fallback)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The factory is generic over `S: SecretValueReader`, allowing
//! different settings sources to be injected.

pub mod factory;
pub mod inbound;
pub mod registry;


pub use factory::BankFactory;
pub use registry::BankRegistry;
