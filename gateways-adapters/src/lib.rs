//! # Gateways Adapters
//!
//! Concrete adapters for the gateway factory's ports:
//! - `settings` - `SecretValueReader` backed by a JSON settings file
//! - `banks` - bundled `Bank` implementations (`sandbox`, `http-probe`)

use std::path::Path;

use gateways_types::BankConstructor;

pub mod banks;
pub mod settings;

pub use banks::SandboxBank;
#[cfg(feature = "http-probe")]
pub use banks::HttpProbeBank;
pub use settings::{GatewaySettings, SettingsReader};

/// Registry class name of [`SandboxBank`].
pub const SANDBOX_CLASS: &str = "sandbox";
/// Registry class name of [`HttpProbeBank`].
#[cfg(feature = "http-probe")]
pub const HTTP_PROBE_CLASS: &str = "http-probe";

/// Build a settings reader from a JSON file.
///
/// # Examples
///
/// ```ignore
/// let reader = build_reader("config/gateways.json")?;
/// ```
pub fn build_reader(path: impl AsRef<Path>) -> anyhow::Result<SettingsReader> {
    let reader = SettingsReader::from_file(path)?;
    tracing::info!(
        accounts = reader.identifiers().len(),
        "Gateway settings reader ready"
    );
    Ok(reader)
}

/// Constructors of the bundled banks, keyed by registry class name.
pub fn builtin_banks() -> Vec<(&'static str, BankConstructor)> {
    #[allow(unused_mut)]
    let mut banks: Vec<(&'static str, BankConstructor)> =
        vec![(SANDBOX_CLASS, SandboxBank::construct as BankConstructor)];

    #[cfg(feature = "http-probe")]
    banks.push((HTTP_PROBE_CLASS, HttpProbeBank::construct as BankConstructor));

    banks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_banks_registered_by_class() {
        let names: Vec<&str> = builtin_banks().into_iter().map(|(name, _)| name).collect();
        assert!(names.contains(&SANDBOX_CLASS));
        #[cfg(feature = "http-probe")]
        assert!(names.contains(&HTTP_PROBE_CLASS));
    }
}
