//! Bundled bank adapters.

pub mod core;
#[cfg(feature = "http-probe")]
pub mod http_probe;
pub mod sandbox;

#[cfg(feature = "http-probe")]
pub use http_probe::HttpProbeBank;
pub use sandbox::SandboxBank;
