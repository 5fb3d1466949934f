//! Bank class registry.
//!
//! Maps the class names a `SecretValueReader` hands out to bank constructors.
//! Populated once at startup; lookups never load code at runtime.

use std::collections::HashMap;
use std::fmt;

use gateways_types::{BankConstructor, GatewayError};

#[derive(Clone, Default)]
pub struct BankRegistry {
    constructors: HashMap<String, BankConstructor>,
}

impl BankRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the bundled adapters.
    pub fn with_builtin_banks() -> Self {
        gateways_adapters::builtin_banks().into_iter().collect()
    }

    /// Registers `constructor` under `class`, returning the one it replaced.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        constructor: BankConstructor,
    ) -> Option<BankConstructor> {
        self.constructors.insert(class.into(), constructor)
    }

    /// Looks up a constructor by class name.
    pub fn resolve(&self, class: &str) -> Result<BankConstructor, GatewayError> {
        self.constructors
            .get(class)
            .copied()
            .ok_or_else(|| GatewayError::BankClassNotFound(class.to_string()))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.constructors.contains_key(class)
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<C: Into<String>> FromIterator<(C, BankConstructor)> for BankRegistry {
    fn from_iter<I: IntoIterator<Item = (C, BankConstructor)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (class, constructor) in iter {
            registry.register(class, constructor);
        }
        registry
    }
}

impl fmt::Debug for BankRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankRegistry")
            .field("classes", &self.class_names())
            .finish()
    }
}
