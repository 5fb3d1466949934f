//! Bank Factory
//!
//! Turns merchant configuration into ready-to-use bank instances.
//! Contains NO gateway protocol logic - only resolution and fallback.

use gateways_types::{
    Amount, AttemptStage, AutoConnectionReport, Bank, BankConstructor, BankSettings, BankType,
    CandidateAttempt, GatewayError, Identifier, RequestContext, SecretValueReader,
};

use crate::registry::BankRegistry;

/// Builds banks for inbound requests.
///
/// Generic over `S: SecretValueReader` - the settings source is injected at compile time.
/// The reader and registry are read-only after construction; every call
/// builds a fresh bank that the caller owns.
pub struct BankFactory<S: SecretValueReader> {
    reader: S,
    registry: BankRegistry,
}

impl<S: SecretValueReader> BankFactory<S> {
    /// Creates a factory over the given reader and registry.
    pub fn new(reader: S, registry: BankRegistry) -> Self {
        tracing::debug!("Create bank factory");
        Self { reader, registry }
    }

    /// Returns a reference to the underlying reader.
    pub fn reader(&self) -> &S {
        &self.reader
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Explicit creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds the bank for `bank_type`, or the merchant's default bank.
    ///
    /// The bank gets the merchant currency and the request bound before it
    /// is returned. Resolution and construction errors are returned as-is.
    #[tracing::instrument(skip(self, request), fields(identifier = %identifier))]
    pub fn create(
        &self,
        request: &dyn RequestContext,
        bank_type: Option<BankType>,
        identifier: &Identifier,
    ) -> Result<Box<dyn Bank>, GatewayError> {
        let bank_type = match bank_type {
            Some(bank_type) => bank_type,
            None => self.reader.default(identifier)?,
        };
        tracing::debug!(%bank_type, "Request create bank");

        let (constructor, settings) = self.import_bank(bank_type, identifier)?;
        self.instantiate(request, constructor, settings, bank_type, identifier)
    }

    /// Resolves the constructor and settings of a bank.
    fn import_bank(
        &self,
        bank_type: BankType,
        identifier: &Identifier,
    ) -> Result<(BankConstructor, BankSettings), GatewayError> {
        let class = self.reader.klass(bank_type, identifier)?;
        let constructor = self.registry.resolve(&class)?;
        tracing::debug!(%class, "Import bank class");

        let settings = self.reader.read(bank_type, identifier)?;
        Ok((constructor, settings))
    }

    fn instantiate(
        &self,
        request: &dyn RequestContext,
        constructor: BankConstructor,
        settings: BankSettings,
        bank_type: BankType,
        identifier: &Identifier,
    ) -> Result<Box<dyn Bank>, GatewayError> {
        let mut bank = constructor(bank_type, settings, identifier.clone())?;
        bank.set_currency(self.reader.currency(identifier)?);
        bank.set_request(request);

        tracing::debug!(%bank_type, "Create bank");
        Ok(bank)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Automatic selection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the first bank, by priority, that builds and passes its gateway check.
    ///
    /// Fails with [`GatewayError::AutoConnectionFailed`] when no candidate
    /// connects; individual candidate errors only appear in its report.
    pub async fn auto_create(
        &self,
        request: &dyn RequestContext,
        identifier: &Identifier,
        amount: Option<Amount>,
    ) -> Result<Box<dyn Bank>, GatewayError> {
        self.auto_create_with_report(request, identifier, amount)
            .await
            .map(|(bank, _attempts)| bank)
    }

    /// Like [`auto_create`](Self::auto_create), also returning every
    /// candidate tried, ending with the connected one.
    #[tracing::instrument(skip(self, request), fields(identifier = %identifier))]
    pub async fn auto_create_with_report(
        &self,
        request: &dyn RequestContext,
        identifier: &Identifier,
        amount: Option<Amount>,
    ) -> Result<(Box<dyn Bank>, Vec<CandidateAttempt>), GatewayError> {
        tracing::debug!("Request create bank automatically");
        let candidates = self.reader.get_bank_priorities(identifier)?;

        let mut report = AutoConnectionReport::new(identifier.clone());
        for bank_type in candidates {
            match self
                .try_candidate(request, bank_type, identifier, amount)
                .await
            {
                Ok(bank) => {
                    tracing::info!(%bank_type, skipped = report.attempts.len(), "Bank gateway connected");
                    report.push(CandidateAttempt::connected(bank_type));
                    return Ok((bank, report.attempts));
                }
                Err(attempt) => {
                    tracing::debug!(%bank_type, outcome = ?attempt.outcome, "Bank gateway failed");
                    tracing::debug!("Try to connect another bank...");
                    report.push(attempt);
                }
            }
        }

        tracing::warn!(%report, "Bank gateway auto connection failed");
        Err(GatewayError::AutoConnectionFailed(report))
    }

    async fn try_candidate(
        &self,
        request: &dyn RequestContext,
        bank_type: BankType,
        identifier: &Identifier,
        amount: Option<Amount>,
    ) -> Result<Box<dyn Bank>, CandidateAttempt> {
        let (constructor, settings) = self
            .import_bank(bank_type, identifier)
            .map_err(|e| CandidateAttempt::failed(bank_type, AttemptStage::Resolve, e.to_string()))?;

        let bank = self
            .instantiate(request, constructor, settings, bank_type, identifier)
            .map_err(|e| {
                CandidateAttempt::failed(bank_type, AttemptStage::Construct, e.to_string())
            })?;

        bank.check_gateway(amount).await.map_err(|e| {
            CandidateAttempt::failed(bank_type, AttemptStage::CheckGateway, e.to_string())
        })?;

        Ok(bank)
    }
}
