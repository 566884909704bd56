//! Bot test-result fetching and digests
//!
//! A fetcher is scoped to one bot integration. It pulls the integration's
//! test results through an [`IntegrationSource`] and exposes a stable
//! content digest over the fetched set for change detection between runs.

use crate::bot::{Bot, BotReference};
use crate::client::{IntegrationSource, XcodeServerClient};
use crate::error::{Error, Result};
use crate::logging::{Logger, TracingLogger};
use crate::test_results::TestResult;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Fetches test results for one bot integration and summarizes them
pub struct TestResultsFetcher {
    reference: BotReference,
    integration_id: String,
    source: Box<dyn IntegrationSource>,
    logger: Arc<dyn Logger>,
    results: Option<Vec<TestResult>>,
}

impl TestResultsFetcher {
    /// Create a fetcher scoped to a named server
    pub fn for_server(
        server_name: impl Into<String>,
        integration_id: impl Into<String>,
    ) -> Result<Self> {
        let server_name = server_name.into();
        let client = XcodeServerClient::new(&server_name)?;
        Self::with_source(
            BotReference::ByName(server_name),
            integration_id,
            Box::new(client),
        )
    }

    /// Create a fetcher scoped to an already-resolved bot handle
    pub fn for_bot(bot: Bot, integration_id: impl Into<String>) -> Result<Self> {
        let client = XcodeServerClient::new(&bot.server_name)?;
        Self::with_source(BotReference::ByHandle(bot), integration_id, Box::new(client))
    }

    /// Create a fetcher over an explicit integration source
    pub fn with_source(
        reference: BotReference,
        integration_id: impl Into<String>,
        source: Box<dyn IntegrationSource>,
    ) -> Result<Self> {
        let integration_id = integration_id.into();
        if integration_id.is_empty() {
            return Err(Error::InvalidArgument(
                "integration ID must not be empty".to_string(),
            ));
        }

        Ok(Self {
            reference,
            integration_id,
            source,
            logger: Arc::new(TracingLogger),
            results: None,
        })
    }

    /// Replace the default logger
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Hostname of the server the fetcher talks to
    pub fn server_name(&self) -> &str {
        self.reference.server_name()
    }

    /// The resolved bot handle, if the fetcher was created from one
    pub fn bot(&self) -> Option<&Bot> {
        self.reference.bot()
    }

    /// Integration this fetcher is scoped to
    pub fn integration_id(&self) -> &str {
        &self.integration_id
    }

    /// Fetch the integration's test results, returning the record count.
    ///
    /// Caches the parsed results for [`digest`](Self::digest). Returns 0
    /// when the integration exists but reported no results.
    pub async fn fetch_results(&mut self) -> Result<usize> {
        self.logger.debug(
            "fetch_results",
            &format!("fetching test results for integration {}", self.integration_id),
        );

        let payload = match self.source.test_results(&self.integration_id).await {
            Ok(payload) => payload,
            Err(err) => {
                self.logger
                    .error("fetch_results", &format!("fetch failed: {}", err));
                return Err(err);
            }
        };

        let results = TestResult::from_payload(&payload, false);
        let count = results.len();

        self.logger.info(
            "fetch_results",
            &format!("integration {} has {} test result(s)", self.integration_id, count),
        );

        self.results = Some(results);
        Ok(count)
    }

    /// Digest of the most recently fetched result set.
    ///
    /// `None` until a fetch has happened, or when the fetched set is empty.
    /// Identical result sets always produce identical digests.
    pub fn digest(&self) -> Option<String> {
        let results = self.results.as_ref()?;
        if results.is_empty() {
            return None;
        }

        // Results come out of parsing ordered by suite name, so hashing in
        // sequence is stable across payload key order.
        let mut hasher = Sha256::new();
        for result in results {
            hasher.update(result.name.as_bytes());
            hasher.update([0]);
            hasher.update(result.failed_count.to_be_bytes());
            for location in &result.locations {
                hasher.update(location.file_name.as_bytes());
                hasher.update([0]);
                hasher.update(location.line_number.to_be_bytes());
                hasher.update(location.message.as_bytes());
                hasher.update([0]);
            }
        }

        Some(hex::encode(hasher.finalize()))
    }
}
