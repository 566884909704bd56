//! Xcsbot Core - Xcode Server bot test-result client
//!
//! This crate provides the types for reading test results off an Xcode
//! Server instance:
//! - Bot references and handles
//! - Test-result model and payload parsing
//! - Result fetching and content digests
//! - Logging facade

pub mod bot;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod test_results;

pub use bot::{Bot, BotReference};
pub use client::{IntegrationSource, XcodeServerClient};
pub use error::{Error, Result};
pub use fetcher::TestResultsFetcher;
pub use logging::{init_logging, Logger, TracingLogger};
pub use test_results::{FailedTestLocation, TestResult, TestResultsPayload};
