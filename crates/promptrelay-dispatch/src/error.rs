//! Dispatch errors.

use promptrelay_cdp::CdpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Platform URL does not parse.
    #[error("Platform '{key}' has an invalid URL: {url}")]
    InvalidUrl { key: String, url: String },

    /// DOM-injection dispatch on a platform without an input selector.
    #[error("Platform '{0}' has no input selector configured")]
    MissingInputSelector(String),

    /// The target tab never settled on the destination path.
    #[error("Navigation to {0} did not complete in time")]
    NavigationTimeout(String),

    /// The injected routine returned something unexpected.
    #[error("Unexpected automation result: {0}")]
    UnexpectedResult(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Browser/CDP failure.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}
