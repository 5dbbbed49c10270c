//! Error types for talking to the Sheets values endpoint.

use thiserror::Error;

/// Failures a caller may want to tell apart. Fetch functions return
/// `anyhow::Result`; these sit underneath and can be recovered with
/// `downcast_ref`.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The configured API base cannot carry path segments
    #[error("invalid API base '{base}': {message}")]
    InvalidUrl { base: String, message: String },

    /// Transport failure: DNS, connect, TLS, body read
    #[error("request for range '{range}' failed: {source}")]
    Http {
        range: String,
        source: reqwest::Error,
    },

    /// Non-success HTTP status, with the API's own message when it sent one
    #[error("Sheets API returned {status} for range '{range}': {message}")]
    Status {
        range: String,
        status: u16,
        message: String,
    },

    /// Body was not a values response
    #[error("could not decode values for range '{range}': {source}")]
    Decode {
        range: String,
        source: serde_json::Error,
    },
}
