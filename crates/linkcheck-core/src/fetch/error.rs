//! Fetch-layer error type, kept separate from anyhow so the validator can classify failures.

/// Failure of a single request to a hosting service, paste site, or API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, timeout, connection refused, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status where one was required.
    #[error("HTTP {0}")]
    Http(u32),
    /// Reply body was not the JSON we expected.
    #[error("invalid JSON reply: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }
}
