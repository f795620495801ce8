use thiserror::Error;

/// Top-level error type for the `sickui-registry` crate.
///
/// Every registry call is a single attempt: there is no retry layer, so
/// callers see the first failure as-is. `sickui-core` maps these into its
/// own error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Availability ────────────────────────────────────────────────
    /// The registry answered with a non-success status.
    #[error("Registry unavailable at {url}: HTTP {status}")]
    Unavailable { url: String, status: u16 },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL construction failed (bad base URL or component name).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// The payload was not valid JSON or did not match the item schema.
    #[error("Registry payload from {url} does not match the expected schema: {message}")]
    SchemaMismatch { url: String, message: String },
}

impl Error {
    /// Returns `true` if the registry could not be reached or refused the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::Transport(_) | Self::InvalidUrl(_)
        )
    }

    /// Returns `true` if the registry answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Unavailable { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
