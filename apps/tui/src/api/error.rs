use thiserror::Error;

/// Every way a backend call can fail. Orchestrators treat all variants alike.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse response from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("cannot build a URL from '{path}': {reason}")]
    InvalidUrl { path: String, reason: String },
}

impl RequestError {
    /// HTTP status for `Status` failures.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Status { .. } => "status",
            Self::Parse { .. } => "parse",
            Self::InvalidUrl { .. } => "url",
        }
    }
}
