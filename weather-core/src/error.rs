use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request against the weather provider.
///
/// `Network` means the provider could not be reached or the exchange did not
/// complete. `Status` and `MalformedBody` mean the provider answered, but not
/// with something usable; together they form the provider-error category.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error while calling {endpoint}: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider rejected {endpoint} request with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("provider returned an unreadable {endpoint} body: {source}")]
    MalformedBody {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Network { .. })
    }

    pub fn is_provider_error(&self) -> bool {
        !self.is_network_error()
    }

    /// HTTP status of a rejected request, if the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
