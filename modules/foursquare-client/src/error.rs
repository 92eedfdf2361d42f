use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacesError>;

/// Failures from the Foursquare place search call, classified by origin so
/// the boundary can map each kind to its own HTTP status.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// DNS, connection, or timeout failure before any response arrived.
    #[error("Could not connect to Foursquare API: {0}")]
    Unreachable(String),

    /// Upstream 4xx. `message` is the upstream body's `message` field when
    /// it decodes, otherwise a generic description.
    #[error("Foursquare API error ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Upstream 5xx. The status and body are logged where this is raised
    /// and never surfaced to callers.
    #[error("Foursquare API server error (status {status})")]
    Unavailable { status: u16 },

    /// No credential was configured; raised before any network activity.
    #[error("Foursquare API key is not configured")]
    MissingCredential,

    /// Anything unexpected while handling an otherwise successful call.
    #[error("Unexpected error calling Foursquare: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlacesError::Internal(err.to_string())
        } else {
            PlacesError::Unreachable(err.to_string())
        }
    }
}
