pub mod error;
pub mod params;

pub use error::{PlacesError, Result};
pub use params::{ParamsError, PlaceSearchParams, SortOrder};

use serde_json::Value;
use tracing::{debug, warn};

const BASE_URL: &str = "https://api.foursquare.com/v3/places/search";

pub struct FoursquareClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl FoursquareClient {
    /// The credential is optional here so that a missing key becomes a
    /// per-call `MissingCredential` failure instead of a boot failure.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Search places with a validated parameter record. Exactly the present
    /// fields are sent as query parameters. One attempt, no retries.
    pub async fn search(&self, params: &PlaceSearchParams) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PlacesError::MissingCredential)?;

        debug!(?params, "Foursquare place search");

        let resp = self
            .client
            .get(&self.base_url)
            .header("accept", "application/json")
            .header("Authorization", api_key)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Foursquare API server error");
            return Err(PlacesError::Unavailable {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| "Invalid request parameters.".to_string());
            return Err(PlacesError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| PlacesError::Internal(format!("invalid JSON from Foursquare: {e}")))
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}
