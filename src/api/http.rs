// src/api/http.rs
use crate::api::{ApiError, DirectoryApi};
use crate::config::ApiConfig;
use crate::domain::{Category, Claim, ClaimRequest, Itinerary, Listing, ListingId, NewItinerary};
use crate::filters::store::join_query;
use crate::filters::FilterPredicate;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Blocking `reqwest` client for the directory REST API.
pub struct HttpDirectoryApi {
    client: Client,
    base_url: String,
}

impl HttpDirectoryApi {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        Url::parse(&cfg.base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", cfg.base_url)))?;

        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().map_err(network)?;
        decode(response)
    }

    fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().map_err(network)?;
        decode(response)
    }
}

impl DirectoryApi for HttpDirectoryApi {
    fn list_businesses(&self, filters: &FilterPredicate) -> Result<Vec<Listing>, ApiError> {
        let url = join_query(&self.endpoint("businesses"), &filters.to_query());
        self.get_json(&url)
    }

    fn get_business(&self, id: ListingId) -> Result<Listing, ApiError> {
        self.get_json(&self.endpoint(&format!("businesses/{id}")))
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(&self.endpoint("categories"))
    }

    fn list_itineraries(&self) -> Result<Vec<Itinerary>, ApiError> {
        self.get_json(&self.endpoint("itineraries"))
    }

    fn create_itinerary(&self, itinerary: &NewItinerary) -> Result<Itinerary, ApiError> {
        self.post_json(&self.endpoint("itineraries"), itinerary)
    }

    fn delete_itinerary(&self, id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("itineraries/{id}"));
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().map_err(network)?;
        check_status(response).map(|_| ())
    }

    fn create_claim(&self, claim: &ClaimRequest) -> Result<Claim, ApiError> {
        self.post_json(&self.endpoint("claims"), claim)
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(response)?
        .json::<T>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}
