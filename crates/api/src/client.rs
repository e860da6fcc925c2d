// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client for the capacity service REST endpoints.

use crate::error::ClientError;
use crate::request_response::{
    APPOINTMENT_SLOTS_PATH, AppointmentSlotsResponse, CAPACITY_STREAMS_PATH,
    CapacityStreamResponse, DATE_RANGES_PATH, DELETE_PATH, DateRangeListResponse,
    DeleteCapacityResponse, HIERARCHY_PATH, HierarchyResponse, TABLE_DATA_PATH,
    TableDataResponse, UPDATE_PATH, UpdateCapacityRequest, UpdateCapacityResponse,
};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the service base URL.
pub const BASE_URL_ENV: &str = "CAPACITY_API_BASE_URL";

/// Environment variable holding the submitting username.
pub const USERNAME_ENV: &str = "CAPACITY_USERNAME";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Username used when none is configured.
pub const DEFAULT_USERNAME: &str = "capacity-planner";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the capacity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are joined onto.
    pub base_url: String,
    /// Username sent with update requests.
    pub username: String,
}

impl ClientConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(base_url: &str, username: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: username.to_string(),
        }
    }

    /// Reads the configuration from the environment, with defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url: String =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));
        let username: String =
            std::env::var(USERNAME_ENV).unwrap_or_else(|_| String::from(DEFAULT_USERNAME));
        Self { base_url, username }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USERNAME)
    }
}

/// The capacity service endpoints.
///
/// Each method returns the decoded response, including its status envelope.
/// Business failures are reported in the envelope, not as errors.
#[async_trait]
pub trait CapacityService: Send + Sync {
    /// Fetches the State → Market → Territory hierarchy.
    async fn get_hierarchy(&self) -> Result<HierarchyResponse, ClientError>;

    /// Fetches the capacity stream catalog.
    async fn get_capacity_streams(&self) -> Result<CapacityStreamResponse, ClientError>;

    /// Fetches the appointment slot catalog.
    async fn get_appointment_slots(&self) -> Result<AppointmentSlotsResponse, ClientError>;

    /// Fetches the calendarizations of a territory.
    async fn get_date_ranges(&self, territory_id: i64)
    -> Result<DateRangeListResponse, ClientError>;

    /// Fetches stored table data for a territory and calendarization.
    async fn get_table_data(
        &self,
        territory_id: i64,
        cust_date_id: Option<i64>,
    ) -> Result<TableDataResponse, ClientError>;

    /// Submits capacity changes.
    async fn update_capacity(
        &self,
        request: &UpdateCapacityRequest,
    ) -> Result<UpdateCapacityResponse, ClientError>;

    /// Deletes a calendarization.
    async fn delete_capacity(&self, cust_date_id: i64)
    -> Result<DeleteCapacityResponse, ClientError>;
}

/// `reqwest`-backed implementation of [`CapacityService`].
#[derive(Debug, Clone)]
pub struct HttpCapacityClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCapacityClient {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let normalized: String = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url: Url = Url::parse(&normalized).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url: Url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            warn!(endpoint = path, status = status.as_u16(), "Capacity service returned error status");
            return Err(ClientError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|e| ClientError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url: Url = self.endpoint(path, query)?;
        debug!(%url, "GET");
        let response: reqwest::Response =
            self.http
                .get(url)
                .send()
                .await
                .map_err(|source| ClientError::Transport {
                    endpoint: path.to_string(),
                    source,
                })?;
        Self::decode(path, response).await
    }
}

#[async_trait]
impl CapacityService for HttpCapacityClient {
    async fn get_hierarchy(&self) -> Result<HierarchyResponse, ClientError> {
        self.get_json(HIERARCHY_PATH, &[]).await
    }

    async fn get_capacity_streams(&self) -> Result<CapacityStreamResponse, ClientError> {
        self.get_json(CAPACITY_STREAMS_PATH, &[]).await
    }

    async fn get_appointment_slots(&self) -> Result<AppointmentSlotsResponse, ClientError> {
        self.get_json(APPOINTMENT_SLOTS_PATH, &[]).await
    }

    async fn get_date_ranges(
        &self,
        territory_id: i64,
    ) -> Result<DateRangeListResponse, ClientError> {
        self.get_json(
            DATE_RANGES_PATH,
            &[("serviceTerritoryId", territory_id.to_string())],
        )
        .await
    }

    async fn get_table_data(
        &self,
        territory_id: i64,
        cust_date_id: Option<i64>,
    ) -> Result<TableDataResponse, ClientError> {
        let mut query: Vec<(&str, String)> = vec![("serviceTerritoryId", territory_id.to_string())];
        if let Some(id) = cust_date_id {
            query.push(("custDateId", id.to_string()));
        }
        self.get_json(TABLE_DATA_PATH, &query).await
    }

    async fn update_capacity(
        &self,
        request: &UpdateCapacityRequest,
    ) -> Result<UpdateCapacityResponse, ClientError> {
        let url: Url = self.endpoint(UPDATE_PATH, &[])?;
        debug!(
            %url,
            territory = request.service_territory,
            bulk = request.bulk_territories.len(),
            "POST"
        );
        let response: reqwest::Response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: UPDATE_PATH.to_string(),
                source,
            })?;
        Self::decode(UPDATE_PATH, response).await
    }

    async fn delete_capacity(
        &self,
        cust_date_id: i64,
    ) -> Result<DeleteCapacityResponse, ClientError> {
        let url: Url = self.endpoint(DELETE_PATH, &[("custDateId", cust_date_id.to_string())])?;
        debug!(%url, "DELETE");
        let response: reqwest::Response =
            self.http
                .delete(url)
                .send()
                .await
                .map_err(|source| ClientError::Transport {
                    endpoint: DELETE_PATH.to_string(),
                    source,
                })?;
        Self::decode(DELETE_PATH, response).await
    }
}
