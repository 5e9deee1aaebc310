//! HTTP implementation of the unit service client.
//!
//! Wire contract:
//! - `GET /units?name=&type=&status=` -> `{ "units": [...] }`, each query
//!   parameter independently omittable
//! - `GET /units/{id}` -> `{ "unit": {...} }`
//! - `POST /units` body `{ "unit": { "name", "type" } }` -> `{ "unit": {...} }`
//! - `PUT /units/{id}` body `{ "unit": { "status" } }` -> `{ "unit": {...} }`
//!
//! Any non-2xx response is a failure; a JSON body with an `error` field is
//! preferred as the user-facing message, otherwise a generic description
//! with the transport status is used. No automatic retries.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DashboardError, Result};
use crate::filter::FilterSet;
use crate::types::{Unit, UnitStatus, UnitType};

use super::{Config, UnitService};

#[derive(Debug, Deserialize)]
struct UnitsEnvelope {
    units: Vec<Unit>,
}

#[derive(Debug, Deserialize)]
struct UnitEnvelope {
    unit: Unit,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateUnitEnvelope<'a> {
    unit: CreateUnitBody<'a>,
}

#[derive(Debug, Serialize)]
struct CreateUnitBody<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    unit_type: UnitType,
}

#[derive(Debug, Serialize)]
struct SetStatusEnvelope {
    unit: SetStatusBody,
}

#[derive(Debug, Serialize)]
struct SetStatusBody {
    status: UnitStatus,
}

/// Non-2xx response, decomposed so callers can map specific statuses.
struct ServiceFailure {
    status: StatusCode,
    message: Option<String>,
}

impl ServiceFailure {
    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let message = response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.error);
        ServiceFailure { status, message }
    }

    fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    fn into_error(self) -> DashboardError {
        let message = self
            .message
            .unwrap_or_else(|| format!("HTTP {}", self.status));
        tracing::warn!("unit service request failed: {message}");
        DashboardError::Api(message)
    }
}

/// Unit service client over HTTP.
#[derive(Debug)]
pub struct HttpUnitService {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpUnitService {
    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url()?, config.api_token.clone())
    }

    /// Create a client for the given base URL.
    ///
    /// Configures the HTTP client with a 30s connect timeout and 60s total
    /// timeout.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DashboardError::Config(format!("invalid API URL '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.map(SecretString::from),
        })
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                DashboardError::Config(format!(
                    "API URL '{}' cannot be used as a base",
                    self.base_url
                ))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };
        Ok(request.send().await?)
    }
}

/// Drop duplicate ids from a fetched list, keeping the last occurrence.
/// The cache invariant requires at most one entry per id.
fn dedupe_by_id(units: Vec<Unit>) -> Vec<Unit> {
    let mut index_of: HashMap<u64, usize> = HashMap::new();
    let mut result: Vec<Unit> = Vec::with_capacity(units.len());
    for unit in units {
        match index_of.get(&unit.id) {
            Some(&i) => result[i] = unit,
            None => {
                index_of.insert(unit.id, result.len());
                result.push(unit);
            }
        }
    }
    result
}

#[async_trait]
impl UnitService for HttpUnitService {
    async fn list_units(&self, filter: &FilterSet) -> Result<Vec<Unit>> {
        let url = self.endpoint(&["units"])?;
        tracing::debug!("GET {url} ({filter})");

        let mut request = self.client.get(url);
        if !filter.is_empty() {
            request = request.query(&filter.query_pairs());
        }

        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(ServiceFailure::from_response(response).await.into_error());
        }

        let envelope: UnitsEnvelope = response.json().await?;
        Ok(dedupe_by_id(envelope.units))
    }

    async fn get_unit(&self, id: u64) -> Result<Unit> {
        let url = self.endpoint(&["units", &id.to_string()])?;
        tracing::debug!("GET {url}");

        let response = self.send(self.client.get(url)).await?;
        if !response.status().is_success() {
            let failure = ServiceFailure::from_response(response).await;
            if failure.is_not_found() {
                return Err(DashboardError::UnitNotFound(id));
            }
            return Err(failure.into_error());
        }

        let envelope: UnitEnvelope = response.json().await?;
        Ok(envelope.unit)
    }

    async fn create_unit(&self, name: &str, unit_type: UnitType) -> Result<Unit> {
        let url = self.endpoint(&["units"])?;
        tracing::debug!("POST {url} (name={name}, type={unit_type})");

        let body = CreateUnitEnvelope {
            unit: CreateUnitBody { name, unit_type },
        };
        let response = self.send(self.client.post(url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(ServiceFailure::from_response(response).await.into_error());
        }

        let envelope: UnitEnvelope = response.json().await?;
        Ok(envelope.unit)
    }

    async fn set_status(&self, id: u64, status: UnitStatus) -> Result<Unit> {
        let url = self.endpoint(&["units", &id.to_string()])?;
        tracing::debug!("PUT {url} (status={status})");

        let body = SetStatusEnvelope {
            unit: SetStatusBody { status },
        };
        let response = self.send(self.client.put(url).json(&body)).await?;
        if !response.status().is_success() {
            let failure = ServiceFailure::from_response(response).await;
            if failure.is_not_found() {
                return Err(DashboardError::UnitNotFound(id));
            }
            return Err(failure.into_error());
        }

        let envelope: UnitEnvelope = response.json().await?;
        Ok(envelope.unit)
    }
}
