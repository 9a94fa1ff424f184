//! HTTP implementation of the simulation service adapter.
//!
//! Thin typed wrapper over the service's REST endpoints. Each operation
//! is one request/response round trip; non-success statuses are mapped to
//! [`ServiceError`] variants per operation (a 4xx on create/reset means
//! the configuration was refused, a 4xx on step/state means no simulation
//! exists yet) and the response body is carried along for diagnostics.

use reqwest::StatusCode;
use sweepsim_types::{SimulationConfig, SimulationDescriptor, Snapshot};

use crate::error::ServiceError;

/// HTTP client for the remote simulation service.
///
/// Sends requests to `{base_url}/simulations/...`. The base URL is
/// expected to include the API prefix (e.g.
/// `http://localhost:8000/api`).
#[derive(Debug, Clone)]
pub struct HttpService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpService {
    /// Create a new HTTP adapter for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a new simulation from `config`.
    pub(crate) async fn create(
        &self,
        config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        let url = format!("{}/simulations/create_simulation/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(config)
            .send()
            .await
            .map_err(|e| {
                ServiceError::ServiceUnavailable(format!("create request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(config_failure(status, &body));
        }

        response.json::<SimulationDescriptor>().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("create response parse failed: {e}"))
        })
    }

    /// Advance the active simulation by one turn.
    pub(crate) async fn step(&self) -> Result<Snapshot, ServiceError> {
        let url = format!("{}/simulations/step/", self.base_url);
        let response = self.client.post(&url).send().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("step request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(state_failure(status, &body));
        }

        response.json::<Snapshot>().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("step response parse failed: {e}"))
        })
    }

    /// Fetch the current state without advancing turns.
    pub(crate) async fn fetch_state(&self) -> Result<Snapshot, ServiceError> {
        let url = format!("{}/simulations/state/", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("state request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(state_failure(status, &body));
        }

        response.json::<Snapshot>().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("state response parse failed: {e}"))
        })
    }

    /// Replace the active simulation with a fresh run of `config`.
    ///
    /// Semantically equivalent to [`Self::create`]; the service models it
    /// as a distinct intent, so the adapter exposes it as one.
    pub(crate) async fn reset(
        &self,
        config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        let url = format!("{}/simulations/reset/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(config)
            .send()
            .await
            .map_err(|e| {
                ServiceError::ServiceUnavailable(format!("reset request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(config_failure(status, &body));
        }

        response.json::<SimulationDescriptor>().await.map_err(|e| {
            ServiceError::ServiceUnavailable(format!("reset response parse failed: {e}"))
        })
    }
}

/// Read the body of a failed response for the error message.
async fn read_error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_owned())
}

/// Map a non-success status on create/reset to a [`ServiceError`].
fn config_failure(status: StatusCode, body: &str) -> ServiceError {
    if status.is_client_error() {
        ServiceError::ValidationRejected(format!("service returned {status}: {body}"))
    } else {
        ServiceError::ServiceUnavailable(format!("service returned {status}: {body}"))
    }
}

/// Map a non-success status on step/state to a [`ServiceError`].
fn state_failure(status: StatusCode, body: &str) -> ServiceError {
    if status.is_client_error() {
        ServiceError::NoActiveSimulation(format!("service returned {status}: {body}"))
    } else {
        ServiceError::ServiceUnavailable(format!("service returned {status}: {body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_config_maps_to_validation_error() {
        let err = config_failure(
            StatusCode::BAD_REQUEST,
            "{\"num_robots\":[\"Ensure this value is less than or equal to 20.\"]}",
        );
        assert!(matches!(err, ServiceError::ValidationRejected(_)));
    }

    #[test]
    fn config_server_error_maps_to_unavailable() {
        let err = config_failure(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ServiceError::ServiceUnavailable(_)));
    }

    #[test]
    fn step_before_create_maps_to_no_active_simulation() {
        let err = state_failure(StatusCode::BAD_REQUEST, "{\"error\":\"no simulation\"}");
        assert!(matches!(err, ServiceError::NoActiveSimulation(_)));
    }

    #[test]
    fn step_server_error_maps_to_unavailable() {
        let err = state_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ServiceError::ServiceUnavailable(_)));
    }

    #[test]
    fn error_message_carries_status_and_body() {
        let err = state_failure(StatusCode::BAD_REQUEST, "no simulation");
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("no simulation"));
    }
}
