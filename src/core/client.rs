//! HTTP client for the fleet REST API
//!
//! All calls are blocking and sequential. Every non-2xx response is turned
//! into an [`ApiError`] whose message is what the user gets to see: the
//! server's `detail` field when it sends one, otherwise a friendly message
//! for the well-known 404/503 cases, otherwise a generic per-operation text.

use miette::Diagnostic;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::vehicle::{NewVehicle, Vehicle, VehicleStatus};

/// Errors returned by fleet API calls
#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("API endpoint not found. Check the reverse proxy configuration and make sure the services are running.")]
    #[diagnostic(code(fleetdash::api::not_found), help("Check the API connection"))]
    NotFound,

    #[error("Service temporarily unavailable. Check the database connection.")]
    #[diagnostic(code(fleetdash::api::unavailable), help("Check the API connection"))]
    Unavailable,

    #[error("{message}")]
    #[diagnostic(code(fleetdash::api::server), help("Check the API connection"))]
    Server { status: u16, message: String },

    #[error("Could not reach the fleet API at {url}")]
    #[diagnostic(
        code(fleetdash::api::transport),
        help("Check the API connection (--api-url or FLEETDASH_API_URL)")
    )]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {url}: {message}")]
    #[diagnostic(code(fleetdash::api::decode), help("Check the API connection"))]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Build the error for a non-2xx response
    ///
    /// `fallback` names the failed operation and is used only when the body
    /// carries no message and the status has no dedicated text.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        if let Some(message) = server_message(body) {
            return ApiError::Server { status, message };
        }
        match status {
            404 => ApiError::NotFound,
            503 => ApiError::Unavailable,
            _ => ApiError::Server {
                status,
                message: format!("{} (server error {})", fallback, status),
            },
        }
    }
}

/// Extract `detail` (or `message`) from an error body
///
/// FastAPI validation errors send `detail` as a list of objects with a
/// `msg` field; those are joined into one line.
fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail") {
        Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }
    json.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// Result of a successful create call
///
/// The backend answers either with the full record or with `{message, id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Created {
    pub id: Option<i64>,
    pub message: Option<String>,
}

/// Operations the dashboard needs from the backend
pub trait FleetApi {
    /// `GET /vehicles`
    fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError>;

    /// `POST /vehicles`
    fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Created, ApiError>;

    /// `PATCH /vehicles/{id}/status?status={value}`
    fn set_status(&self, id: i64, status: VehicleStatus) -> Result<Option<Vehicle>, ApiError>;

    /// `DELETE /vehicles/{id}`
    fn delete_vehicle(&self, id: i64) -> Result<(), ApiError>;

    /// `GET /health`
    fn health(&self) -> Result<Value, ApiError>;
}

/// [`FleetApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpFleetClient {
    client: Client,
    base_url: String,
}

impl HttpFleetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the body of a 2xx response
    fn send(&self, request: RequestBuilder, url: &str, fallback: &str) -> Result<String, ApiError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| {
                warn!(%url, error = %source, "request failed");
                ApiError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response received");

        if status.is_success() {
            Ok(body)
        } else {
            let err = ApiError::from_response(status.as_u16(), &body, fallback);
            debug!(%url, status = status.as_u16(), error = %err, "request rejected");
            Err(err)
        }
    }
}

impl FleetApi for HttpFleetClient {
    fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let url = self.url("/vehicles");
        debug!(%url, "GET");
        let body = self.send(self.client.get(&url), &url, "Failed to load vehicles")?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }

    fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Created, ApiError> {
        let url = self.url("/vehicles");
        debug!(%url, plate = %vehicle.license_plate, "POST");
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(vehicle);
        let body = self.send(request, &url, "Failed to create vehicle")?;

        let json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        Ok(Created {
            id: json.get("id").and_then(|id| id.as_i64()),
            message: json
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from),
        })
    }

    fn set_status(&self, id: i64, status: VehicleStatus) -> Result<Option<Vehicle>, ApiError> {
        let url = self.url(&format!("/vehicles/{}/status?status={}", id, status.as_str()));
        debug!(%url, "PATCH");
        let request = self
            .client
            .patch(&url)
            .header(CONTENT_TYPE, "application/json");
        let body = self.send(request, &url, "Failed to change status")?;
        Ok(serde_json::from_str(&body).ok())
    }

    fn delete_vehicle(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/vehicles/{}", id));
        debug!(%url, "DELETE");
        let request = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, "application/json");
        self.send(request, &url, "Failed to delete vehicle")?;
        Ok(())
    }

    fn health(&self) -> Result<Value, ApiError> {
        let url = self.url("/health");
        debug!(%url, "GET");
        let body = self.send(self.client.get(&url), &url, "Health check failed")?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins_over_status() {
        let err = ApiError::from_response(400, r#"{"detail": "Plate already exists"}"#, "x");
        assert_eq!(err.to_string(), "Plate already exists");
        assert!(matches!(err, ApiError::Server { status: 400, .. }));

        let err = ApiError::from_response(503, r#"{"detail": "Database unavailable: boom"}"#, "x");
        assert_eq!(err.to_string(), "Database unavailable: boom");
    }

    #[test]
    fn test_friendly_messages_without_detail() {
        let err = ApiError::from_response(404, "<html>Not Found</html>", "x");
        assert!(matches!(err, ApiError::NotFound));
        assert!(err.to_string().contains("API endpoint not found"));

        let err = ApiError::from_response(503, "", "x");
        assert!(matches!(err, ApiError::Unavailable));
        assert!(err.to_string().contains("temporarily unavailable"));
    }

    #[test]
    fn test_generic_fallback() {
        let err = ApiError::from_response(500, "oops", "Failed to delete vehicle");
        assert_eq!(err.to_string(), "Failed to delete vehicle (server error 500)");
    }

    #[test]
    fn test_every_response_error_points_at_the_connection() {
        use miette::Diagnostic;

        for err in [
            ApiError::from_response(404, "", "x"),
            ApiError::from_response(503, "", "x"),
            ApiError::from_response(400, r#"{"detail": "bad"}"#, "x"),
        ] {
            let help = err.help().map(|h| h.to_string()).unwrap_or_default();
            assert!(help.contains("Check the API connection"), "{}", err);
        }
    }

    #[test]
    fn test_message_field_and_validation_list() {
        let err = ApiError::from_response(400, r#"{"message": "bad input"}"#, "x");
        assert_eq!(err.to_string(), "bad input");

        let body = r#"{"detail": [
            {"loc": ["body", "license_plate"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "model"], "msg": "field required", "type": "missing"}
        ]}"#;
        let err = ApiError::from_response(422, body, "x");
        assert_eq!(err.to_string(), "field required; field required");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpFleetClient::new("http://localhost/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost/api");
        assert_eq!(client.url("/vehicles"), "http://localhost/api/vehicles");
    }
}
