//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (checks the user store)
//! - /health/live - Liveness probe (always returns OK if server is running)

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub user_store: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn respond(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(respond("healthy", None))
}

/// Readiness probe. Returns 503 while the user store is unreachable.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.users.health_check().await {
        Ok(()) => Ok(Json(respond(
            "ready",
            Some(HealthChecks {
                user_store: CheckStatus {
                    status: "healthy".to_string(),
                    message: None,
                },
            }),
        ))),
        Err(e) => {
            warn!("User store health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(respond(
                    "not_ready",
                    Some(HealthChecks {
                        user_store: CheckStatus {
                            status: "unhealthy".to_string(),
                            message: Some("user store unavailable".to_string()),
                        },
                    }),
                )),
            ))
        }
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(respond("alive", None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
