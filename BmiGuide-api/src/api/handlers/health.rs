use std::collections::HashMap;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::Utc;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

// Use the trait from domain layer
use bmi_guide_domain::health::{
    self, ComponentStatus as DomainComponentStatus, HealthComponent as DomainHealthComponent,
    HealthServiceTrait, SystemHealth, SystemStatus,
};

use crate::config::AppConfig;

/// Health check response model with system information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Unix timestamp of when the response was generated
    pub timestamp: i64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<i64>,
    /// Details about various components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// BMI engine self-check status
    pub engine: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
    /// Additional components such as the share and clipboard hand-off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<serde_json::Value>,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started
static SERVER_START_TIME: OnceCell<i64> = OnceCell::new();
static INIT: Once = Once::new();

/// Record the server start time used for uptime reporting
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let _ = SERVER_START_TIME.set(Utc::now().timestamp());
    });
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument]
pub async fn health_check(
    Extension(health_service): Extension<Arc<dyn HealthServiceTrait + Send + Sync>>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = Utc::now().timestamp();
    let uptime = SERVER_START_TIME
        .get()
        .map(|&start_time| (now - start_time).max(0));

    let system_health = health_service.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let component = |name: &str| ComponentHealthStatus {
        status: map_component_status(
            &system_health
                .components
                .get(name)
                .map(|c| c.status.clone())
                .unwrap_or(DomainComponentStatus::Healthy),
        ),
        message: system_health
            .components
            .get(name)
            .and_then(|c| c.details.clone()),
    };

    let mut component_statuses = ComponentStatus {
        engine: component("engine"),
        api: component("api"),
        additional: None,
    };

    // Add any additional components as a JSON object
    if system_health.components.len() > 2 {
        let additional_components: serde_json::Value = system_health
            .components
            .iter()
            .filter(|(name, _)| name.as_str() != "engine" && name.as_str() != "api")
            .map(|(name, component)| {
                (
                    name.clone(),
                    serde_json::json!({
                        "status": map_component_status(&component.status),
                        "message": component.details,
                    }),
                )
            })
            .collect::<serde_json::Map<String, serde_json::Value>>()
            .into();

        component_statuses.additional = Some(additional_components);
    }

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components: component_statuses,
        environment: health_service.environment().to_string(),
    };

    let code = match overall_status {
        "ok" => StatusCode::OK,
        "degraded" => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(response))
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

/// Implementation of the health service
#[derive(Debug)]
pub struct HealthService {
    environment: String,
    share_enabled: bool,
    clipboard_enabled: bool,
}

impl HealthService {
    /// Create a new health service
    pub fn new(config: &AppConfig) -> Self {
        HealthService {
            environment: config.environment.clone(),
            share_enabled: config.share_enabled,
            clipboard_enabled: config.clipboard_enabled,
        }
    }
}

fn facility_component(enabled: bool) -> DomainHealthComponent {
    DomainHealthComponent {
        status: DomainComponentStatus::Healthy,
        details: (!enabled)
            .then(|| "Disabled by configuration; clients are told it is unsupported".to_string()),
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        let engine = match self.check_engine_status().await {
            Ok(_) => DomainHealthComponent::healthy(),
            Err(e) => DomainHealthComponent {
                status: DomainComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        components.insert("engine".to_string(), engine);
        components.insert("api".to_string(), DomainHealthComponent::healthy());
        components.insert("share".to_string(), facility_component(self.share_enabled));
        components.insert(
            "clipboard".to_string(),
            facility_component(self.clipboard_enabled),
        );

        SystemHealth::from_components(components)
    }

    async fn check_engine_status(&self) -> Result<bool, String> {
        health::check_engine_status().await
    }

    fn environment(&self) -> &str {
        &self.environment
    }
}

/// Factory function to create a health service
pub fn create_health_service(config: &AppConfig) -> Arc<dyn HealthServiceTrait + Send + Sync> {
    Arc::new(HealthService::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_health_check_response() {
        initialize_server_start_time();

        let health_service = create_health_service(&AppConfig::default());

        let response = health_check(Extension(health_service)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["components"]["engine"]["status"], "ok");
        assert_eq!(json["environment"], "development");
        assert!(json["components"]["additional"]["share"].is_object());
    }

    #[tokio::test]
    async fn test_disabled_share_is_reported() {
        let config = AppConfig {
            share_enabled: false,
            ..AppConfig::default()
        };
        let service = HealthService::new(&config);

        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components["share"].details.is_some());
        assert!(health.components["clipboard"].details.is_none());
    }
}
