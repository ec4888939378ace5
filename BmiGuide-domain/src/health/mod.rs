//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::bmi::BmiCategory;
use crate::services::classification::{categorize_bmi, compute_bmi};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced capability
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

impl HealthComponent {
    pub fn healthy() -> Self {
        Self {
            status: ComponentStatus::Healthy,
            details: None,
        }
    }
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Build a system health report, deriving the overall status from the
    /// worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check that the BMI engine produces known results
    async fn check_engine_status(&self) -> Result<bool, String>;

    /// Name of the deployment environment reported alongside health
    fn environment(&self) -> &str {
        "development"
    }
}

/// Run the BMI engine against reference values.
///
/// Returns `Ok(true)` when every reference case matches, and an error
/// describing the first mismatch otherwise.
pub async fn check_engine_status() -> Result<bool, String> {
    let cases = [
        (70.0, 170.0, 24.2, BmiCategory::Normal),
        (45.0, 170.0, 15.6, BmiCategory::Underweight),
        (95.0, 170.0, 32.9, BmiCategory::Obese),
    ];

    for (weight, height, expected, category) in cases {
        let bmi = compute_bmi(weight, height);
        if bmi != expected || categorize_bmi(bmi) != category {
            return Err(format!(
                "BMI engine self-check failed for {} kg / {} cm: got {}",
                weight, height, bmi
            ));
        }
    }

    Ok(true)
}

/// Get overall system health of the domain layer
pub async fn get_system_health() -> SystemHealth {
    let engine = match check_engine_status().await {
        Ok(_) => HealthComponent::healthy(),
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    SystemHealth::from_components(vec![("engine".to_string(), engine)].into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_engine_self_check_passes() {
        assert_eq!(check_engine_status().await, Ok(true));
    }

    #[tokio::test]
    async fn test_get_system_health() {
        let health = get_system_health().await;
        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("engine"));
    }

    #[test]
    fn test_overall_status_follows_worst_component() {
        let mut components = HashMap::new();
        components.insert("engine".to_string(), HealthComponent::healthy());
        components.insert(
            "share".to_string(),
            HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("disabled".to_string()),
            },
        );

        assert_eq!(SystemHealth::from_components(components.clone()).status, SystemStatus::Degraded);

        components.insert(
            "engine".to_string(),
            HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: None,
            },
        );
        assert_eq!(SystemHealth::from_components(components).status, SystemStatus::Unhealthy);
    }
}
