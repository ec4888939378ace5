pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;

use bmi_guide_domain::form::FormController;

use crate::api::handlers::bmi::{create_service, BmiService};
use crate::config::AppConfig;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    /// Stateless BMI evaluation
    pub bmi_service: BmiService,

    /// The single patient form served by this instance
    pub form: Arc<Mutex<FormController>>,

    /// Server configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let form = if config.prefill_sample {
            FormController::prefilled()
        } else {
            FormController::new()
        };

        Self {
            bmi_service: create_service(),
            form: Arc::new(Mutex::new(form)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router
pub fn create_application(config: AppConfig) -> Router {
    routes::create_app(config)
}
