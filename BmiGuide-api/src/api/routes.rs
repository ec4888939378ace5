use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::handlers::{bmi, form, health};
use crate::api::AppState;
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(config: AppConfig) -> Router {
    debug!("Creating application router");

    let health_service = health::create_health_service(&config);
    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/bmi", post(bmi::evaluate_bmi))
        .route("/form", get(form::get_form).put(form::update_form))
        .route("/form/share", post(form::share_form))
        .route("/form/copy", post(form::copy_form))
        .route("/form/export", post(form::export_form));

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state);

    debug!("API routes nested");

    let app = add_swagger_ui(app);
    let app = configure_security(app).layer(TraceLayer::new_for_http());
    debug!("Security configuration applied");

    health::initialize_server_start_time();

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}

/// CORS for browser clients plus standard security headers
pub fn configure_security(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(std::time::Duration::from_secs(3600));

    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    app.layer(cors).layer(security_headers)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    /// Create a test application with sample prefill disabled
    pub fn create_test_app() -> Router {
        create_app(AppConfig {
            prefill_sample: false,
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
