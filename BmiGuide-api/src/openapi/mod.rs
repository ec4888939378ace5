use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // BMI endpoints
        crate::api::handlers::bmi::evaluate_bmi,

        // Form endpoints
        crate::api::handlers::form::get_form,
        crate::api::handlers::form::update_form,
        crate::api::handlers::form::share_form,
        crate::api::handlers::form::copy_form,
        crate::api::handlers::form::export_form
    ),
    components(
        schemas(
            // Request and response entities
            crate::entities::bmi::PatientFormRequest,
            crate::entities::bmi::EvaluateBmiResponse,
            crate::entities::bmi::StatusPayload,
            crate::entities::bmi::ActionResponse,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain types
            bmi_guide_domain::entities::measurement::PatientMeasurement,
            bmi_guide_domain::entities::measurement::FieldError,
            bmi_guide_domain::entities::measurement::FieldErrors,
            bmi_guide_domain::entities::bmi::BmiCategory,
            bmi_guide_domain::entities::bmi::BmiResult,
            bmi_guide_domain::presenter::DisplayState,
            bmi_guide_domain::form::FormView,
            bmi_guide_domain::form::FieldMessage,
            bmi_guide_domain::export::ShareRequest
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "bmi", description = "Stateless BMI evaluation"),
        (name = "form", description = "Patient form session with share, copy and CSV export")
    ),
    info(
        title = "BMI Guide API",
        version = "0.1.0",
        description = "Patient BMI calculator with classification, advice and result export",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
