use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::LoanScenario;
use super::service::{EligibilityService, EligibilityServiceError};

/// Router builder exposing the eligibility check and the active rule book.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/api/v1/check-loan", post(check_loan_handler))
        .route("/api/v1/rules", get(rules_handler))
        .with_state(service)
}

pub(crate) async fn check_loan_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(scenario): axum::Json<LoanScenario>,
) -> Response {
    match service.check(scenario) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(EligibilityServiceError::Rejected(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "issues": error.issues,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(EligibilityServiceError::Invalid(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "issues": [],
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn rules_handler(State(service): State<Arc<EligibilityService>>) -> Response {
    (StatusCode::OK, axum::Json(service.engine().rules().clone())).into_response()
}
