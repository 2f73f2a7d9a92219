pub mod api;
pub mod catalog;
pub mod measurement;
pub mod registry;

pub use api::ApiError;
pub use catalog::CatalogError;
pub use measurement::MeasurementError;
pub use registry::RegistryError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::CatalogError(e) => (e.status_code(), e.to_string()),
            ApiError::RegistryError(e) => (e.status_code(), e.to_string()),
            ApiError::MeasurementError(e) => (e.status_code(), e.to_string()),
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, String::new())
            }
        };

        // Server errors only expose a correlation id
        let (error_message, error_id) = if status.is_server_error() {
            let error_id = Uuid::new_v4();
            tracing::error!(error_id = ?error_id, "{}", self);
            ("Internal server error".to_string(), Some(error_id.to_string()))
        } else {
            (message, None)
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": error_message
        });

        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        let body = Json(json!({
            "error": error_obj
        }));

        (status, body).into_response()
    }
}
