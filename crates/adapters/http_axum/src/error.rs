//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::SecondsFormat;
use serde::Serialize;

use clinic_domain::error::{AttributeMessage, ClinicError, ValidationError};
use clinic_domain::time::now;

/// JSON error body returned by API endpoints.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    status: &'static str,
    description: String,
    date: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<AttributeErrors>,
}

/// Every message reported against one attribute.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct AttributeErrors {
    attribute: &'static str,
    errors: Vec<String>,
}

/// Maps [`ClinicError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(ClinicError);

impl ApiError {
    /// A request whose shape could not be turned into domain values.
    pub(crate) fn invalid(attribute: &'static str, message: impl Into<String>) -> Self {
        Self(ValidationError::single(attribute, message).into())
    }

    /// The domain error this response was built from.
    #[must_use]
    pub fn into_inner(self) -> ClinicError {
        self.0
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, attributes) = match &self.0 {
            ClinicError::Validation(err) => (StatusCode::BAD_REQUEST, group(err.violations())),
            ClinicError::BadRequest(_) => (StatusCode::BAD_REQUEST, Vec::new()),
            ClinicError::NotFound(_) => (StatusCode::NOT_FOUND, Vec::new()),
            ClinicError::Conflict(_) => (StatusCode::CONFLICT, Vec::new()),
            ClinicError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
        };
        let description = match &self.0 {
            ClinicError::Storage(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        let body = ErrorBody {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default(),
            description,
            date: now().to_rfc3339_opts(SecondsFormat::Millis, true),
            attributes,
        };
        (status, Json(body)).into_response()
    }
}

/// Collect violations per attribute, keeping the order attributes were first seen.
fn group(violations: &[AttributeMessage]) -> Vec<AttributeErrors> {
    let mut grouped: Vec<AttributeErrors> = Vec::new();
    for violation in violations {
        match grouped
            .iter_mut()
            .find(|entry| entry.attribute == violation.attribute)
        {
            Some(entry) => entry.errors.push(violation.message.clone()),
            None => grouped.push(AttributeErrors {
                attribute: violation.attribute,
                errors: vec![violation.message.clone()],
            }),
        }
    }
    grouped
}
