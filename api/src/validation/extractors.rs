//! Field errors, the error response body, and the raw JSON extractor
//!
//! Listing payloads are not deserialized into a typed request here: the body
//! is taken as a raw `serde_json::Value` so the normalizer sees exactly what
//! the client sent. Only a body that is not JSON at all is rejected at this
//! layer.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation error response body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        let error_summary = if errors.len() == 1 {
            format!("Validation failed for field '{}'", errors[0].field)
        } else {
            format!("Validation failed for {} fields", errors.len())
        };

        Self {
            error: "ValidationError".to_string(),
            message: error_summary,
            errors,
            code: StatusCode::BAD_REQUEST.as_u16(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Validation error that converts to an HTTP response
#[derive(Debug)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl axum::response::IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        let response = ValidationErrorResponse::new(self.errors);
        let correlation_id = response.correlation_id.clone();
        let mut response = (StatusCode::BAD_REQUEST, Json(response)).into_response();
        if let Ok(value) = axum::http::HeaderValue::from_str(&correlation_id) {
            response.headers_mut().insert(
                axum::http::header::HeaderName::from_static("x-correlation-id"),
                value,
            );
        }
        response
    }
}

/// Map a JSON body rejection onto a single `body` field error
pub fn json_rejection_to_validation_error(err: JsonRejection) -> ValidationError {
    let message = match err {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => format!("JSON syntax error: {}", e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type must be application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid JSON payload".to_string(),
    };
    ValidationError::single("body", message)
}

/// JSON body extractor that keeps the payload untyped
///
/// Use this instead of `Json<T>` for listing payloads: numeric fields may
/// arrive as strings and must reach the normalizer unchanged.
pub struct RawJson(pub Value);

#[async_trait]
impl<S> FromRequest<S> for RawJson
where
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection_to_validation_error)?;
        Ok(RawJson(value))
    }
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Run a validator that also produces the typed field value.
    ///
    /// Returns `None` and records the error when the validator fails.
    pub fn field<T, F>(&mut self, field: &str, validator: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, String>,
    {
        match validator() {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    /// Absorb errors produced by a nested validation, prefixing their fields
    pub fn extend_prefixed(&mut self, prefix: &str, errors: Vec<FieldError>) -> &mut Self {
        self.errors.extend(errors.into_iter().map(|e| {
            FieldError::new(format!("{}.{}", prefix, e.field), e.message)
        }));
        self
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// Consume the builder, returning whatever errors were collected
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
