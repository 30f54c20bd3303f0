// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::database::DatabaseError;
use crate::plans::GateError;
use crate::validation::{ValidationError, Violation};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        violations: Vec<Violation>,
    },
    InvalidJson(String),
    InvalidFields {
        message: String,
        invalid: Vec<String>,
        allowed: Vec<String>,
    },
    WrongChannel {
        message: String,
        fields: Vec<String>,
        endpoint: String,
    },
    UnsupportedFields {
        message: String,
        fields: Vec<String>,
        supported: Vec<String>,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::InvalidJson(_)
            | ApiError::InvalidFields { .. }
            | ApiError::WrongChannel { .. }
            | ApiError::UnsupportedFields { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
            ApiError::ValidationError { message, .. }
            | ApiError::InvalidFields { message, .. }
            | ApiError::WrongChannel { message, .. }
            | ApiError::UnsupportedFields { message, .. } => message,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::InvalidFields { .. } => "INVALID_FIELDS",
            ApiError::WrongChannel { .. } => "WRONG_CHANNEL",
            ApiError::UnsupportedFields { .. } => "UNSUPPORTED_FIELDS",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });

        match self {
            ApiError::ValidationError { violations, .. } => {
                let errors: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
                // First message wins when one field fails more than once
                let mut field_errors = BTreeMap::new();
                for v in violations {
                    field_errors.entry(v.field.as_str()).or_insert(v.message.as_str());
                }
                response["errors"] = json!(errors);
                response["field_errors"] = json!(field_errors);
            }
            ApiError::InvalidFields { invalid, allowed, .. } => {
                response["invalid_fields"] = json!(invalid);
                response["allowed_fields"] = json!(allowed);
            }
            ApiError::WrongChannel { fields, endpoint, .. } => {
                response["fields"] = json!(fields);
                response["editable_fields_endpoint"] = json!(endpoint);
            }
            ApiError::UnsupportedFields { fields, supported, .. } => {
                response["unsupported_fields"] = json!(fields);
                response["supported_fields"] = json!(supported);
            }
            _ => {}
        }

        response
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::ValidationError {
            message: err.to_string(),
            violations: err.violations,
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        let message = err.to_string();
        match err {
            GateError::InvalidField { invalid, allowed } => ApiError::InvalidFields {
                message,
                invalid,
                allowed,
            },
            GateError::WrongChannel { fields, endpoint } => ApiError::WrongChannel {
                message,
                fields,
                endpoint,
            },
            GateError::UnsupportedField { fields, supported } => ApiError::UnsupportedFields {
                message,
                fields,
                supported,
            },
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unavailable() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        match err {
            DatabaseError::Conflict(msg) => {
                tracing::warn!("Database conflict: {}", msg);
                ApiError::conflict("Request conflicts with existing records")
            }
            DatabaseError::InvalidValue(msg) => {
                tracing::warn!("Database rejected a value: {}", msg);
                ApiError::bad_request("A value is outside the range the database can store")
            }
            DatabaseError::ConfigMissing(_) => {
                ApiError::service_unavailable("Database is not configured")
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
