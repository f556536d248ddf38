use std::fmt;

use axum::http::{header::RETRY_AFTER, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use super::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    AuthenticationFail,
    UserAlreadyExists,
    Forbidden,
    EntityFailIdNotFound { ident: String },
    InvalidIdentifier { value: String },
    DuplicateKey { key: String },
    AuthFailNoJwt,
    AuthFailJwtInvalid { source: String },
    Serde { source: String },
    StorageUnavailable { source: String },
}

/// Error carrying the request id reported to the client; implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error produced before a response is composed.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityFailIdNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Generic { .. }
            | AppError::InvalidIdentifier { .. }
            | AppError::UserAlreadyExists => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::AuthenticationFail
            | AppError::AuthFailNoJwt
            | AppError::AuthFailJwtInvalid { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Serde { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        AppError::from(value).into()
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::AuthenticationFail => write!(f, "Invalid email or password"),
            Self::UserAlreadyExists => write!(f, "User already exists with this email"),
            Self::Forbidden => write!(f, "Not authorized to perform this action"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::InvalidIdentifier { value } => write!(f, "Invalid identifier: {value}"),
            Self::DuplicateKey { key } => write!(f, "Record {key} already exists"),
            Self::AuthFailNoJwt => write!(f, "Not authorized, no token"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "Not authorized, token failed or expired"),
            Self::Serde { .. } => write!(f, "{INTERNAL}"),
            Self::StorageUnavailable { .. } => {
                write!(f, "Storage temporarily unavailable, retry later")
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub error: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.error.status_code();
        match &self.error {
            AppError::StorageUnavailable { source } | AppError::Serde { source } => {
                error!(req_id = %self.req_id, %source, "request failed");
            }
            other => warn!(req_id = %self.req_id, error = ?other, "request rejected"),
        }

        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, axum::Json(body)).into_response();
        if status_code == StatusCode::SERVICE_UNAVAILABLE {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::StorageUnavailable {
            source: value.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Generic {
            description: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_unavailable_are_distinguished() {
        let not_found = AppError::EntityFailIdNotFound {
            ident: "grill:abc".to_string(),
        };
        let unavailable = AppError::StorageUnavailable {
            source: "connection reset".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!unavailable.to_string().contains("connection reset"));
    }

    #[test]
    fn unavailable_response_asks_to_retry() {
        let err: CtxError = AppError::StorageUnavailable {
            source: "timeout".to_string(),
        }
        .into();
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(res.headers().get(RETRY_AFTER).unwrap(), "1");
    }

    #[test]
    fn invalid_identifier_is_bad_request() {
        let err: CtxError = AppError::InvalidIdentifier {
            value: "a b".to_string(),
        }
        .into();
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
