use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    Forbidden(String),
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    Conflict { code: &'static str, message: String },
    BadGateway(String),
    Internal(String),
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::BadRequest {
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::Forbidden(msg) => HttpError::Forbidden(msg),
            AppError::Validation(err) => HttpError::BadRequest {
                code: "VALIDATION_FAILED",
                message: err.to_string(),
            },
            AppError::BadRequest(msg) => HttpError::bad_request(msg),
            AppError::NotFound(msg) => HttpError::NotFound {
                code: "NOT_FOUND",
                message: msg,
            },
            AppError::Conflict(msg) => HttpError::Conflict {
                code: "CONFLICT",
                message: msg,
            },
            AppError::MalformedCode(err) => HttpError::BadRequest {
                code: "MALFORMED_CODE",
                message: err.to_string(),
            },
            AppError::CheckinTargetNotFound => HttpError::NotFound {
                code: "CHECKIN_TARGET_NOT_FOUND",
                message: AppError::CheckinTargetNotFound.to_string(),
            },
            AppError::AlreadyFinalized => HttpError::Conflict {
                code: "ALREADY_FINALIZED",
                message: AppError::AlreadyFinalized.to_string(),
            },
            AppError::Upstream(msg) => HttpError::BadGateway(msg),
            AppError::Internal(err) => HttpError::Internal(format!("{:#}", err)),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest {
            code: "INVALID_BODY",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest {
            code: "INVALID_QUERY",
            message: rejection.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            HttpError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".to_string(),
            ),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            HttpError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            HttpError::NotFound { code, message } => (StatusCode::NOT_FOUND, code, message),
            HttpError::Conflict { code, message } => (StatusCode::CONFLICT, code, message),
            HttpError::BadGateway(msg) => {
                error!("upstream failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNAVAILABLE",
                    "identity provider unavailable".to_string(),
                )
            }
            HttpError::Internal(msg) => {
                error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal error".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{CodecError, ValidationError};

    fn status_of(err: AppError) -> StatusCode {
        HttpError::from(err).into_response().status()
    }

    #[test]
    fn maps_application_errors_to_statuses() {
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::Forbidden("nope".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Validation(ValidationError::new("name", "is required"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::MalformedCode(CodecError::MissingSeparator)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::CheckinTargetNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::AlreadyFinalized), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::Upstream("timeout".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::Internal(anyhow::anyhow!("disk"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
