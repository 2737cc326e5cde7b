use auth::AuthorizationError;
use auth::ParamError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::credential::errors::CredentialError;
use crate::credential::models::StoredCredential;

pub mod change_password;
pub mod current_user;
pub mod delete_user;
pub mod get_user;
pub mod health;
pub mod login;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure response; every variant carries a stable error code and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(&'static str, String),
    UnprocessableEntity(&'static str, String),
    BadRequest(&'static str, String),
    NotFound(&'static str, String),
    Forbidden(&'static str, String),
    Conflict(&'static str, String),
    Unauthorized(&'static str, String),
}

impl ApiError {
    fn internal(code: &'static str) -> Self {
        ApiError::InternalServerError(code, "Internal server error".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        tracing::error!(error = %e, "Unexpected error");
        ApiError::internal("Internal")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InternalServerError(code, msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, msg)
            }
            ApiError::UnprocessableEntity(code, msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, code, msg)
            }
            ApiError::BadRequest(code, msg) => (StatusCode::BAD_REQUEST, code, msg),
            ApiError::NotFound(code, msg) => (StatusCode::NOT_FOUND, code, msg),
            ApiError::Forbidden(code, msg) => (StatusCode::FORBIDDEN, code, msg),
            ApiError::Conflict(code, msg) => (StatusCode::CONFLICT, code, msg),
            ApiError::Unauthorized(code, msg) => (StatusCode::UNAUTHORIZED, code, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, code, message))).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        let code = err.code();
        match err {
            CredentialError::InvalidCredentials => ApiError::Unauthorized(code, err.to_string()),
            CredentialError::NotFound(_) => ApiError::NotFound(code, err.to_string()),
            CredentialError::Forbidden(_) => ApiError::Forbidden(code, err.to_string()),
            CredentialError::UsernameAlreadyExists(_) => ApiError::Conflict(code, err.to_string()),
            CredentialError::InvalidUsername(_) | CredentialError::EmptyPassword => {
                ApiError::UnprocessableEntity(code, err.to_string())
            }
            // Backend detail stays in the logs
            CredentialError::Password(_)
            | CredentialError::Token(_)
            | CredentialError::StoreUnavailable(_)
            | CredentialError::Unknown(_) => {
                tracing::error!(code, error = %err, "Request failed");
                ApiError::internal(code)
            }
        }
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        ApiError::Unauthorized(err.code(), err.to_string())
    }
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> Self {
        ApiError::BadRequest(err.code(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest("MalformedBody", rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, code: &str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                code: code.to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
}

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: u64,
    pub username: String,
}

impl From<&StoredCredential> for UserData {
    fn from(credential: &StoredCredential) -> Self {
        Self {
            id: credential.id.0,
            username: credential.username.clone(),
        }
    }
}
