use auth::AuthContext;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::credential::models::ChangePasswordCommand;
use crate::credential::models::UserId;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Changes the password of the token's subject; previously issued tokens stay valid.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    body: Result<Json<ChangePasswordRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;

    state
        .credential_service
        .change_password(ChangePasswordCommand::new(
            UserId(context.user_id),
            body.password,
        ))
        .await
        .map_err(ApiError::from)
        .map(|ref credential| ApiSuccess::new(StatusCode::OK, credential.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequestBody {
    password: String,
}
