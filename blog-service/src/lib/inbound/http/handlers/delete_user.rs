use auth::AuthContext;
use auth::ResourceId;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::credential::models::UserId;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Extension(id): Extension<ResourceId>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .credential_service
        .delete_user(UserId(context.user_id), UserId::from(id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
