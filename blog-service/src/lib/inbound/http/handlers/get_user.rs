use auth::ResourceId;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::credential::models::UserId;
use crate::credential::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Requires `validate_path_id` to have run for this route.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(id): Extension<ResourceId>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .credential_service
        .get_user(UserId::from(id))
        .await
        .map_err(ApiError::from)
        .map(|ref credential| ApiSuccess::new(StatusCode::OK, credential.into()))
}
