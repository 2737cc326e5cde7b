use auth::AuthContext;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;

pub async fn current_user(Extension(context): Extension<AuthContext>) -> ApiSuccess<UserData> {
    ApiSuccess::new(
        StatusCode::OK,
        UserData {
            id: context.user_id,
            username: context.username,
        },
    )
}
