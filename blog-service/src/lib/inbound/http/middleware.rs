use std::collections::HashMap;
use std::sync::Arc;

use auth::AuthorizationError;
use auth::Authenticator;
use auth::ResourceId;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;

/// Path parameter checked by [`validate_path_id`].
const ID_PARAM: &str = "id";

/// Middleware that validates the bearer token and stores the caller's
/// `AuthContext` in request extensions.
///
/// Any failure ends the request with 401; the wrapped handler never runs.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| reject(AuthorizationError::MalformedHeader))?),
        None => None,
    };

    let context = authenticator.authorize(header).map_err(reject)?;

    tracing::debug!(user_id = context.user_id, "Request authenticated");
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

fn reject(err: AuthorizationError) -> ApiError {
    tracing::warn!(code = err.code(), error = %err, "Token validation failed");
    ApiError::from(err)
}

/// Middleware that parses the `id` path parameter as a positive integer and
/// stores it in request extensions as a `ResourceId`.
///
/// Invalid ids end the request with 400; the wrapped handler never runs.
pub async fn validate_path_id(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = match &params {
        Ok(Path(params)) => params.get(ID_PARAM).map(String::as_str).unwrap_or_default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Path parameters could not be read");
            ""
        }
    };

    let id = ResourceId::parse(raw).map_err(|e| {
        tracing::warn!(error = %e, "Path id rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(id);

    Ok(next.run(req).await)
}
