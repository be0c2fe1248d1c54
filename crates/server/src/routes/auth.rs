use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::types::{SuccessAck, SuccessMessage};
use service::auth::{domain::LoginInput, errors::AuthError, repo::document::DocumentCredentialRepository, AuthService};
use service::contact::ContactService;
use service::resource::ResourceStore;

fn invalid_credentials() -> Response {
    (StatusCode::UNAUTHORIZED, Json(SuccessMessage::failure("Invalid credentials"))).into_response()
}

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub resources: Arc<dyn ResourceStore>,
    pub contact: Arc<ContactService>,
    pub auth: Arc<AuthService<DocumentCredentialRepository>>,
}

#[utoipa::path(
    post, path = "/api/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted"),
        (status = 401, description = "Credentials rejected")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Response {
    // a body without both credentials is just another failed login
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "login body rejected");
            return invalid_credentials();
        }
    };
    match state.auth.login(input).await {
        Ok(()) => Json(SuccessAck::ok()).into_response(),
        Err(AuthError::Unauthorized) => invalid_credentials(),
        Err(e) => {
            tracing::error!(err = %e, code = e.code(), "login check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(SuccessMessage::failure("Login failed"))).into_response()
        }
    }
}
