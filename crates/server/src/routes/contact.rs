use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use common::types::SuccessMessage;
use service::contact::ContactInput;
use tracing::{error, warn};

use crate::routes::auth::ServerState;

fn submission_failed() -> (StatusCode, Json<SuccessMessage>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(SuccessMessage::failure("Failed to submit message")))
}

#[utoipa::path(
    post, path = "/api/contact", tag = "contact",
    request_body = crate::openapi::ContactRequest,
    responses(
        (status = 200, description = "Inquiry stored"),
        (status = 500, description = "Inquiry could not be stored")
    )
)]
pub async fn submit(
    State(state): State<ServerState>,
    input: Result<Json<ContactInput>, JsonRejection>,
) -> (StatusCode, Json<SuccessMessage>) {
    let input = match input {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "contact body rejected");
            return submission_failed();
        }
    };
    match state.contact.submit(input).await {
        // the notification task keeps running after its handle is dropped
        Ok(_submission) => (StatusCode::OK, Json(SuccessMessage::ok("Message sent successfully"))),
        Err(e) => {
            error!(err = %e, "contact submission failed");
            submission_failed()
        }
    }
}
