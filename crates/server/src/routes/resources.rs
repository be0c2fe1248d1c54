use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use common::types::SuccessAck;
use serde_json::Value;
use service::resource::Fields;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

type JsonBody = Result<Json<Value>, JsonRejection>;

fn object_body(body: JsonBody) -> Result<Fields, JsonApiError> {
    let Json(body) = body?;
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(JsonApiError::bad_request("request body must be a JSON object")),
    }
}

/// Return a collection array or a singleton object.
#[utoipa::path(
    get, path = "/api/{resource}", tag = "resources",
    params(("resource" = String, Path, description = "posts, services, metrics, process, messages or hero")),
    responses((status = 200, description = "Resource content"), (status = 404, description = "Unknown resource"))
)]
pub async fn list(State(state): State<ServerState>, Path(resource): Path<String>) -> Result<Json<Value>, JsonApiError> {
    Ok(Json(state.resources.list(&resource).await?))
}

/// Create a record (collections) or replace the object (singletons).
#[utoipa::path(
    post, path = "/api/{resource}", tag = "resources",
    params(("resource" = String, Path, description = "Resource name")),
    request_body = crate::openapi::RecordFields,
    responses((status = 200, description = "Created record with id and created_at"), (status = 404, description = "Unknown resource"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    body: JsonBody,
) -> Result<Json<Value>, JsonApiError> {
    let fields = object_body(body)?;
    Ok(Json(state.resources.create(&resource, fields).await?))
}

/// Shallow-merge fields into a singleton such as `hero`.
#[utoipa::path(
    put, path = "/api/{resource}", tag = "resources",
    params(("resource" = String, Path, description = "Singleton resource name")),
    request_body = crate::openapi::RecordFields,
    responses((status = 200, description = "Full merged object"), (status = 405, description = "Resource is a collection"))
)]
pub async fn update_singleton(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    body: JsonBody,
) -> Result<Json<Value>, JsonApiError> {
    let fields = object_body(body)?;
    Ok(Json(state.resources.update_singleton(&resource, fields).await?))
}

#[utoipa::path(
    put, path = "/api/{resource}/{id}", tag = "resources",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body = crate::openapi::RecordFields,
    responses((status = 200, description = "Updated record"), (status = 404, description = "No record with this id"))
)]
pub async fn update(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, String)>,
    body: JsonBody,
) -> Result<Json<Value>, JsonApiError> {
    let fields = object_body(body)?;
    Ok(Json(state.resources.update(&resource, &id, fields).await?))
}

/// Idempotent: unknown ids also answer `{"success": true}`.
#[utoipa::path(
    delete, path = "/api/{resource}/{id}", tag = "resources",
    params(
        ("resource" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses((status = 200, description = "Deleted or already absent"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<SuccessAck>, JsonApiError> {
    state.resources.delete(&resource, &id).await?;
    Ok(Json(SuccessAck::ok()))
}

pub async fn api_not_found() -> JsonApiError {
    JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Not Found", None)
}
