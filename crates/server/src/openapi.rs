use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

/// Arbitrary top-level fields; `title` is only an example.
#[derive(ToSchema)]
pub struct RecordFields { pub title: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::contact::submit,
        crate::routes::resources::list,
        crate::routes::resources::create,
        crate::routes::resources::update_singleton,
        crate::routes::resources::update,
        crate::routes::resources::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            ContactRequest,
            RecordFields,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "contact"),
        (name = "resources")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_api_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/login", "/api/contact", "/api/{resource}", "/api/{resource}/{id}", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
