//! HTTP routing and OpenAPI documentation.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the router with every trust-list and contacts endpoint and Swagger UI at `/api/docs`.
///
/// # Registered Endpoints
/// - `GET /api/trust` - All four trust lists
/// - `POST /api/trust/{state}/{kind}/add` - Add an entity by ID or name
/// - `POST /api/trust/{state}/{kind}/remove` - Remove an entity by ID
/// - `PUT /api/trust/{state}/{kind}/comment` - Replace an entry's comment
/// - `POST /api/contacts/add` - Write trusted entities to a character's contacts
/// - `POST /api/contacts/delete` - Remove untrusted entities from a character's contacts
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, esi_client, http_client, esi_url };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Trustlist", description = "Trustlist API"), tags(
        (name = controller::trust::TRUST_TAG, description = "Trusted & untrusted list routes"),
        (name = controller::contacts::CONTACTS_TAG, description = "In-game contacts routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::trust::get_trust_lists))
        .routes(routes!(controller::trust::add_entity))
        .routes(routes!(controller::trust::remove_entity))
        .routes(routes!(controller::trust::update_comment))
        .routes(routes!(controller::contacts::add_contacts))
        .routes(routes!(controller::contacts::delete_contacts))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
