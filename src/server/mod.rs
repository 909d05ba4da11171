mod api;
mod error;
mod state;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use self::error::ApiError;
pub use self::state::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::create_person_handler,
        api::list_persons_handler,
        api::get_person_handler,
        api::set_vector_handler,
        api::delete_person_handler,
        api::compare_handler,
        api::metrics_handler,
    ),
    components(schemas(
        crate::db::Person,
        types::CreatePersonRequest,
        types::SetVectorForm,
        types::PersonId,
    ))
)]
pub struct ApiDoc;

/// 构建API服务器
pub fn create_app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/person/create/", post(api::create_person_handler))
        .route("/persons/", get(api::list_persons_handler))
        .route(
            "/person/detail/{id}/",
            get(api::get_person_handler)
                .put(api::set_vector_handler)
                .delete(api::delete_person_handler),
        )
        .route("/persons/compare/{pair}/", get(api::compare_handler));

    Router::new()
        .nest("/api/v1", api)
        .route("/metrics", get(api::metrics_handler))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.body_limit))
        .with_state(state)
}
