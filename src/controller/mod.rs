pub(crate) mod metrics;
pub(crate) mod status;
pub(crate) mod templates;

use axum::routing::{get, head, post, Router};

pub(crate) fn create() -> Router {
    Router::new()
        .route("/status", head(status::handler))
        .route("/metrics", get(metrics::handler))
        .route(
            "/templates",
            get(templates::list::handler).delete(templates::clear::handler),
        )
        .route("/templates/panel", post(templates::panel::handler))
        .route("/templates/{id}/merge", post(templates::merge::handler))
        .route("/templates/{id}/replace", post(templates::replace::handler))
        .merge(crate::service::openapi::service())
}
