use super::DispatchResponse;
use axum::extract::{Extension, Json};
use axum::http::HeaderMap;
use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use cartouche_prelude::{CurrentMap, Request};

/// Clear the templates
///
/// Forgets the loaded templates and their data, the next opening of the panel
/// loads them again.
#[utoipa::path(
    operation_id = "clear_templates",
    delete,
    path = "/templates",
    responses(
        (status = 200, description = "The templates have been cleared.", body = DispatchResponse),
    )
)]
pub(crate) async fn handler(
    Extension(engine): Extension<Engine>,
    Extension(store): Extension<Store>,
    headers: HeaderMap,
) -> Json<DispatchResponse> {
    let actions = engine
        .handle(
            Request::ClearTemplates,
            &store,
            &CurrentMap::default(),
            &super::session(&headers),
        )
        .await;
    Json(actions.into())
}
