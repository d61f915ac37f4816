use super::DispatchResponse;
use axum::extract::{Extension, Json};
use axum::http::HeaderMap;
use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use cartouche_prelude::{CurrentMap, Request};

/// Open the templates panel
///
/// Enables the templates control and loads the templates of the current
/// context, the first time only.
#[utoipa::path(
    operation_id = "open_templates_panel",
    post,
    path = "/templates/panel",
    responses(
        (status = 200, description = "Actions produced by the opening of the panel.", body = DispatchResponse),
    )
)]
pub(crate) async fn handler(
    Extension(engine): Extension<Engine>,
    Extension(store): Extension<Store>,
    headers: HeaderMap,
) -> Json<DispatchResponse> {
    let actions = engine
        .handle(
            Request::OpenTemplatesPanel,
            &store,
            &CurrentMap::default(),
            &super::session(&headers),
        )
        .await;
    Json(actions.into())
}
