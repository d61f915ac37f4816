use super::{DispatchResponse, MapPayload};
use crate::error::ServerError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json, Path};
use axum::http::HeaderMap;
use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use cartouche_prelude::Request;

/// Merge a template into the current map
///
/// The layers, groups and backgrounds of the template are added to the
/// current map, keeping the current view. Failures are reported as a
/// `SHOW_ERROR` action.
#[utoipa::path(
    operation_id = "merge_template",
    post,
    path = "/templates/{id}/merge",
    params(
        ("id" = String, Path, description = "Identifier of the template.")
    ),
    request_body(content = MapPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Actions produced by the merge.", body = DispatchResponse),
        (status = 400, description = "The map payload is invalid.", body = ServerError),
    )
)]
pub(crate) async fn handler(
    Extension(engine): Extension<Engine>,
    Extension(store): Extension<Store>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<MapPayload>, JsonRejection>,
) -> Result<Json<DispatchResponse>, ServerError> {
    let Json(payload) = payload?;
    let actions = engine
        .handle(
            Request::MergeTemplate { id },
            &store,
            &payload.into(),
            &super::session(&headers),
        )
        .await;
    Ok(Json(actions.into()))
}
