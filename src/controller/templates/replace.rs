use super::{DispatchResponse, MapPayload};
use crate::error::ServerError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json, Path};
use axum::http::HeaderMap;
use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use cartouche_prelude::Request;

/// Replace the current map with a template
///
/// The current zoom and center are kept when the template doesn't define them.
#[utoipa::path(
    operation_id = "replace_template",
    post,
    path = "/templates/{id}/replace",
    params(
        ("id" = String, Path, description = "Identifier of the template.")
    ),
    request_body(content = MapPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Actions produced by the replacement.", body = DispatchResponse),
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
            Request::ReplaceTemplate { id },
            &store,
            &payload.into(),
            &super::session(&headers),
        )
        .await;
    Ok(Json(actions.into()))
}
