pub(crate) mod clear;
pub(crate) mod list;
pub(crate) mod merge;
pub(crate) mod panel;
pub(crate) mod replace;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use cartouche_engine::resource::Session;
use cartouche_prelude::map::MapId;
use cartouche_prelude::{Action, CurrentMap, MapConfiguration};

/// Map displayed by the client when the template is applied.
#[derive(Debug, Default, serde::Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MapPayload {
    /// Identifier of the map, as a number or a name.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub map_id: Option<MapId>,
    /// Current map configuration.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: MapConfiguration,
}

impl From<MapPayload> for CurrentMap {
    fn from(value: MapPayload) -> Self {
        Self {
            map_id: value.map_id,
            config: value.config,
        }
    }
}

/// Actions produced by a request, in the order they were emitted.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub(crate) struct DispatchResponse {
    #[schema(value_type = Vec<Object>)]
    pub actions: Vec<Action>,
}

impl From<Vec<Action>> for DispatchResponse {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

fn session(headers: &HeaderMap) -> Session {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(Session::authorized)
        .unwrap_or_default()
}
