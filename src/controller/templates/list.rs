use axum::extract::{Extension, Json};
use cartouche_engine::store::{Store, TemplatesState};
use cartouche_prelude::Template;

/// Templates known by the service and their loading state.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub(crate) struct TemplatesResponse {
    #[schema(value_type = Vec<Object>)]
    pub templates: Vec<Template>,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<TemplatesState> for TemplatesResponse {
    fn from(value: TemplatesState) -> Self {
        Self {
            templates: value.templates,
            loaded: value.loaded,
            error: value.error,
        }
    }
}

/// List the templates
#[utoipa::path(
    operation_id = "list_templates",
    get,
    path = "/templates",
    responses(
        (status = 200, description = "Current state of the templates.", body = TemplatesResponse),
    )
)]
pub(crate) async fn handler(Extension(store): Extension<Store>) -> Json<TemplatesResponse> {
    Json(store.snapshot().into())
}
