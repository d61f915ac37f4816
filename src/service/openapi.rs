use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi, serde::Serialize)]
#[openapi(
    paths(
        crate::controller::metrics::handler,
        crate::controller::status::handler,
        crate::controller::templates::list::handler,
        crate::controller::templates::panel::handler,
        crate::controller::templates::merge::handler,
        crate::controller::templates::replace::handler,
        crate::controller::templates::clear::handler,
    ),
    components(schemas(
        crate::error::ServerError,
        crate::controller::templates::DispatchResponse,
        crate::controller::templates::MapPayload,
        crate::controller::templates::list::TemplatesResponse,
    ))
)]
pub struct ApiDoc;

pub(crate) fn service() -> SwaggerUi {
    SwaggerUi::new("/swagger").url("/openapi.json", ApiDoc::openapi())
}
