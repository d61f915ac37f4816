use axum::http::StatusCode;

/// Check the status of the service
///
/// If the service is up and running correctly, it will return a 204.
#[utoipa::path(
    operation_id = "status",
    head,
    path = "/status",
    responses(
        (status = 204, description = "The service is healthy."),
    )
)]
pub(crate) async fn handler() -> StatusCode {
    metrics::counter!("status_check").increment(1);
    StatusCode::NO_CONTENT
}
