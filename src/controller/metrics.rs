use axum::extract::Extension;
use metrics_exporter_prometheus::PrometheusHandle;

/// Check the metrics of the service
///
/// Returns the template workflow counters using the prometheus format.
#[utoipa::path(
    operation_id = "metrics",
    get,
    path = "/metrics",
    responses(
        (
            status = 200,
            description = "Prometheus format of the metrics of the service.",
            body = String,
            example = json!("# TYPE template_workflow counter\ntemplate_workflow{request=\"merge_template\"} 1\n"),
        ),
    )
)]
pub(crate) async fn handler(Extension(handle): Extension<PrometheusHandle>) -> String {
    handle.render()
}

