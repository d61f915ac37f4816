use axum::http::header::AUTHORIZATION;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::{Level, Span};

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Configuration {
    /// Header holding the request id, recorded on the request span.
    #[serde(default)]
    pub header: Option<String>,
}

impl Configuration {
    pub fn add_layer(&self, router: axum::Router) -> axum::Router {
        let make_span = RequestMakeSpan {
            header: self.header.clone(),
        };
        router.layer(TraceLayer::new_for_http().make_span_with(make_span))
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestMakeSpan {
    header: Option<String>,
}

impl<B> MakeSpan<B> for RequestMakeSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = self
            .header
            .as_ref()
            .and_then(|name| request.headers().get(name.as_str()))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        tracing::span!(
            Level::DEBUG,
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            request_id = %request_id,
            authenticated = request.headers().contains_key(AUTHORIZATION),
        )
    }
}

