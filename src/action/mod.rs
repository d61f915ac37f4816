mod apply;
mod openapi;
mod serve;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Server(#[from] cartouche::service::server::Error),
    #[error("unable to build the engine: {0}")]
    Engine(#[from] cartouche_engine::resource::Error),
    #[error("unable to read the map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(clap::Subcommand)]
pub(crate) enum Action {
    /// Run the Cartouche server
    Serve(serve::Action),
    /// Prints the open api schema
    OpenApi(openapi::Action),
    /// Applies a template on a map file and prints the produced actions
    Apply(apply::Action),
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), Error> {
        match self {
            Self::Serve(inner) => inner.execute().await,
            Self::OpenApi(inner) => inner.execute(),
            Self::Apply(inner) => inner.execute().await,
        }
    }
}
