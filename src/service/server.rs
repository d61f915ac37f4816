use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to read configuration: {0}")]
    Configuration(#[from] config::ConfigError),
    #[error("unable to build the engine: {0}")]
    Engine(#[from] cartouche_engine::resource::Error),
    #[error("unable to install the prometheus recorder: {0}")]
    Prometheus(#[from] metrics_exporter_prometheus::BuildError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Configuration {
    #[serde(default = "Configuration::default_host")]
    pub host: IpAddr,
    #[serde(default = "Configuration::default_port")]
    pub port: u16,
    //
    #[serde(default)]
    pub engine: cartouche_engine::Config,
    #[serde(default)]
    pub tracing: crate::service::tracing::Configuration,
}

impl Configuration {
    fn default_host() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
    }

    fn default_port() -> u16 {
        3000
    }

    fn address(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    pub fn from_path(path: &str) -> Result<Self, Error> {
        tracing::debug!("loading configuration from {path}");
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

pub struct Server {
    socket_address: SocketAddr,
    engine: Engine,
    store: Store,
    tracing: crate::service::tracing::Configuration,
    prometheus_handle: PrometheusHandle,
}

impl Server {
    /// Builds the server with an already installed prometheus recorder.
    pub fn new(config: Configuration, prometheus_handle: PrometheusHandle) -> Result<Self, Error> {
        Ok(Self {
            socket_address: config.address(),
            engine: Engine::try_from(config.engine)?,
            store: Store::default(),
            tracing: config.tracing,
            prometheus_handle,
        })
    }

    pub fn from_config(config: Configuration) -> Result<Self, Error> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        Self::new(config, handle)
    }

    pub fn app(self) -> axum::Router {
        use axum::extract::Extension;

        let router = crate::controller::create()
            .layer(Extension(self.engine))
            .layer(Extension(self.store))
            .layer(Extension(self.prometheus_handle));
        self.tracing.add_layer(router)
    }

    pub async fn run(self) -> Result<(), Error> {
        tracing::info!("starting server on {:?}", self.socket_address);
        let tcp_listener = TcpListener::bind(&self.socket_address).await?;

        axum::serve(tcp_listener, self.app().into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("unable to listen to ctrl+c: {err}");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("unable to listen to terminate signal: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
