//! Clients of the resource catalog where the templates are stored.

pub mod http;
pub mod local;
pub mod prelude;

use cartouche_prelude::TemplateData;
pub use prelude::{Error, Resource, SearchFilter, SearchOptions, Session};

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Config {
    Local(local::Config),
    Http(http::Config),
}

impl Default for Config {
    fn default() -> Self {
        Self::Local(local::Config::default())
    }
}

impl Config {
    pub fn build(&self) -> Result<ResourceClient, Error> {
        tracing::debug!("building resource client");
        match self {
            Self::Local(item) => Ok(ResourceClient::Local(item.clone().into())),
            Self::Http(item) => Ok(ResourceClient::Http(item.build()?)),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ResourceClient {
    Local(local::LocalResourceClient),
    Http(http::HttpResourceClient),
}

impl ResourceClient {
    fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Http(_) => "http",
        }
    }

    fn track(&self, operation: &'static str, err: Error) -> Error {
        metrics::counter!(
            "resource_api_error",
            "client" => self.name(),
            "operation" => operation,
            "reason" => err.reason()
        )
        .increment(1);
        err
    }

    pub async fn search(
        &self,
        filter: &SearchFilter,
        options: &SearchOptions,
        session: &Session,
    ) -> Result<Vec<Resource>, Error> {
        let result = match self {
            Self::Local(inner) => inner.search(filter, options).await,
            Self::Http(inner) => inner.search(filter, options, session).await,
        };
        result.map_err(|err| self.track("search", err))
    }

    pub async fn get_data(&self, id: &str, session: &Session) -> Result<TemplateData, Error> {
        let result = match self {
            Self::Local(inner) => inner.get_data(id).await,
            Self::Http(inner) => inner.get_data(id, session).await,
        };
        result.map_err(|err| self.track("get_data", err))
    }
}
