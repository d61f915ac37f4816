pub mod error;
pub mod format;
pub mod merge;
pub mod replace;
pub mod resource;
pub mod store;
pub mod workflow;

use cartouche_prelude::{Action, CurrentMap, Request};
use resource::Session;
use std::sync::Arc;
use store::Store;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resources: resource::Config,
    #[serde(default)]
    pub templates: workflow::Config,
}

#[derive(Clone, Debug)]
pub struct Engine(Arc<workflow::Coordinator>);

impl TryFrom<Config> for Engine {
    type Error = resource::Error;

    fn try_from(value: Config) -> Result<Self, Self::Error> {
        let resources = value.resources.build()?;
        let coordinator = workflow::Coordinator::new(resources, value.templates);
        Ok(Self(Arc::new(coordinator)))
    }
}

impl Engine {
    /// Executes the request against the store and returns the produced
    /// actions, in the order they were emitted.
    pub async fn handle(
        &self,
        request: Request,
        store: &Store,
        current: &CurrentMap,
        session: &Session,
    ) -> Vec<Action> {
        self.0.handle(request, store, current, session).await
    }
}
