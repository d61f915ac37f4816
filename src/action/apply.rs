use cartouche::service::server::Configuration;
use cartouche_engine::resource::Session;
use cartouche_engine::store::Store;
use cartouche_engine::Engine;
use cartouche_prelude::{CurrentMap, Request};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(crate) struct Target {
    /// Identifier of the template in the resource catalog.
    pub id: String,
    /// Json file containing the current map, an empty map is used otherwise.
    #[clap(long)]
    pub map: Option<PathBuf>,
}

impl Target {
    fn current_map(&self) -> Result<CurrentMap, super::Error> {
        let Some(ref path) = self.map else {
            return Ok(CurrentMap::default());
        };
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(clap::Subcommand)]
pub(crate) enum Mode {
    /// Merges the template into the map
    Merge(Target),
    /// Replaces the map with the template
    Replace(Target),
}

#[derive(clap::Parser)]
pub(crate) struct Action {
    /// Path to the configuration toml file, default to /etc/cartouche/cartouche.toml.
    #[clap(
        short,
        long,
        default_value = "/etc/cartouche/cartouche.toml",
        env = "CARTOUCHE_CONFIG"
    )]
    pub config_path: String,
    /// Authorization header sent to the resource catalog.
    #[clap(long, env = "CARTOUCHE_AUTHORIZATION")]
    pub authorization: Option<String>,

    #[command(subcommand)]
    pub mode: Mode,
}

impl Action {
    fn session(&self) -> Session {
        match self.authorization {
            Some(ref value) => Session::authorized(value.as_str()),
            None => Session::anonymous(),
        }
    }

    pub(crate) async fn execute(self) -> Result<(), super::Error> {
        let config = Configuration::from_path(&self.config_path)?;
        let engine = Engine::try_from(config.engine)?;
        let (request, current) = match self.mode {
            Mode::Merge(ref target) => (
                Request::MergeTemplate {
                    id: target.id.clone(),
                },
                target.current_map()?,
            ),
            Mode::Replace(ref target) => (
                Request::ReplaceTemplate {
                    id: target.id.clone(),
                },
                target.current_map()?,
            ),
        };
        let actions = engine
            .handle(request, &Store::default(), &current, &self.session())
            .await;
        println!("{}", serde_json::to_string_pretty(&actions)?);
        Ok(())
    }
}
