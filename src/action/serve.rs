use cartouche::service::server::{Configuration, Server};

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
}

impl Action {
    pub(crate) async fn execute(self) -> Result<(), super::Error> {
        let config = Configuration::from_path(&self.config_path)?;
        Server::from_config(config)?.run().await?;
        Ok(())
    }
}
