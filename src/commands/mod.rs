pub mod execute;
pub mod export;
pub mod generate;
pub mod health;
pub mod interactive;
pub mod suites;
pub mod templates;

pub use execute::*;
pub use export::*;
pub use generate::*;
pub use health::*;
pub use interactive::*;
pub use suites::*;
pub use templates::*;

use crate::client::BackendClient;
use crate::config::Config;
use crate::error::Result;
use crate::utils::SuiteStore;

/// Dependencias compartidas por todos los comandos
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub client: BackendClient,
    pub store: SuiteStore,
}

impl Context {
    pub fn new(config: Config) -> Result<Self> {
        let client = BackendClient::new(&config)?;
        let store = SuiteStore::new(config.suites_dir());

        Ok(Self {
            config,
            client,
            store,
        })
    }
}
