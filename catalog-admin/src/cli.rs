use std::time::Duration;

use catalog_client::ClientConfig;
use catalog_client::config::DEFAULT_BASE_URL;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "catalog-admin")]
#[command(about = "Catalog administration console")]
#[command(version)]
pub struct Cli {
    /// Catalog API base URL
    #[arg(long, env = "CATALOG_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds (none when unset)
    #[arg(long, env = "CATALOG_REQUEST_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the category tree
    Tree,
    /// List a resource
    List {
        resource: ResourceKind,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a category
    CreateCategory {
        #[arg(long)]
        name: String,
        /// Parent category id
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        /// Mark the category as a container
        #[arg(long)]
        container: bool,
    },
    /// Delete an entity by id
    Delete { resource: ResourceKind, id: i64 },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Categories,
    Products,
    Variations,
    ProductGroups,
}

impl Cli {
    /// Environment defaults overridden by the command line
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        config.base_url = self.api_url.clone();
        config.timeout = self.timeout.map(Duration::from_secs);
        config
    }
}
