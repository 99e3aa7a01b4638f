//! catalog-admin: command-line console for the catalog API
//!
//! Configuration comes from `.env`, the environment and the command line,
//! in increasing priority:
//!
//! ```text
//! CATALOG_API_URL=http://localhost:8000 catalog-admin tree
//! catalog-admin list products --json
//! catalog-admin create-category --name Tea --parent 1
//! catalog-admin delete variations 9
//! ```

mod cli;
mod commands;
mod logging;
mod notify;

use std::sync::Arc;

use catalog_client::CatalogState;
use clap::Parser;

use cli::Cli;
use notify::ConsoleNotifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    logging::init();

    let cli = Cli::parse();
    let config = cli.client_config();
    tracing::info!(base_url = %config.base_url, "connecting to catalog API");

    let http = config.build_http_client()?;
    let catalog = CatalogState::with_notifier(http, &config, Arc::new(ConsoleNotifier));

    let output = commands::run(&catalog, cli.command).await?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
