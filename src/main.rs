use std::io;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use hrm_client::console::Console;
use hrm_client::{Config, EmployeeDirectory, HttpEmployeeApi, logging};

/// Manage employee records against the HR REST API.
#[derive(Debug, Parser)]
#[command(name = "hrm-client", version)]
struct Cli {
    /// API origin, e.g. http://127.0.0.1:8000 (overrides HRM_API_ORIGIN)
    #[arg(long)]
    api_origin: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(origin) = cli.api_origin {
        config.set_api_origin(origin)?;
    }

    let _guard = logging::init(&config);
    info!(api = %config.api_base_url(), "Client starting...");

    let api = HttpEmployeeApi::new(&config).context("Failed to build HTTP client")?;
    let directory = EmployeeDirectory::new(api);

    let console = Console::new(io::stdin().lock(), io::stdout()).with_locale(config.locale);
    console.run(&directory).await?;

    info!("Client stopped");
    Ok(())
}
