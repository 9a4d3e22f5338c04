use std::io::{self, StdoutLock, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pharma_api::{ClientConfig, HttpBackend};
use pharma_dashboard::commands::dashboard::check_health;
use pharma_dashboard::error::{AppError, AppResult};
use pharma_dashboard::render::{self, CurrencyFormat};
use serde::Serialize;
use tracing::debug;

mod config;
mod dashboard;
mod inventory;
mod medicine;
mod sell;

#[derive(Debug, Parser)]
#[command(name = "pharma-dashboard", about = "Pharmacy CRM dashboard", long_about = None)]
pub(crate) struct Cli {
    /// Config file; defaults to pharmacy.toml in the platform config dir
    #[arg(long, global = true, env = "PHARMA_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Today's figures and recent sales
    Dashboard(dashboard::DashboardArgs),
    /// Catalog table with search and status filter
    Inventory(inventory::InventoryArgs),
    /// Record a sale
    Sell(sell::SellArgs),
    /// Add, update or delete a medicine
    Medicine(medicine::MedicineCommand),
    /// Check that the backend is reachable
    Health,
    /// Show or create the config file
    Config(config::ConfigCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> AppResult<()> {
        let Cli {
            config: config_path,
            api_url,
            json,
            command,
        } = self;

        // Config subcommands must run even when the current config is invalid
        let context = || Context::load(config_path.clone(), api_url.clone(), json);

        match command {
            Commands::Config(command) => config::run(command, config_path.clone()),
            Commands::Dashboard(args) => dashboard::run(args, &context()?).await,
            Commands::Inventory(args) => inventory::run(args, &context()?).await,
            Commands::Sell(args) => sell::run(args, &context()?).await,
            Commands::Medicine(command) => medicine::run(command, &context()?).await,
            Commands::Health => {
                let ctx = context()?;
                let health = check_health(&ctx.backend).await?;
                ctx.print(&health, |out| render::write_health(out, &health))
            }
        }
    }
}

/// Everything a subcommand needs to talk to the backend and print.
pub(crate) struct Context {
    pub config: ClientConfig,
    pub backend: HttpBackend,
    pub currency: CurrencyFormat,
    json: bool,
}

impl Context {
    fn load(
        config_path: Option<PathBuf>,
        api_url: Option<String>,
        json: bool,
    ) -> AppResult<Self> {
        let mut config = ClientConfig::load(config_path)?;
        if let Some(url) = api_url {
            config.backend.base_url = url;
            config.validate()?;
        }

        let backend = HttpBackend::new(&config)?;
        debug!(base_url = %backend.base_url(), "Backend client ready");

        let currency = CurrencyFormat::from(&config.display);
        Ok(Context {
            config,
            backend,
            currency,
            json,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.config.backend.catalog_page_size
    }

    /// Prints `value` as JSON with `--json`, otherwise through `table`.
    pub fn print<T, F>(&self, value: &T, table: F) -> AppResult<()>
    where
        T: Serialize,
        F: FnOnce(&mut StdoutLock<'static>) -> io::Result<()>,
    {
        let mut stdout = io::stdout().lock();
        if self.json {
            serde_json::to_writer_pretty(&mut stdout, value)
                .map_err(|e| AppError::internal(format!("Could not encode output: {e}")))?;
            writeln!(stdout)?;
        } else {
            table(&mut stdout)?;
        }
        Ok(())
    }
}
