use std::path::PathBuf;

use clap::{Args, Subcommand};
use pharma_api::ClientConfig;
use pharma_dashboard::error::{AppError, AppResult};

#[derive(Debug, Args)]
pub(crate) struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Print the effective configuration (file, then environment)
    Show,
    /// Write a config file with default values
    Init(InitArgs),
    /// Print where the config file is read from
    Path,
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub(crate) fn run(command: ConfigCommand, config_path: Option<PathBuf>) -> AppResult<()> {
    match command.command {
        ConfigSubcommand::Show => {
            let config = ClientConfig::load(config_path)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| AppError::internal(format!("Could not render config: {e}")))?;
            print!("{rendered}");
        }
        ConfigSubcommand::Init(args) => {
            let path = resolve_path(config_path)?;
            if path.exists() && !args.force {
                return Err(AppError::validation(format!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                )));
            }
            ClientConfig::new().save(Some(path.clone()))?;
            println!("Wrote {}", path.display());
        }
        ConfigSubcommand::Path => {
            println!("{}", resolve_path(config_path)?.display());
        }
    }
    Ok(())
}

fn resolve_path(config_path: Option<PathBuf>) -> AppResult<PathBuf> {
    config_path
        .or_else(ClientConfig::default_config_path)
        .ok_or_else(|| AppError::internal("No config directory available on this platform"))
}
