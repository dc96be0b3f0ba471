//! relay CLI: run the relay, check config, preview the pipeline. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use relay_bot::cli::{config_report, preview, preview_report};
use relay_bot::config::load_pipeline_config;
use relay_bot::{load_env_file, run_bot, Cli, Commands, RelayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_env_file(cli.env_file.as_deref())?;

    match cli.command {
        Commands::Run { token } => {
            let config = RelayConfig::load(token)?;
            run_bot(config).await
        }
        Commands::CheckConfig => {
            let config = RelayConfig::load(None)?;
            config.validate()?;
            print!("{}", config_report(&config));
            println!("Config OK");
            Ok(())
        }
        Commands::Preview {
            text,
            caption,
            origin,
        } => {
            let outcome = preview(load_pipeline_config()?, text, caption, origin)?;
            print!("{}", preview_report(&outcome));
            Ok(())
        }
    }
}
