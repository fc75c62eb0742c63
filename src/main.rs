use anyhow::Result;
use clap::Parser;

use mensa::cli::{Cli, Command};
use mensa::commands;
use mensa_core::{AppError, CanteenId, Config};

#[tokio::main]
async fn main() -> Result<()> {
    mensa_core::init()?;

    let cli = Cli::parse();
    if let Err(err) = execute(cli).await {
        let err = AppError::classify(err);
        tracing::error!("{:?}", err);
        eprintln!("Error: {}", err);
        if !matches!(err, AppError::Other(_)) {
            eprintln!("{}", err.user_message());
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(cli: Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    tracing::debug!("Using config file {}", path.display());

    match cli.command() {
        Command::Run => {
            let (config, _) = Config::load_validated_from(&path)?;
            commands::run(config).await?;
        }
        Command::Show => {
            let (config, _) = Config::load_validated_from(&path)?;
            let entities = commands::show(config).await?;
            println!("{}", serde_json::to_string_pretty(&entities)?);
        }
        Command::Discover { zone, radius } => {
            let (config, _) = Config::load_validated_from(&path)?;
            let choice = commands::discover(&config, &zone, radius).await?;
            for (id, label) in choice.options() {
                println!("{:>6}  {}", id, label);
            }
        }
        Command::Add {
            zone,
            radius,
            canteen,
        } => {
            let entry =
                commands::add_canteen(&path, &zone, radius, &CanteenId::from(canteen)).await?;
            println!("Added {} ({}) to {}", entry.title, entry.canteen_id, path.display());
        }
    }

    Ok(())
}
