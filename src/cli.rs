//! Command-line interface parsing.

use clap::{Parser, Subcommand};
use mensa_core::config::DEFAULT_RADIUS_KM;
use std::path::PathBuf;

/// OpenMensa canteen menus as polled sensors
#[derive(Parser, Debug)]
#[command(name = "mensa")]
#[command(about = "OpenMensa canteen menus as polled sensors")]
#[command(version)]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set up every configured canteen and keep the menus fresh until Ctrl-C
    Run,

    /// Set up once and print the sensor states as JSON
    Show,

    /// List canteens near a configured zone
    Discover {
        /// Zone entity id, e.g. zone.home
        #[arg(long)]
        zone: String,

        /// Search radius in kilometres
        #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: u32,
    },

    /// Add a canteen near a zone to the configuration
    Add {
        #[arg(long)]
        zone: String,

        #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: u32,

        /// Canteen id as listed by `discover`
        #[arg(long)]
        canteen: String,
    },
}

impl Cli {
    /// The subcommand to run; `run` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
