use clap::{Parser, Subcommand};
use sunspotter_core::{Config, fetcher_from_config};

use crate::session;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "sunspotter", version, about = "Will it be sunny?")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Look up the forecast for a zip code once and exit.
    Show {
        /// Zip code to search for.
        zip: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { zip }) => show(&zip).await,
            // No subcommand: the interactive search screen.
            None => session::run().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(zip: &str) -> anyhow::Result<()> {
    let zip = zip.trim();
    anyhow::ensure!(!zip.is_empty(), "Please enter a zip code");

    let config = Config::load()?;
    let fetcher = fetcher_from_config(&config)?;
    let report = fetcher.forecast(zip).await?;

    print!("{}", session::render(&report));
    Ok(())
}
