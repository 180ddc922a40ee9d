use std::time::Duration;

use anyhow::{Context, bail};
use citycast_core::{City, Config, Session, format, provider_from_config, service};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, Select};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather lookup")]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// List cities matching a name.
    Search {
        /// City name, e.g. "London" or "London,GB".
        query: String,
    },

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name, e.g. "London" or "London,GB".
        query: String,

        /// Take the first match instead of asking.
        #[arg(long)]
        first: bool,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Re-fetch every N seconds until interrupted.
        #[arg(long, value_name = "SECS")]
        refresh_every: Option<u64>,
    },
}

/// Install the stderr log subscriber.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { query } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;

                let cities = service::search(provider.as_ref(), &query, config.search_limit).await;
                if cities.is_empty() {
                    println!("No cities found for \"{query}\".");
                }
                for city in &cities {
                    println!("{}  ({:.4}, {:.4})", format::city_label(city), city.lat, city.lon);
                }
                Ok(())
            }
            Command::Show { query, first, json, refresh_every } => {
                let config = Config::load()?;
                let session = Session::new(provider_from_config(&config)?, config.search_limit);
                show(session, &config, &query, first, json, refresh_every).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;

    info!(path = %path.display(), "configuration saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn show(
    mut session: Session,
    config: &Config,
    query: &str,
    first: bool,
    json: bool,
    refresh_every: Option<u64>,
) -> anyhow::Result<()> {
    let candidates = session.search(query).await.candidates.clone();
    let city = pick_city(candidates, query, first)?;

    session.select(city).await;

    let Some(secs) = refresh_every else {
        if let Some(message) = &session.state().error {
            bail!("{message}");
        }
        return print_state(&session, config, json);
    };
    print_state(&session, config, json)?;

    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!("refreshing");
                session.refresh().await;
                print_state(&session, config, json)?;
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn pick_city(mut candidates: Vec<City>, query: &str, first: bool) -> anyhow::Result<City> {
    if candidates.is_empty() {
        bail!("No cities found for \"{query}\".");
    }
    if first || candidates.len() == 1 {
        return Ok(candidates.swap_remove(0));
    }

    let labels: Vec<String> = candidates.iter().map(format::city_label).collect();
    let choice = Select::new("Which one?", labels)
        .raw_prompt()
        .context("Failed to read city selection")?;

    Ok(candidates.swap_remove(choice.index))
}

fn print_state(session: &Session, config: &Config, json: bool) -> anyhow::Result<()> {
    let state = session.state();

    if let Some(message) = &state.error {
        eprintln!("{message}");
        return Ok(());
    }
    let Some(report) = &state.weather else {
        return Ok(());
    };

    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print!("{}", render::report(report, &config.icon_base_url));
    }
    Ok(())
}
