use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use skycast_core::{
    Config, Coordinates, CurationPipeline, NewsCategory, ProviderId, Settings, SettingsStore,
    StaticGeolocation, Unit,
    provider::{geocoder_from_config, news_client_from_config, weather_client_from_config},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Local weather with mood-matched headlines")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key for a provider.
    Configure {
        /// Provider short name: "openweather" or "newsapi".
        provider: String,
    },

    /// Show current weather, the forecast and curated headlines.
    Show {
        /// Latitude of the position to use; overrides the config file.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the position to use; overrides the config file.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Unit system: metric or imperial.
        #[arg(long, default_value = "imperial")]
        unit: Unit,

        /// Preferred news topic. Repeatable; only the first one is sent.
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<NewsCategory>,

        /// Treat location permission as denied.
        #[arg(long)]
        no_location: bool,

        /// Print the settled state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the selectable news topics.
    Categories,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show {
                lat,
                lon,
                unit,
                categories,
                no_location,
                json,
            } => {
                let config = Config::load()?;

                let fix = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                    _ => config.location.coordinates(),
                };
                let allowed = config.location.enabled && !no_location;
                let geolocation = StaticGeolocation::new(allowed, fix);

                let settings = SettingsStore::new(Settings {
                    unit,
                    categories: Vec::new(),
                });
                settings.set_categories(categories);

                let pipeline = CurationPipeline::new(
                    Arc::new(geolocation),
                    Arc::new(geocoder_from_config(&config)?),
                    Arc::new(weather_client_from_config(&config)),
                    Arc::new(news_client_from_config(&config)),
                    settings,
                );

                let state = pipeline.run().await;

                if json {
                    let out = serde_json::to_string_pretty(&state)
                        .context("Failed to serialize result to JSON")?;
                    println!("{out}");
                } else {
                    print!("{}", crate::render::StateView(&state));
                }
                Ok(())
            }
            Command::Categories => {
                for category in NewsCategory::all() {
                    println!("{:<14} {}", category.as_str(), category.label());
                }
                Ok(())
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if config.is_provider_configured(id) {
        println!("Provider '{id}' already has an API key; entering a new one replaces it.");
    }

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, api_key);
    config.save()?;

    println!(
        "Saved API key for '{id}' to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_repeated_categories() {
        let cli = Cli::try_parse_from([
            "skycast",
            "show",
            "--lat",
            "-33.86",
            "--lon",
            "151.2",
            "--unit",
            "metric",
            "--category",
            "health",
            "--category",
            "business",
        ])
        .expect("valid args");

        match cli.command {
            Command::Show {
                lat,
                lon,
                unit,
                categories,
                no_location,
                json,
            } => {
                assert_eq!(lat, Some(-33.86));
                assert_eq!(lon, Some(151.2));
                assert_eq!(unit, Unit::Metric);
                assert_eq!(categories, vec![NewsCategory::Health, NewsCategory::Business]);
                assert!(!no_location);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_defaults_to_imperial() {
        let cli = Cli::try_parse_from(["skycast", "show"]).expect("valid args");
        match cli.command {
            Command::Show { unit, .. } => assert_eq!(unit, Unit::Imperial),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["skycast", "show", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(Cli::try_parse_from(["skycast", "show", "--category", "sports"]).is_err());
    }

    #[test]
    fn verbose_counts() {
        let cli = Cli::try_parse_from(["skycast", "-vv", "categories"]).expect("valid args");
        assert_eq!(cli.verbose, 2);
    }
}
