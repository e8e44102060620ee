use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode};
use skyview_core::{
    Config, Coordinates, FixedPosition, GoogleMapsClient, PositionSource, WeatherError,
    WeatherStore, config::PLACEHOLDER_API_KEY, get_current_location, provider::ConditionsSource,
};

use crate::render;

const SAMPLE_COORDINATES: Coordinates = Coordinates { latitude: 40.7128, longitude: -74.0060 };

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather for a site")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Google Maps Platform API key and an optional default location.
    Configure,

    /// Show current weather for a location.
    Show {
        #[command(flatten)]
        at: CoordinateArgs,

        /// Print the weather record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check that the geocoding and weather endpoints accept the configured key.
    Check {
        #[command(flatten)]
        at: CoordinateArgs,
    },
}

#[derive(Debug, Args)]
pub struct CoordinateArgs {
    /// Latitude in decimal degrees.
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
}

impl CoordinateArgs {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { at, json } => show(&at, json).await,
            Command::Check { at } => {
                check(at.coordinates().unwrap_or(SAMPLE_COORDINATES)).await;
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("Google Maps Platform API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Needs the Geocoding API and the Weather API enabled")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let latitude = CustomType::<f64>::new("Default latitude (optional):")
        .with_error_message("Please enter a number")
        .prompt_skippable()
        .context("Failed to read latitude")?;

    if let Some(latitude) = latitude {
        let longitude = CustomType::<f64>::new("Default longitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read longitude")?;
        config.default_location = Some(Coordinates::new(latitude, longitude));
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(at: &CoordinateArgs, json: bool) -> Result<()> {
    let config = Config::load()?;

    let at = match at.coordinates() {
        Some(at) => at,
        None => {
            let source = config.default_location.map(FixedPosition);
            get_current_location(source.as_ref().map(|s| s as &dyn PositionSource))
                .await
                .context("No coordinates given; pass --lat/--lng or configure a default location")?
        }
    };

    tracing::debug!("looking up weather at {at}");
    let store = WeatherStore::from_client(GoogleMapsClient::from_config(&config));
    store.fetch_weather_data(at).await;

    let state = store.snapshot();
    if let Some(error) = state.error {
        bail!(error);
    }

    let Some(view) = state.weather_data else {
        bail!("No weather data returned");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::weather_view(&view));
    }
    Ok(())
}

async fn check(at: Coordinates) {
    let config = config_or_default(Config::load());
    let client = GoogleMapsClient::from_config(&config);

    println!("Testing coordinates: {at}");
    if client.api_key() == PLACEHOLDER_API_KEY {
        println!("No API key configured. Run `skyview configure` or set GOOGLE_MAPS_API_KEY.");
        return;
    }
    println!("API key: {}", render::mask_key(client.api_key()));

    println!("\n1. Geocoding API");
    match client.geocode(at).await {
        Ok(response) if response.status == "OK" => {
            println!("   OK: {}", response.first_address().unwrap_or_default());
        }
        Ok(response) => {
            println!(
                "   FAILED: {}",
                response.error_message.as_deref().unwrap_or(&response.status)
            );
        }
        Err(err) => report_failure(&err),
    }

    println!("\n2. Weather API");
    match client.current_conditions(at).await {
        Ok(raw) => {
            println!("   OK");
            print!("{}", render::raw_summary(&raw));
        }
        Err(err) => report_failure(&err),
    }
}

/// Fall back to an empty config when the file cannot be read.
fn config_or_default(loaded: Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!("Could not load configuration ({err:#}); using defaults");
        Config::default()
    })
}

fn report_failure(err: &WeatherError) {
    println!("   FAILED: {err}");
    for hint in render::troubleshooting(err) {
        println!("   - {hint}");
    }
}
