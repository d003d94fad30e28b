use crate::app_container::Application;
use crate::config::Settings;
use clap::{Args, Parser, Subcommand};
use community::contracts::login::Credentials;
use community::contracts::suggest_event::EventSuggestion;
use secrecy::Secret;
use std::path::PathBuf;

mod app_container;
mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "dashboard",
    about = "Nightlife activity across the governorates of Tunisia",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current activity and print the heatmap legend and levels
    Map {
        /// Also write the colored governorate boundaries as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },

    /// Select a governorate and print its details
    Show {
        governorate: String,

        #[arg(long, env = "DASHBOARD_USERNAME", requires = "password")]
        username: Option<String>,

        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Check credentials against the api
    Login(LoginArgs),

    /// Create an account
    Register(LoginArgs),

    /// Suggest an event for review
    Suggest {
        #[command(flatten)]
        login: LoginArgs,

        /// Governorate the event takes place in
        #[arg(long)]
        city: String,

        #[arg(long)]
        name: String,

        /// Ticket or social media link
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "")]
        place: String,

        #[arg(long, default_value = "")]
        date: String,

        #[arg(long, default_value = "")]
        price: String,
    },
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long, env = "DASHBOARD_USERNAME")]
    username: String,

    #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    fn into_credentials(self) -> anyhow::Result<Credentials> {
        Ok(Credentials::new(self.username, Secret::new(self.password))?)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::parse()?;
    shared_kernel::tracing::config_telemetry("dashboard", &settings.telemetry)?;
    let result = start(cli, settings).await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    let app = Application::new(settings.api.base_url)?;

    match cli.command {
        Commands::Map { geojson } => commands::map(&app, geojson.as_deref()).await,
        Commands::Show {
            governorate,
            username,
            password,
        } => {
            let credentials = match (username, password) {
                (Some(username), Some(password)) => {
                    Some(LoginArgs { username, password }.into_credentials()?)
                }
                _ => None,
            };
            commands::show(&app, &governorate, credentials).await
        }
        Commands::Login(args) => commands::login(&app, args.into_credentials()?).await,
        Commands::Register(args) => commands::register(&app, args.into_credentials()?).await,
        Commands::Suggest {
            login,
            city,
            name,
            url,
            place,
            date,
            price,
        } => {
            let suggestion = EventSuggestion {
                name,
                place,
                date,
                price,
                url,
                ..EventSuggestion::for_city(city)
            };
            commands::suggest(&app, login.into_credentials()?, suggestion).await
        }
    }
}
