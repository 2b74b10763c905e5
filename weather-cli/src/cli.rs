use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use tracing::debug;
use weather_core::{
    Config, OpenWeatherClient, SearchController, controller::MIN_SUGGESTION_CHARS,
    provider::client_from_config,
};

use crate::output::{render_report, render_suggestions};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "City search and current weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, optionally with a country code, e.g. "London, GB".
        city: String,

        /// Print the full search state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List city suggestions for a partial name.
    Suggest {
        /// Partial city name; fewer than three characters yields nothing.
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Type a city, pick a suggestion, see the weather. Empty input quits.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let mut ctl = SearchController::new(load_client()?);
                ctl.on_submit(city).await;

                if let Some(err) = ctl.last_error() {
                    bail!("Could not fetch weather: {err}");
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(ctl.state())?);
                } else if let Some(report) = render_report(ctl.state()) {
                    print!("{report}");
                }
                Ok(())
            }
            Command::Suggest { query, json } => {
                let mut ctl = SearchController::new(load_client()?);
                ctl.on_query_changed(query).await;

                if let Some(err) = ctl.last_error() {
                    bail!("Could not fetch suggestions: {err}");
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(&ctl.state().suggestions)?);
                } else if ctl.state().text.chars().count() < MIN_SUGGESTION_CHARS {
                    eprintln!("Type at least {MIN_SUGGESTION_CHARS} characters to get suggestions.");
                } else {
                    print!("{}", render_suggestions(ctl.state()));
                }
                Ok(())
            }
            Command::Interactive => interactive(load_client()?).await,
        }
    }
}

fn load_client() -> anyhow::Result<OpenWeatherClient> {
    let config = Config::load_with_env()?;
    client_from_config(&config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.require_api_key()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(client: OpenWeatherClient) -> anyhow::Result<()> {
    let mut ctl = SearchController::new(client);

    loop {
        let input = match Text::new("City:")
            .with_help_message("empty line or Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        ctl.on_query_changed(input).await;
        if let Some(err) = ctl.last_error() {
            eprintln!("Suggestions unavailable: {err}");
        }

        let suggestions = ctl.state().suggestions.clone();
        if suggestions.is_empty() {
            ctl.submit_current().await;
        } else {
            let typed_index = suggestions.len();
            let mut options = suggestions;
            options.push(format!("Search \"{input}\" as typed"));

            match Select::new("Did you mean:", options).raw_prompt() {
                Ok(choice) if choice.index == typed_index => ctl.submit_current().await,
                Ok(choice) => ctl.on_suggestion_selected(choice.value).await,
                Err(InquireError::OperationCanceled) => {
                    debug!("suggestion selection canceled");
                    continue;
                }
                Err(InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err).context("Failed to read selection"),
            }
        }

        if let Some(err) = ctl.last_error() {
            eprintln!("Could not fetch weather: {err}");
        }
        match render_report(ctl.state()) {
            Some(report) => println!("{report}"),
            None => println!("No weather to show yet."),
        }
    }

    Ok(())
}
