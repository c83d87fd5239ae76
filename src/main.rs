use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use event_pricing::config;
use event_pricing::init_tracing;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Logging settings live in the config file, so load it before tracing is
    // up; a broken file falls back to default logging and is reported below.
    let loaded = config::load_config(&args.config);
    let logging = loaded
        .as_ref()
        .map(|cfg| cfg.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Quote {
            slider,
            events,
            plan,
            json,
        } => {
            commands::quote::execute(&loaded?, slider, events, plan, json)?;
        }
        cli::Commands::Table { step } => {
            commands::table::execute(&loaded?, step)?;
        }
        cli::Commands::Tiers => {
            commands::tiers::execute(&loaded?)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&loaded?)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config, loaded)?,
        },
        cli::Commands::Version => {
            println!("Event Pricing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
