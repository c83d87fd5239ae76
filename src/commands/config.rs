use anyhow::Result;
use colored::Colorize;
use event_pricing::config::Config;
use event_pricing::error::AppError;
use std::path::Path;
use tracing::{error, info};

/// Execute the config show command
///
/// Displays the effective configuration (file, environment and defaults merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Rendering effective configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg).map_err(AppError::from)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Receives the load result so a broken file is reported instead of aborting
pub fn validate(path: &Path, loaded: Result<Config, AppError>) -> Result<()> {
    println!(
        "{} {}",
        "Validating configuration...".yellow(),
        path.display()
    );

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, kind = e.type_name(), "Configuration is invalid");
            println!("{} {}", "✗".red(), e);
            return Err(e.into());
        }
    };

    if !path.exists() {
        println!("  {}", "(file not found, using defaults)".dimmed());
    }

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  Slider: {} to {} events over 0..={}",
        cfg.slider.min_events, cfg.slider.max_events, cfg.slider.max_position
    );
    println!(
        "  Managed: {} free events",
        cfg.pricing.managed.free_events
    );
    println!("  Self-hosted tiers: {}", cfg.pricing.self_hosted.tiers.len());
    println!("  Log Level: {} ({})", cfg.logging.level, cfg.logging.format);

    info!("Configuration validation successful");
    Ok(())
}
