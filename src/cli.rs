use clap::{Parser, Subcommand};
use event_pricing::error::AppError;
use event_pricing::pricing::PricingPlan;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pricing", version, about = "Event volume pricing calculator")]
pub struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(short, long, default_value = "pricing.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a slider position or an explicit event volume (default)
    Quote {
        /// Slider position, 0-100 by default; out-of-range values are clamped
        #[arg(short, long, allow_negative_numbers = true, value_parser = parse_slider_value, conflicts_with = "events")]
        slider: Option<f64>,

        /// Monthly event volume, e.g. 25000000 or 25,000,000
        #[arg(short, long, value_parser = parse_event_count)]
        events: Option<u64>,

        /// Pricing plan: managed or self-hosted
        #[arg(short, long, default_value = "managed")]
        plan: PricingPlan,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show prices along the slider for both plans
    Table {
        /// Distance between slider positions
        #[arg(short, long, default_value = "10", value_parser = parse_step)]
        step: f64,
    },

    /// Show the self-hosted rate card
    Tiers,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to a quote at the initial slider position
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Quote {
            slider: None,
            events: None,
            plan: PricingPlan::Managed,
            json: false,
        })
    }
}

/// Parse a slider reading; text that is not a number is rejected here
/// rather than reaching the calculator
fn parse_slider_value(s: &str) -> Result<f64, AppError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidInput(format!("slider value '{}' is not a number", s)))
}

/// Parse an event count, accepting `,` and `_` digit separators
fn parse_event_count(s: &str) -> Result<u64, AppError> {
    let digits: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    digits.parse::<u64>().map_err(|_| {
        AppError::InvalidInput(format!(
            "event count '{}' is not a non-negative whole number",
            s
        ))
    })
}

fn parse_step(s: &str) -> Result<f64, AppError> {
    match s.trim().parse::<f64>() {
        Ok(step) if step.is_finite() && step > 0.0 => Ok(step),
        _ => Err(AppError::InvalidInput(format!(
            "step '{}' must be a positive number",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_quote() {
        let cli = Cli {
            config: PathBuf::from("pricing.toml"),
            command: None,
        };

        match cli.get_command() {
            Commands::Quote {
                slider,
                events,
                plan,
                json,
            } => {
                assert!(slider.is_none());
                assert!(events.is_none());
                assert_eq!(plan, PricingPlan::Managed);
                assert!(!json);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_parsing_quote_with_slider() {
        let args = vec!["pricing", "quote", "--slider", "60", "--plan", "self-hosted"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Quote { slider, plan, .. } => {
                assert_eq!(slider, Some(60.0));
                assert_eq!(plan, PricingPlan::SelfHosted);
            }
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_parsing_negative_slider() {
        let args = vec!["pricing", "quote", "--slider", "-5"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Quote { slider, .. } => assert_eq!(slider, Some(-5.0)),
            _ => panic!("Expected Quote command"),
        }
    }

    #[test]
    fn test_cli_rejects_non_numeric_slider() {
        let args = vec!["pricing", "quote", "--slider", "lots"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_rejects_slider_and_events_together() {
        let args = vec!["pricing", "quote", "--slider", "10", "--events", "100"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let args = vec!["pricing", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_parse_event_count() {
        assert_eq!(parse_event_count("25000000").unwrap(), 25_000_000);
        assert_eq!(parse_event_count("25,000,000").unwrap(), 25_000_000);
        assert_eq!(parse_event_count("25_000_000").unwrap(), 25_000_000);
        assert!(parse_event_count("-1").is_err());
        assert!(parse_event_count("1.5").is_err());
        assert!(parse_event_count("many").is_err());
    }

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_step("5").unwrap(), 5.0);
        assert!(parse_step("0").is_err());
        assert!(parse_step("-2").is_err());
        assert!(parse_step("inf").is_err());
    }
}
