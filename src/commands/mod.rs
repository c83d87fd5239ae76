//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - quote: Price a slider position or event volume
//! - table: Prices along the slider for both plans
//! - tiers: Self-hosted rate card
//! - config: Show or validate configuration

pub mod config;
pub mod quote;
pub mod table;
pub mod tiers;
