//! # NurtureUp CLI Module
//!
//! This module implements the CLI interface for NurtureUp.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `classify` - Classify a child by date of birth
//! - `age` - Human-readable age label
//! - `config` - Show a registry entry
//! - `theme` - Show the theme tokens for a stage id
//! - `navigation` - Show tabs and gestures for a stage id
//! - `parent` - Parent stage of a family
//! - `parent-navigation` - Parent navigation for a set of child stages
//! - `transition` - Check a stored stage against the classifier
//! - `upcoming` - Advance notice for the next stage
//!
//! Dates are `YYYY-MM-DD` or RFC 3339. `--as-of` pins the evaluation
//! instant; without it the wall clock is used.

mod commands;

use crate::api::{TransitionRequest, UpcomingRequest};
use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use nurtureup_core::NurtureError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// NurtureUp - developmental stage service
///
/// Classifies children into developmental stages and serves the matching
/// dashboard configuration.
#[derive(Parser, Debug)]
#[command(name = "nurtureup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides configuration)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a child by date of birth
    Classify {
        /// Date of birth
        date_of_birth: String,

        /// Evaluation instant
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Human-readable age label
    Age {
        /// Date of birth
        date_of_birth: String,

        /// Evaluation instant
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show a registry entry
    Config {
        /// Stage id (child or parent spelling)
        stage: String,
    },

    /// Show the theme tokens for a stage id
    Theme {
        /// Stage id; unknown ids fall back to the default theme
        stage: String,
    },

    /// Show tabs and gestures for a stage id
    Navigation {
        /// Stage id (child or parent spelling)
        stage: String,
    },

    /// Parent stage of a family
    Parent {
        /// Child as `DATE` or `DATE@stage` (repeatable)
        #[arg(short = 'C', long = "child")]
        children: Vec<String>,

        /// Evaluation instant
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Parent navigation for a set of child stages
    ParentNavigation {
        /// Child stage ids
        stages: Vec<String>,
    },

    /// Check a stored stage against the classifier
    Transition {
        /// Stored child stage
        current_stage: String,

        /// Date of birth
        date_of_birth: String,

        /// Advance-notice window in days (defaults to configuration)
        #[arg(short, long)]
        buffer_days: Option<u32>,

        /// Evaluation instant
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Advance notice for the next stage
    Upcoming {
        /// Date of birth
        date_of_birth: String,

        /// Advance-notice window in days (defaults to configuration)
        #[arg(short, long)]
        buffer_days: Option<u32>,

        /// Evaluation instant
        #[arg(long)]
        as_of: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved configuration.
pub async fn execute(cli: Cli, config: AppConfig) -> Result<(), NurtureError> {
    let json_mode = cli.json_mode;
    let default_buffer = config.transition.buffer_days;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(config, host, port).await,
        Some(Commands::Classify {
            date_of_birth,
            as_of,
        }) => cmd_classify(json_mode, date_of_birth, as_of),
        Some(Commands::Age {
            date_of_birth,
            as_of,
        }) => cmd_age(json_mode, &date_of_birth, as_of.as_deref()),
        Some(Commands::Config { stage }) => cmd_config(json_mode, &stage),
        Some(Commands::Theme { stage }) => cmd_theme(json_mode, &stage),
        Some(Commands::Navigation { stage }) => cmd_navigation(json_mode, &stage),
        Some(Commands::Parent { children, as_of }) => cmd_parent(json_mode, &children, as_of),
        Some(Commands::ParentNavigation { stages }) => cmd_parent_navigation(json_mode, stages),
        Some(Commands::Transition {
            current_stage,
            date_of_birth,
            buffer_days,
            as_of,
        }) => cmd_transition(
            json_mode,
            TransitionRequest {
                current_stage,
                date_of_birth,
                buffer_days,
                as_of,
            },
            default_buffer,
        ),
        Some(Commands::Upcoming {
            date_of_birth,
            buffer_days,
            as_of,
        }) => cmd_upcoming(
            json_mode,
            UpcomingRequest {
                date_of_birth,
                buffer_days,
                as_of,
            },
            default_buffer,
        ),
        None => {
            // No subcommand - list the registry by default
            cmd_stages(json_mode)
        }
    }
}
