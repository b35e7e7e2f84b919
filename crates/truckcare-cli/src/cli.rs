//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truckcare_types::OutputFormat;

#[derive(Parser)]
#[command(name = "truckcare")]
#[command(version)]
#[command(about = "Predict truck maintenance timing from sensor and workshop data")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Historical dataset CSV (overrides config)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Model artifact JSON (overrides config)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Threshold profile TOML (overrides config)
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict days until next service for one truck
    Predict {
        /// Truck plate; prefills the request from its latest history row
        #[arg(long, short = 'p')]
        plate: Option<String>,

        /// JSON file holding a full truck record
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Override a field (e.g. --set engine_temperature_c=145)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },

    /// Show service history for a truck, most recent first
    History {
        /// Truck plate
        plate: String,

        /// Maximum number of rows. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Browse the whole dataset in file order
    Records {
        /// Rows to show. Uses config value if not specified.
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Skip this many rows first
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Fleet-wide summary statistics
    Dashboard,

    /// List known values for categorical fields
    Options {
        /// Also list known plates
        #[arg(long)]
        plates: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set historical dataset path
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// Set model artifact path
        #[arg(long)]
        set_model: Option<PathBuf>,

        /// Set threshold profile path
        #[arg(long)]
        set_profile: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
