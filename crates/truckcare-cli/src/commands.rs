//! Command handlers

use std::error::Error as StdError;
use std::path::PathBuf;

use tracing::debug;
use truckcare_app::app::{
    get_category_options, get_dashboard, get_history, get_plates, get_records, parse_overrides,
    predict_request, PredictionRequest,
};
use truckcare_app::{AppContext, Config};
use truckcare_domain::model::TruckRecord;
use truckcare_types::OutputFormat;

use crate::cli::{Cli, Commands};
use crate::output::{
    output_dashboard, output_history, output_options, output_prediction, output_records,
};

type CmdResult = std::result::Result<(), Box<dyn StdError>>;

pub fn execute(cli: Cli) -> CmdResult {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.dataset.is_some() {
        config.dataset_path = cli.dataset.clone();
    }
    if cli.model.is_some() {
        config.model_path = cli.model.clone();
    }
    if cli.profile.is_some() {
        config.threshold_profile = cli.profile.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Config {
            show,
            set_dataset,
            set_model,
            set_profile,
            set_output,
            reset,
        } => cmd_config(show, set_dataset, set_model, set_profile, set_output, reset),

        Commands::Predict { plate, input, set } => {
            let ctx = AppContext::initialize(config)?;
            cmd_predict(&ctx, plate, input, &set, output_format)
        }

        Commands::History { plate, limit } => {
            let ctx = AppContext::initialize(config)?;
            let rows = get_history(&ctx, &plate, limit);
            output_history(output_format, &plate, &rows)?;
            Ok(())
        }

        Commands::Records { limit, offset } => {
            let ctx = AppContext::initialize(config)?;
            let page = get_records(&ctx, offset, limit);
            output_records(output_format, &page)?;
            Ok(())
        }

        Commands::Dashboard => {
            let ctx = AppContext::initialize(config)?;
            let stats = get_dashboard(&ctx)?;
            output_dashboard(output_format, &stats)?;
            Ok(())
        }

        Commands::Options { plates } => {
            let ctx = AppContext::initialize(config)?;
            let options = get_category_options(&ctx);
            let plates = plates.then(|| get_plates(&ctx));
            output_options(output_format, &options, plates.as_deref())?;
            Ok(())
        }
    }
}

fn cmd_predict(
    ctx: &AppContext,
    plate: Option<String>,
    input: Option<PathBuf>,
    set: &[String],
    output_format: OutputFormat,
) -> CmdResult {
    let input = match input {
        Some(path) => {
            debug!(path = %path.display(), "reading request record");
            let content = std::fs::read_to_string(&path)?;
            Some(serde_json::from_str::<TruckRecord>(&content)?)
        }
        None => None,
    };

    let request = PredictionRequest {
        plate,
        input,
        overrides: parse_overrides(set)?,
    };
    let result = predict_request(ctx, &request)?;
    output_prediction(output_format, &result)?;
    Ok(())
}

fn cmd_config(
    show: bool,
    set_dataset: Option<PathBuf>,
    set_model: Option<PathBuf>,
    set_profile: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> CmdResult {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(path) = set_dataset {
        config.dataset_path = Some(path);
        modified = true;
    }

    if let Some(path) = set_model {
        config.model_path = Some(path);
        modified = true;
    }

    if let Some(path) = set_profile {
        config.threshold_profile = Some(path);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
