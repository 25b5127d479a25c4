use clap::Parser;
use drivealert::cli::commands::{Cli, Commands};
use drivealert::config::Config;
use drivealert::domain::entities::driver::DriverDocument;
use drivealert::domain::values::embedding::FeatureVector;
use drivealert::DriveAlert;
use std::process::ExitCode;

/// Exit status when identification ran but nobody matched.
const EXIT_NO_MATCH: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .format_timestamp_millis()
        .init();

    let da = match DriveAlert::new(&config) {
        Ok(da) => da,
        Err(e) => {
            log::error!("Error initializing store at {}: {e}", config.db_path);
            return ExitCode::FAILURE;
        }
    };

    match run_command(da, cli.command).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(
    da: DriveAlert,
    cmd: Commands,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Identify { embedding, file } => {
            let raw = match (embedding, file) {
                (Some(json), _) => json,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .map_err(|e| format!("reading {path}: {e}"))?,
                (None, None) => return Err("either --embedding or --file is required".into()),
            };
            let values: Vec<f64> = serde_json::from_str(&raw)?;
            let probe = FeatureVector::new(values);

            let result = da.identify(&probe).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                return Ok(ExitCode::from(EXIT_NO_MATCH));
            }
        }
        Commands::Drivers => {
            let drivers = da.active_drivers().await?;
            println!("{}", serde_json::to_string_pretty(&drivers)?);
        }
        Commands::Driver { user_id } => {
            let driver = da.driver(&user_id).await?;
            println!("{}", serde_json::to_string_pretty(&driver)?);
        }
        Commands::TouchLogin { user_id } => {
            let updated = da.touch_login(&user_id).await?;
            let body = serde_json::json!({ "success": updated, "data": updated });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Import { path } => {
            let raw = std::fs::read_to_string(&path).map_err(|e| format!("reading {path}: {e}"))?;
            let data: serde_json::Value = serde_json::from_str(&raw)?;
            let items = data
                .as_array()
                .ok_or("import file must contain a JSON array of driver objects")?;
            let documents = items
                .iter()
                .map(DriverDocument::from_json)
                .collect::<Result<Vec<_>, _>>()?;
            let ids = da.import(&documents).await?;
            println!("Imported {} drivers", ids.len());
        }
        Commands::Health => {
            let report = da.health().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
