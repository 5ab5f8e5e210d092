use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tripsheet_pdf::{AgencySettings, DownloadOutcome, TripRecord};

/// Render trip sheets to PDF. One trip gives a PDF, several give a zip archive.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with a trip object or an array of trips
    #[arg(short, long)]
    trips: PathBuf,

    /// JSON file with the agency settings (defaults are used when omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Directory the PDF or archive is saved into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum TripsInput {
    Many(Vec<TripRecord>),
    One(Box<TripRecord>),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}

fn run(cli: &Cli) -> Result<DownloadOutcome, String> {
    let trips = match read_json::<TripsInput>(&cli.trips)? {
        TripsInput::Many(trips) => trips,
        TripsInput::One(trip) => vec![*trip],
    };
    let settings: AgencySettings = match &cli.settings {
        Some(path) => read_json(path)?,
        None => AgencySettings::default(),
    };
    log::info!("Exporting {} trip(s) for {}", trips.len(), settings.agency_name);
    tripsheet_pdf::save_selection(&trips, &settings, &cli.out).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(DownloadOutcome::Saved(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(DownloadOutcome::Skipped) => {
            eprintln!("Nothing was generated.");
            ExitCode::FAILURE
        }
        Ok(DownloadOutcome::Blocked { notice }) => {
            eprintln!("{notice}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
