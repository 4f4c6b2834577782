mod recording;
mod settings;

use anyhow::Result;
use clap::Parser;
use scenario_export::ScenarioExporter;
use settings::Settings;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_CLASS_NAME: &str = "RecordedSimulation";

#[derive(Parser)]
#[command(name = "scenario-export")]
#[command(version, about = "Turns a recorded HTTP session into a Gatling simulation", long_about = None)]
struct Cli {
    /// Path to the JSON recording
    recording: PathBuf,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder the simulation is written to (overrides the settings file)
    #[arg(short, long)]
    output_folder: Option<PathBuf>,

    /// Folder request bodies are dumped to (overrides the settings file)
    #[arg(short, long)]
    bodies_folder: Option<PathBuf>,

    /// Package of the simulation (overrides the settings file)
    #[arg(short, long)]
    package: Option<String>,

    /// Class name of the simulation (overrides the settings file)
    #[arg(long)]
    class_name: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.output_folder.is_some() {
        settings.output_folder = cli.output_folder;
    }
    if cli.bodies_folder.is_some() {
        settings.request_bodies_folder = cli.bodies_folder;
    }
    if cli.package.is_some() {
        settings.package = cli.package;
    }
    if cli.class_name.is_some() {
        settings.class_name = cli.class_name;
    }

    let configuration = settings.into_configuration(DEFAULT_CLASS_NAME)?;
    let elements = recording::load_recording(&cli.recording)?;
    info!("Loaded {} elements from {}", elements.len(), cli.recording.display());

    let report = ScenarioExporter::new(configuration).export(elements)?;

    for request_id in &report.failed_bodies {
        warn!("The body of request {} is missing from the bodies folder", request_id);
    }
    println!("{}", report.simulation_path.display());

    Ok(())
}
