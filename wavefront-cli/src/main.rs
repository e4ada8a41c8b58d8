use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use wavefront_core::{analyze, Config, Recording, ReferenceRegistry, RoomDimensions};

/// Analyzes a recorded sweep against a known reference signal and prints a
/// smoothed, normalized frequency response as JSON.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// WAV file containing the recorded sweep.
    recorded_file: PathBuf,

    /// Id of the reference signal in the built-in catalogue.
    signal_id: String,

    /// Where to write the JSON result. Defaults to stdout.
    output_file: Option<PathBuf>,

    /// Optional JSON file with room_length_feet/room_width_feet/room_height_feet.
    room_json: Option<PathBuf>,

    /// Optional TOML file with configuration overrides.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct RoomJson {
    #[serde(alias = "room_length")]
    room_length_feet: Option<f64>,
    #[serde(alias = "room_width")]
    room_width_feet: Option<f64>,
    #[serde(alias = "room_height")]
    room_height_feet: Option<f64>,
}

impl From<RoomJson> for RoomDimensions {
    fn from(room: RoomJson) -> Self {
        RoomDimensions {
            length_ft: room.room_length_feet.unwrap_or(0.0),
            width_ft: room.room_width_feet.unwrap_or(0.0),
            height_ft: room.room_height_feet.unwrap_or(0.0),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let mut reader = hound::WavReader::open(&cli.recorded_file)?;
    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<f32>, _>>()?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<Result<Vec<f32>, _>>()?
        }
    };

    let recording = Recording { samples, sample_rate };

    let registry = ReferenceRegistry::with_default_catalogue();

    let room = match &cli.room_json {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let room: RoomJson = serde_json::from_str(&contents)?;
            Some(RoomDimensions::from(room))
        }
        None => None,
    };

    let result = analyze(&recording, &cli.signal_id, room.as_ref(), &registry, &config)?;

    let json = serde_json::to_string_pretty(&result)?;

    match &cli.output_file {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    Ok(settings.try_deserialize()?)
}
