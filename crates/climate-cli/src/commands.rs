//! Command definitions and execution.

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use climate_core::datasets::{load_classifier, load_safe_zones, ReferenceData};
use climate_core::{nearest, Coordinate, PredictResponse, ScoringPipeline, WeightTriple};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a coordinate for housing suitability
    Score {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long, default_value_t = WeightTriple::DEFAULT_FLOOD)]
        flood_weight: f64,

        #[arg(long, default_value_t = WeightTriple::DEFAULT_HEAT)]
        heat_weight: f64,

        #[arg(long, default_value_t = WeightTriple::DEFAULT_DROUGHT)]
        drought_weight: f64,

        /// Ocean polygon GeoJSON
        #[arg(long, default_value = "data/ocean.geojson")]
        ocean: PathBuf,

        /// Classifier model JSON
        #[arg(long, default_value = "data/classifier.json")]
        model: PathBuf,
    },
    /// List the safe zones closest to a coordinate
    Nearest {
        #[command(flatten)]
        location: LocationArgs,

        /// Number of safe zones to return
        #[arg(short, long, default_value_t = 3)]
        k: usize,
    },
}

#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Safe zone CSV table
    #[arg(long, default_value = "data/safe_zones.csv")]
    pub safe_zones: PathBuf,
}

impl LocationArgs {
    fn coordinate(&self) -> Result<Coordinate> {
        let coordinate = Coordinate::new(self.lat, self.lon);
        let errors = coordinate.validate();
        ensure!(errors.is_empty(), "{}", errors.join("; "));
        Ok(coordinate)
    }
}

/// Run a command and return its JSON output.
pub fn execute(command: &Command) -> Result<Value> {
    match command {
        Command::Score {
            location,
            flood_weight,
            heat_weight,
            drought_weight,
            ocean,
            model,
        } => {
            let coordinate = location.coordinate()?;
            let reference = ReferenceData::load(&location.safe_zones, ocean)
                .context("Failed to load reference datasets")?;
            let classifier = load_classifier(model).context("Failed to load classifier model")?;
            let pipeline = ScoringPipeline::new(Arc::new(reference), Arc::new(classifier));

            let weights = WeightTriple::new(*flood_weight, *heat_weight, *drought_weight);
            let result = pipeline.score(coordinate, weights)?;
            Ok(serde_json::to_value(PredictResponse::from(result))?)
        }
        Command::Nearest { location, k } => {
            let coordinate = location.coordinate()?;
            let pool = load_safe_zones(&location.safe_zones)
                .context("Failed to load safe zone table")?;
            let ranked = nearest(coordinate, &pool, *k);
            Ok(json!({
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
                "nearest_safe_locations": ranked,
            }))
        }
    }
}
