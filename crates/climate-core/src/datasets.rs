//! One-time loading of the reference datasets.
//!
//! Everything here runs before the first request is served. The returned
//! [`ReferenceData`] is frozen and shared read-only afterwards.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use geo::{Geometry, Polygon};
use geojson::GeoJson;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::classifier::LinearClassifier;
use crate::landmass::LandmassPolygonSet;
use crate::models::SafeZoneRecord;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid safe zone table: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid polygon set: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("invalid classifier model: {0}")]
    Model(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Frozen reference data shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub safe_zones: Vec<SafeZoneRecord>,
    pub landmass: LandmassPolygonSet,
}

impl ReferenceData {
    pub fn new(safe_zones: Vec<SafeZoneRecord>, landmass: LandmassPolygonSet) -> Self {
        Self {
            safe_zones,
            landmass,
        }
    }

    /// Load the safe zone table and the ocean polygons from disk.
    pub fn load(safe_zones_path: impl AsRef<Path>, ocean_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            load_safe_zones(safe_zones_path)?,
            load_ocean_polygons(ocean_path)?,
        ))
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Raw CSV row. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct SafeZoneRow {
    latitude: f64,
    longitude: f64,
}

/// Load safe zones from a CSV file with `latitude,longitude` header columns.
pub fn load_safe_zones(path: impl AsRef<Path>) -> Result<Vec<SafeZoneRecord>> {
    let path = path.as_ref();
    info!("Loading safe zones from {:?}", path);
    parse_safe_zones(open(path)?)
}

/// Parse safe zone rows. Every parsed row is kept; rows with out-of-range
/// coordinates are only reported.
pub fn parse_safe_zones<R: Read>(reader: R) -> Result<Vec<SafeZoneRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    let mut out_of_range = 0usize;
    for row in csv_reader.deserialize::<SafeZoneRow>() {
        let row = row?;
        let record = SafeZoneRecord::new(row.latitude, row.longitude);
        if !record.coordinate().is_valid() {
            out_of_range += 1;
        }
        records.push(record);
    }

    if out_of_range > 0 {
        warn!("{} safe zone rows have out-of-range coordinates", out_of_range);
    }
    if records.is_empty() {
        warn!("Safe zone table is empty; risky locations will get no alternatives");
    }
    info!("Loaded {} safe zones", records.len());

    Ok(records)
}

/// Load ocean polygons from a GeoJSON file.
pub fn load_ocean_polygons(path: impl AsRef<Path>) -> Result<LandmassPolygonSet> {
    let path = path.as_ref();
    info!("Loading ocean polygons from {:?}", path);
    let mut raw = String::new();
    open(path)?
        .read_to_string(&mut raw)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_ocean_polygons(&raw)
}

/// Parse a GeoJSON document into a polygon set.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry.
/// Non-areal geometries (points, lines) are skipped.
pub fn parse_ocean_polygons(raw: &str) -> Result<LandmassPolygonSet> {
    let geojson: GeoJson = raw.parse()?;

    let geometries: Vec<geojson::Geometry> = match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::Geometry(geometry) => vec![geometry],
    };

    let mut polygons = Vec::new();
    let mut skipped = 0usize;
    for geometry in geometries {
        let geometry: Geometry<f64> = geometry.try_into()?;
        collect_polygons(geometry, &mut polygons, &mut skipped);
    }

    if skipped > 0 {
        warn!("Skipped {} non-polygon geometries in ocean set", skipped);
    }

    let set = LandmassPolygonSet::new(polygons);
    info!("Loaded {} ocean polygons", set.len());
    Ok(set)
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>, skipped: &mut usize) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::Rect(rect) => out.push(rect.to_polygon()),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_polygons(inner, out, skipped);
            }
        }
        _ => *skipped += 1,
    }
}

/// Load exported classifier coefficients from JSON.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<LinearClassifier> {
    let path = path.as_ref();
    info!("Loading classifier model from {:?}", path);
    let model: LinearClassifier = serde_json::from_reader(open(path)?)?;
    Ok(model)
}
