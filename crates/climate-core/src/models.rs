//! Core data models for climate risk scoring.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate coordinate ranges.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            errors.push(format!(
                "Latitude ({}) must be within [-90, 90]",
                self.latitude
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            errors.push(format!(
                "Longitude ({}) must be within [-180, 180]",
                self.longitude
            ));
        }

        errors
    }

    /// Check if coordinate is within the valid lat/lon ranges.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Caller-supplied hazard weights. Not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTriple {
    pub flood_weight: f64,
    pub heat_weight: f64,
    pub drought_weight: f64,
}

impl WeightTriple {
    pub const DEFAULT_FLOOD: f64 = 0.4;
    pub const DEFAULT_HEAT: f64 = 0.3;
    pub const DEFAULT_DROUGHT: f64 = 0.3;

    pub const fn new(flood_weight: f64, heat_weight: f64, drought_weight: f64) -> Self {
        Self {
            flood_weight,
            heat_weight,
            drought_weight,
        }
    }

    /// Multiply every weight by the same factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.flood_weight * factor,
            self.heat_weight * factor,
            self.drought_weight * factor,
        )
    }
}

impl Default for WeightTriple {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_FLOOD,
            Self::DEFAULT_HEAT,
            Self::DEFAULT_DROUGHT,
        )
    }
}

/// Per-hazard risk scores, each in [0, 1] rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardScores {
    pub flood: f64,
    pub heat: f64,
    pub drought: f64,
}

/// A known safe location from the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeZoneRecord {
    pub latitude: f64,
    pub longitude: f64,
}

impl SafeZoneRecord {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A safe zone annotated with its distance from a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedSafeZone {
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl RankedSafeZone {
    pub fn new(record: SafeZoneRecord, distance_km: f64) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            distance_km,
        }
    }

    pub fn record(&self) -> SafeZoneRecord {
        SafeZoneRecord {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLabel {
    /// Suitable for housing (wire value 1)
    Safe,
    /// Climate-risky location (wire value 0)
    Risky,
}

impl SafetyLabel {
    /// Map the classifier's 0/1 output. Anything other than 1 is risky.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Self::Safe
        } else {
            Self::Risky
        }
    }

    pub fn as_class(&self) -> u8 {
        match self {
            Self::Safe => 1,
            Self::Risky => 0,
        }
    }
}

/// Housing recommendation rendered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Safe,
    Risky,
    Ocean,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Safe => "Safe for Housing ✅",
            Self::Risky => "Risky Zone ❌",
            Self::Ocean => "Location is in ocean/waterbody! 🌊",
        }
    }
}

impl From<SafetyLabel> for Recommendation {
    fn from(label: SafetyLabel) -> Self {
        match label {
            SafetyLabel::Safe => Self::Safe,
            SafetyLabel::Risky => Self::Risky,
        }
    }
}

/// Outcome of scoring one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub coordinate: Coordinate,
    pub weights: WeightTriple,
    /// None when the point is in the ocean
    pub hazards: Option<HazardScores>,
    /// None when the point is in the ocean
    pub cri: Option<f64>,
    /// None when the point is in the ocean
    pub label: Option<SafetyLabel>,
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub ocean: bool,
    pub nearest_safe_locations: Vec<RankedSafeZone>,
}

// ========== WIRE SHAPES ==========

/// Request body for `/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_flood_weight")]
    pub flood_weight: f64,
    #[serde(default = "default_heat_weight")]
    pub heat_weight: f64,
    #[serde(default = "default_drought_weight")]
    pub drought_weight: f64,
}

fn default_flood_weight() -> f64 {
    WeightTriple::DEFAULT_FLOOD
}

fn default_heat_weight() -> f64 {
    WeightTriple::DEFAULT_HEAT
}

fn default_drought_weight() -> f64 {
    WeightTriple::DEFAULT_DROUGHT
}

impl PredictRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn weights(&self) -> WeightTriple {
        WeightTriple::new(self.flood_weight, self.heat_weight, self.drought_weight)
    }
}

/// Response body for `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub flood_weight: f64,
    pub heat_weight: f64,
    pub drought_weight: f64,
    pub flood_risk: Option<f64>,
    pub heat_risk: Option<f64>,
    pub drought_risk: Option<f64>,
    pub cri: Option<f64>,
    pub housing_recommendation: String,
    pub nearest_safe_locations: Vec<RankedSafeZone>,
    pub ocean: bool,
    pub confidence: f64,
}

impl From<&ScoringResult> for PredictResponse {
    fn from(result: &ScoringResult) -> Self {
        Self {
            latitude: result.coordinate.latitude,
            longitude: result.coordinate.longitude,
            flood_weight: result.weights.flood_weight,
            heat_weight: result.weights.heat_weight,
            drought_weight: result.weights.drought_weight,
            flood_risk: result.hazards.map(|h| h.flood),
            heat_risk: result.hazards.map(|h| h.heat),
            drought_risk: result.hazards.map(|h| h.drought),
            cri: result.cri,
            housing_recommendation: result.recommendation.message().to_string(),
            nearest_safe_locations: result.nearest_safe_locations.clone(),
            ocean: result.ocean,
            confidence: result.confidence,
        }
    }
}

impl From<ScoringResult> for PredictResponse {
    fn from(result: ScoringResult) -> Self {
        Self::from(&result)
    }
}

/// Request body for `/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for `/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_request_applies_default_weights() {
        let req: PredictRequest =
            serde_json::from_str(r#"{"latitude": 12.5, "longitude": -3.0}"#).unwrap();
        assert_eq!(req.weights(), WeightTriple::default());
        assert_eq!(req.coordinate(), Coordinate::new(12.5, -3.0));
    }

    #[test]
    fn coordinate_validation_flags_out_of_range() {
        assert!(Coordinate::new(45.0, 120.0).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());

        let errors = Coordinate::new(91.0, -181.0).validate();
        assert_eq!(errors.len(), 2);
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn ocean_response_serializes_nulls() {
        let result = ScoringResult {
            coordinate: Coordinate::new(0.0, -30.0),
            weights: WeightTriple::default(),
            hazards: None,
            cri: None,
            label: None,
            recommendation: Recommendation::Ocean,
            confidence: 0.0,
            ocean: true,
            nearest_safe_locations: Vec::new(),
        };

        let value = serde_json::to_value(PredictResponse::from(&result)).unwrap();
        assert!(value["flood_risk"].is_null());
        assert!(value["cri"].is_null());
        assert_eq!(value["ocean"], true);
        assert_eq!(
            value["housing_recommendation"],
            "Location is in ocean/waterbody! 🌊"
        );
        assert_eq!(value["flood_weight"], 0.4);
    }

    #[test]
    fn safety_label_maps_wire_classes() {
        assert_eq!(SafetyLabel::from_class(1), SafetyLabel::Safe);
        assert_eq!(SafetyLabel::from_class(0), SafetyLabel::Risky);
        assert_eq!(SafetyLabel::Safe.as_class(), 1);
    }
}
