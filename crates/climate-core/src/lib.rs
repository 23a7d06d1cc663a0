pub mod classifier;
pub mod datasets;
pub mod hazard;
pub mod landmass;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod spatial;

pub use classifier::{ClassifierError, ClassifierFeatures, LinearClassifier, SafetyClassifier};
pub use datasets::{DatasetError, ReferenceData};
pub use hazard::{composite_risk_index, hazard_scores};
pub use landmass::LandmassPolygonSet;
pub use models::{
    ChatRequest, ChatResponse, Coordinate, HazardScores, PredictRequest, PredictResponse,
    RankedSafeZone, Recommendation, SafeZoneRecord, SafetyLabel, ScoringResult, WeightTriple,
};
pub use pipeline::{score_location, ScoringError, ScoringPipeline};
pub use ranking::nearest;
pub use spatial::distance_km;
