//! Scoring pipeline: ocean check, hazards, classification, nearest safe zones.

use std::sync::Arc;

use thiserror::Error;

use crate::classifier::{ClassifierError, ClassifierFeatures, SafetyClassifier};
use crate::datasets::ReferenceData;
use crate::hazard::{composite_risk_index, hazard_scores};
use crate::models::{Coordinate, Recommendation, SafetyLabel, ScoringResult, WeightTriple};
use crate::ranking::{nearest, DEFAULT_NEAREST_COUNT};

/// Confidence reported for a safe classification.
pub const SAFE_CONFIDENCE: f64 = 1.0;
/// Confidence reported for a risky classification.
pub const RISKY_CONFIDENCE: f64 = 0.85;
/// Confidence reported for ocean points.
pub const OCEAN_CONFIDENCE: f64 = 0.0;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("safety classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Stateless request scorer over frozen reference data.
///
/// Cloning is cheap; every clone shares the same reference data and model.
#[derive(Clone)]
pub struct ScoringPipeline {
    reference: Arc<ReferenceData>,
    classifier: Arc<dyn SafetyClassifier>,
}

impl ScoringPipeline {
    pub fn new(reference: Arc<ReferenceData>, classifier: Arc<dyn SafetyClassifier>) -> Self {
        Self {
            reference,
            classifier,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Score a coordinate with the given hazard weights.
    pub fn score(
        &self,
        coordinate: Coordinate,
        weights: WeightTriple,
    ) -> Result<ScoringResult, ScoringError> {
        score_location(coordinate, weights, &self.reference, self.classifier.as_ref())
    }
}

/// Run the full pipeline for one coordinate.
pub fn score_location(
    coordinate: Coordinate,
    weights: WeightTriple,
    reference: &ReferenceData,
    classifier: &dyn SafetyClassifier,
) -> Result<ScoringResult, ScoringError> {
    if reference.landmass.is_ocean(coordinate) {
        tracing::debug!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            "coordinate is in ocean"
        );
        return Ok(ScoringResult {
            coordinate,
            weights,
            hazards: None,
            cri: None,
            label: None,
            recommendation: Recommendation::Ocean,
            confidence: OCEAN_CONFIDENCE,
            ocean: true,
            nearest_safe_locations: Vec::new(),
        });
    }

    let hazards = hazard_scores(coordinate);
    let cri = composite_risk_index(&hazards, &weights);

    let label = classifier.predict(&ClassifierFeatures {
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
        occurrence: cri,
    })?;

    let (confidence, nearest_safe_locations) = match label {
        SafetyLabel::Safe => (SAFE_CONFIDENCE, Vec::new()),
        SafetyLabel::Risky => (
            RISKY_CONFIDENCE,
            nearest(coordinate, &reference.safe_zones, DEFAULT_NEAREST_COUNT),
        ),
    };

    tracing::debug!(
        lat = coordinate.latitude,
        lon = coordinate.longitude,
        cri,
        ?label,
        alternatives = nearest_safe_locations.len(),
        "scored coordinate"
    );

    Ok(ScoringResult {
        coordinate,
        weights,
        hazards: Some(hazards),
        cri: Some(cri),
        label: Some(label),
        recommendation: Recommendation::from(label),
        confidence,
        ocean: false,
        nearest_safe_locations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmass::LandmassPolygonSet;
    use crate::models::{HazardScores, SafeZoneRecord};
    use geo::polygon;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClassifier {
        label: SafetyLabel,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(label: SafetyLabel) -> Self {
            Self {
                label,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SafetyClassifier for FixedClassifier {
        fn predict(&self, _features: &ClassifierFeatures) -> Result<SafetyLabel, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.label)
        }
    }

    struct FailingClassifier;

    impl SafetyClassifier for FailingClassifier {
        fn predict(&self, _features: &ClassifierFeatures) -> Result<SafetyLabel, ClassifierError> {
            Err(ClassifierError::Backend("model unavailable".into()))
        }
    }

    /// Records the features it was called with.
    struct CapturingClassifier(std::sync::Mutex<Option<ClassifierFeatures>>);

    impl SafetyClassifier for CapturingClassifier {
        fn predict(&self, features: &ClassifierFeatures) -> Result<SafetyLabel, ClassifierError> {
            *self.0.lock().unwrap() = Some(*features);
            Ok(SafetyLabel::Safe)
        }
    }

    fn reference() -> ReferenceData {
        // Atlantic box: lon [-40, -20], lat [-10, 10]
        let ocean = polygon![
            (x: -40.0, y: -10.0),
            (x: -20.0, y: -10.0),
            (x: -20.0, y: 10.0),
            (x: -40.0, y: 10.0),
            (x: -40.0, y: -10.0),
        ];
        ReferenceData::new(
            vec![
                SafeZoneRecord::new(5.0, 5.0),
                SafeZoneRecord::new(1.0, 1.0),
                SafeZoneRecord::new(40.0, 40.0),
                SafeZoneRecord::new(2.0, 2.0),
            ],
            LandmassPolygonSet::new(vec![ocean]),
        )
    }

    #[test]
    fn ocean_short_circuits_regardless_of_weights() {
        let reference = reference();
        let classifier = FixedClassifier::new(SafetyLabel::Risky);

        for weights in [WeightTriple::default(), WeightTriple::new(5.0, -1.0, 0.0)] {
            let result =
                score_location(Coordinate::new(0.0, -30.0), weights, &reference, &classifier)
                    .unwrap();
            assert!(result.ocean);
            assert_eq!(result.hazards, None);
            assert_eq!(result.cri, None);
            assert_eq!(result.label, None);
            assert_eq!(result.recommendation, Recommendation::Ocean);
            assert_eq!(result.confidence, 0.0);
            assert!(result.nearest_safe_locations.is_empty());
            assert_eq!(result.weights, weights);
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn origin_risky_scenario() {
        let reference = reference();
        let classifier = FixedClassifier::new(SafetyLabel::Risky);
        let result = score_location(
            Coordinate::new(0.0, 0.0),
            WeightTriple::default(),
            &reference,
            &classifier,
        )
        .unwrap();

        assert!(!result.ocean);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.recommendation, Recommendation::Risky);
        assert_eq!(
            result.hazards,
            Some(HazardScores { flood: 0.0, heat: 0.0, drought: 0.0 })
        );
        assert_eq!(result.cri, Some(0.0));
        assert_eq!(result.nearest_safe_locations.len(), 3);
        let lats: Vec<f64> = result
            .nearest_safe_locations
            .iter()
            .map(|r| r.latitude)
            .collect();
        assert_eq!(lats, vec![1.0, 2.0, 5.0]);
    }

    #[test]
    fn safe_classification_has_no_alternatives() {
        let reference = reference();
        let classifier = FixedClassifier::new(SafetyLabel::Safe);
        let result = score_location(
            Coordinate::new(10.0, 20.0),
            WeightTriple::default(),
            &reference,
            &classifier,
        )
        .unwrap();

        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.label, Some(SafetyLabel::Safe));
        assert!(result.nearest_safe_locations.is_empty());
    }

    #[test]
    fn classifier_receives_cri_as_occurrence() {
        let reference = reference();
        let classifier = CapturingClassifier(std::sync::Mutex::new(None));
        let result = score_location(
            Coordinate::new(10.0, 20.0),
            WeightTriple::default(),
            &reference,
            &classifier,
        )
        .unwrap();

        let seen = classifier.0.lock().unwrap().expect("classifier called");
        assert_eq!(seen.latitude, 10.0);
        assert_eq!(seen.longitude, 20.0);
        assert_eq!(Some(seen.occurrence), result.cri);
        // 0.4 * 0.5 + 0.3 * 0.5 + 0.3 * 0.1
        assert!((seen.occurrence - 0.38).abs() < 1e-12);
    }

    #[test]
    fn classifier_failure_propagates() {
        let reference = reference();
        let err = score_location(
            Coordinate::new(10.0, 20.0),
            WeightTriple::default(),
            &reference,
            &FailingClassifier,
        )
        .unwrap_err();
        assert!(matches!(err, ScoringError::Classifier(_)));
    }

    #[test]
    fn scoring_is_idempotent() {
        let pipeline = ScoringPipeline::new(
            Arc::new(reference()),
            Arc::new(FixedClassifier::new(SafetyLabel::Risky)),
        );
        let coord = Coordinate::new(3.3, 4.4);
        let first = pipeline.score(coord, WeightTriple::default()).unwrap();
        let second = pipeline.score(coord, WeightTriple::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.reference().safe_zones.len(), 4);
    }

    #[test]
    fn short_pool_returns_all_alternatives() {
        let reference = ReferenceData::new(
            vec![SafeZoneRecord::new(1.0, 1.0)],
            LandmassPolygonSet::default(),
        );
        let result = score_location(
            Coordinate::new(0.0, 0.0),
            WeightTriple::default(),
            &reference,
            &FixedClassifier::new(SafetyLabel::Risky),
        )
        .unwrap();
        assert_eq!(result.nearest_safe_locations.len(), 1);
    }
}
