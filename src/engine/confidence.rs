//! Confidence router: folds signed evaluation factors into a bounded
//! confidence value and a three-way routing decision.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Neutral starting confidence before any factor is applied.
pub const BASE_CONFIDENCE: f64 = 0.70;
/// A machine-made judgment is never fully discarded.
pub const CONFIDENCE_FLOOR: f64 = 0.30;
pub const CONFIDENCE_CEILING: f64 = 1.0;

/// Per-factor point bounds enforced by the catalogue constructors.
const MAX_POSITIVE_POINTS: f64 = 0.15;
const MAX_NEGATIVE_POINTS: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    Positive,
    Negative,
}

/// Signed contribution to the confidence score. Built through the bounded
/// constructors so catalogue limits hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactor {
    pub name: String,
    pub impact: Impact,
    pub points: f64,
    pub reason: String,
}

impl ConfidenceFactor {
    /// Positive factor, capped at +0.15.
    pub fn positive(name: impl Into<String>, points: f64, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impact: Impact::Positive,
            points: points.abs().min(MAX_POSITIVE_POINTS),
            reason: reason.into(),
        }
    }

    /// Negative factor, capped at -0.30.
    pub fn negative(name: impl Into<String>, points: f64, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            impact: Impact::Negative,
            points: -points.abs().min(MAX_NEGATIVE_POINTS),
            reason: reason.into(),
        }
    }
}

/// Disposition derived from the clamped confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Routing {
    AutoApprove,
    PmReviewQueue,
    PmImmediateReview,
}

impl Routing {
    pub const fn label(self) -> &'static str {
        match self {
            Routing::AutoApprove => "AUTO_APPROVE",
            Routing::PmReviewQueue => "PM_REVIEW_QUEUE",
            Routing::PmImmediateReview => "PM_IMMEDIATE_REVIEW",
        }
    }

    /// Pure threshold map; each band is inclusive on its lower bound.
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= 0.90 {
            Routing::AutoApprove
        } else if confidence >= 0.70 {
            Routing::PmReviewQueue
        } else {
            Routing::PmImmediateReview
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    pub confidence: f64,
    pub routing: Routing,
    pub factors: Vec<ConfidenceFactor>,
    /// Names of the negative factors. Derived, never set independently.
    pub risk_flags: BTreeSet<String>,
}

/// Apply each factor in the order identified, clamp the sum to
/// [0.30, 1.0], and route on the clamped value.
pub fn route(factors: Vec<ConfidenceFactor>) -> ConfidenceResult {
    let mut confidence = BASE_CONFIDENCE;
    for factor in &factors {
        confidence += factor.points;
    }
    let confidence = confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

    let risk_flags = factors
        .iter()
        .filter(|factor| factor.impact == Impact::Negative)
        .map(|factor| factor.name.clone())
        .collect();

    ConfidenceResult {
        confidence,
        routing: Routing::for_confidence(confidence),
        factors,
        risk_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_factors_routes_to_review_queue_at_base() {
        let result = route(Vec::new());
        assert!((result.confidence - BASE_CONFIDENCE).abs() < 1e-9);
        assert_eq!(result.routing, Routing::PmReviewQueue);
        assert!(result.risk_flags.is_empty());
    }

    #[test]
    fn confidence_is_clamped_for_extreme_positive_sums() {
        let factors: Vec<_> = (0..10)
            .map(|i| ConfidenceFactor::positive(format!("signal_{i}"), 0.15, "clear signal"))
            .collect();
        let result = route(factors);
        assert_eq!(result.confidence, CONFIDENCE_CEILING);
        assert_eq!(result.routing, Routing::AutoApprove);
    }

    #[test]
    fn confidence_is_clamped_for_extreme_negative_sums() {
        let factors: Vec<_> = (0..10)
            .map(|i| ConfidenceFactor::negative(format!("risk_{i}"), 0.30, "conflicting signal"))
            .collect();
        let result = route(factors);
        assert_eq!(result.confidence, CONFIDENCE_FLOOR);
        assert_eq!(result.routing, Routing::PmImmediateReview);
    }

    #[test]
    fn routing_thresholds_are_lower_bound_inclusive() {
        assert_eq!(Routing::for_confidence(0.90), Routing::AutoApprove);
        assert_eq!(Routing::for_confidence(0.899_999), Routing::PmReviewQueue);
        assert_eq!(Routing::for_confidence(0.70), Routing::PmReviewQueue);
        assert_eq!(Routing::for_confidence(0.699_999), Routing::PmImmediateReview);
    }

    #[test]
    fn catalogue_constructors_bound_points_per_kind() {
        let strong = ConfidenceFactor::positive("detailed_description", 0.40, "very detailed");
        assert!((strong.points - 0.15).abs() < 1e-9);

        let flag = ConfidenceFactor::negative("image_contradiction", 0.75, "images disagree");
        assert!((flag.points + 0.30).abs() < 1e-9);

        let mild = ConfidenceFactor::negative("vague_language", 0.10, "hedged wording");
        assert!((mild.points + 0.10).abs() < 1e-9);
    }

    #[test]
    fn risk_flags_are_derived_from_negative_factors_only() {
        let result = route(vec![
            ConfidenceFactor::positive("clear_description", 0.10, "specific and detailed"),
            ConfidenceFactor::negative("borderline_severity", 0.15, "between HIGH and MEDIUM"),
            ConfidenceFactor::negative("missing_context", 0.10, "no property details"),
        ]);

        assert_eq!(result.risk_flags.len(), 2);
        assert!(result.risk_flags.contains("borderline_severity"));
        assert!(result.risk_flags.contains("missing_context"));
        assert!(!result.risk_flags.contains("clear_description"));
    }

    #[test]
    fn factor_order_is_preserved_for_audit_display() {
        let result = route(vec![
            ConfidenceFactor::negative("b_second", 0.05, "later"),
            ConfidenceFactor::positive("a_first", 0.05, "earlier"),
        ]);
        assert_eq!(result.factors[0].name, "b_second");
        assert_eq!(result.factors[1].name, "a_first");
    }
}
