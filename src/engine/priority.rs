//! Priority scorer: maps a combined hazard into an auditable 0-100 integer
//! score that always lands inside its severity's contractual band.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::domain::{RequestContext, Severity, Trade};
use super::hazard::{self, AppliedFactor, AppliedInteraction};

/// Closed score range owned by a severity tier. Downstream SLA assignment
/// treats these bounds as a hard contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub floor: u8,
    pub ceiling: u8,
}

impl SeverityBand {
    pub const fn of(severity: Severity) -> Self {
        match severity {
            Severity::Low => SeverityBand { floor: 0, ceiling: 24 },
            Severity::Medium => SeverityBand { floor: 25, ceiling: 59 },
            Severity::High => SeverityBand { floor: 60, ceiling: 79 },
            Severity::Emergency => SeverityBand { floor: 80, ceiling: 100 },
        }
    }

    pub const fn contains(self, score: u8) -> bool {
        score >= self.floor && score <= self.ceiling
    }
}

/// Immutable scoring output for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub severity: Severity,
    pub base_hazard: f64,
    pub combined_hazard: f64,
    pub priority_score: u8,
    pub applied_factors: Vec<AppliedFactor>,
    pub applied_interactions: Vec<AppliedInteraction>,
    pub calculation_trace: String,
}

/// Compose the hazard model and normalize into the severity's band.
///
/// The saturating position `p = 1 - base/combined` starts at the band floor
/// when no factor applies and approaches the ceiling asymptotically as the
/// hazard grows, so the score is monotonic in the combined hazard and can
/// never escape the band.
pub fn score(severity: Severity, trade: &Trade, context: &RequestContext) -> PriorityResult {
    let breakdown = hazard::compose(severity, trade, context);
    let band = SeverityBand::of(severity);

    let position = saturating_position(breakdown.base_hazard, breakdown.combined_hazard);
    let span = f64::from(band.ceiling - band.floor);
    let raw = f64::from(band.floor) + (position * span).round();
    let priority_score = (raw as u8).clamp(band.floor, band.ceiling);

    let calculation_trace = render_trace(&breakdown, band, position, priority_score);

    PriorityResult {
        severity,
        base_hazard: breakdown.base_hazard,
        combined_hazard: breakdown.combined_hazard,
        priority_score,
        applied_factors: breakdown.factors,
        applied_interactions: breakdown.interactions,
        calculation_trace,
    }
}

fn saturating_position(base: f64, combined: f64) -> f64 {
    if combined <= base {
        return 0.0;
    }
    1.0 - base / combined
}

fn render_trace(
    breakdown: &hazard::HazardBreakdown,
    band: SeverityBand,
    position: f64,
    score: u8,
) -> String {
    let mut trace = format!("h0={:.3}", breakdown.base_hazard);
    for applied in &breakdown.factors {
        let _ = write!(trace, " × HR[{}]={:?}", applied.factor.key(), applied.ratio);
    }
    for applied in &breakdown.interactions {
        let _ = write!(
            trace,
            " × IR[{}]={:?}",
            applied.interaction.key(),
            applied.ratio
        );
    }
    let _ = write!(
        trace,
        " = {:.3}; band [{},{}] p={:.4} score={}",
        breakdown.combined_hazard, band.floor, band.ceiling, position, score
    );
    trace
}
