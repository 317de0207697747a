//! Staged decision pipeline: Priority -> SLA -> Confidence -> optional
//! vendor assignment. Each stage is a pure function of the request; vendor
//! matching can fail to produce candidates without blocking the rest.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::assignment::{
    AssignmentResult, AtomicFairnessCounter, FairnessCounter, Vendor, VendorMatcher,
};
use super::confidence::{self, ConfidenceFactor, ConfidenceResult};
use super::domain::{Classification, RequestContext};
use super::priority::{self, PriorityResult};
use super::sla::{self, BusinessCalendar, SlaResolution};

/// Fully structured engine input: validated classification tags plus the
/// request facts and, optionally, a vendor pool to match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub classification: Classification,
    #[serde(default)]
    pub context: RequestContext,
    pub reported_at: NaiveDateTime,
    #[serde(default)]
    pub confidence_factors: Vec<ConfidenceFactor>,
    #[serde(default)]
    pub tenant_preferred_times: Vec<String>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}

/// Combined output of all stages for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub priority: PriorityResult,
    pub sla: SlaResolution,
    pub confidence: ConfidenceResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AssignmentResult>,
}

/// Engine facade over the business calendar and the injected fairness
/// counter (the only shared mutable state in the engine).
pub struct TriageEngine<C = AtomicFairnessCounter> {
    matcher: VendorMatcher<C>,
    calendar: BusinessCalendar,
}

impl TriageEngine<AtomicFairnessCounter> {
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self::with_counter(calendar, AtomicFairnessCounter::new())
    }
}

impl Default for TriageEngine<AtomicFairnessCounter> {
    fn default() -> Self {
        Self::new(BusinessCalendar::default())
    }
}

impl<C: FairnessCounter> TriageEngine<C> {
    pub fn with_counter(calendar: BusinessCalendar, counter: C) -> Self {
        Self {
            matcher: VendorMatcher::with_counter(counter),
            calendar,
        }
    }

    pub fn decide(&self, request: &TriageRequest) -> TriageDecision {
        let severity = request.classification.severity;
        let trade = &request.classification.trade;

        let priority = priority::score(severity, trade, &request.context);
        info!(
            severity = severity.label(),
            trade = trade.as_str(),
            score = priority.priority_score,
            "priority scored"
        );

        let sla = sla::resolve(severity, request.reported_at, &self.calendar);
        let confidence = confidence::route(request.confidence_factors.clone());
        info!(
            confidence = confidence.confidence,
            routing = confidence.routing.label(),
            "confidence routed"
        );

        let assignment = if request.vendors.is_empty() {
            None
        } else {
            let result =
                self.matcher
                    .assign(trade, &request.tenant_preferred_times, &request.vendors);
            info!(
                trade = trade.as_str(),
                total_available = result.total_available,
                assigned = result.assigned.len(),
                "vendors matched"
            );
            Some(result)
        };

        TriageDecision {
            priority,
            sla,
            confidence,
            assignment,
        }
    }
}
