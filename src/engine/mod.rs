//! Deterministic triage engine. Every stage is rule-driven: hazard ratios
//! compose multiplicatively into a priority score, severity maps to an SLA
//! through the business calendar, confidence factors route the request, and
//! the vendor matcher picks a primary plus backups.

pub mod assignment;
pub mod confidence;
pub mod domain;
pub mod hazard;
pub mod pipeline;
pub mod priority;
pub mod sla;

pub use assignment::{
    AssignedVendor, AssignmentResult, AssignmentRole, AtomicFairnessCounter, FairnessCounter,
    TimeWindow, Vendor, VendorMatcher,
};
pub use confidence::{ConfidenceFactor, ConfidenceResult, Routing};
pub use domain::{Classification, ClassificationError, RequestContext, Severity, Trade};
pub use hazard::{HazardBreakdown, HazardFactor, InteractionFactor};
pub use pipeline::{TriageDecision, TriageEngine, TriageRequest};
pub use priority::{PriorityResult, SeverityBand};
pub use sla::{BusinessCalendar, SlaResolution, SlaSpec, VendorTierRequirement};
