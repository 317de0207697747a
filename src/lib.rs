//! Deterministic decision engine for property maintenance triage.
//!
//! Classified maintenance requests flow through four stages: hazard-based
//! priority scoring, SLA resolution against a business calendar, confidence
//! routing, and round-robin vendor assignment. Every stage produces an
//! auditable breakdown so a reviewer can reconstruct the decision.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
