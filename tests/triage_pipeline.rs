use chrono::{NaiveDate, NaiveDateTime};
use maintenance_triage::engine::{
    BusinessCalendar, Classification, ConfidenceFactor, RequestContext, Routing, Severity,
    SeverityBand, TimeWindow, TriageEngine, TriageRequest, Vendor,
};

fn reported(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}

fn classification(severity: &str, trade: &str) -> Classification {
    Classification::from_tags(severity, trade).expect("valid classification tags")
}

fn plumber(id: &str, name: &str, availability: &[&str], handles_emergency: bool) -> Vendor {
    Vendor {
        vendor_id: id.to_string(),
        company_name: name.to_string(),
        primary_trade: "PLUMBING".to_string(),
        availability: availability
            .iter()
            .map(|raw| TimeWindow::parse(raw).expect("valid availability window"))
            .collect(),
        handles_emergency,
    }
}

fn base_request(severity: &str, trade: &str) -> TriageRequest {
    TriageRequest {
        classification: classification(severity, trade),
        context: RequestContext::default(),
        reported_at: reported(2025, 3, 3, 10, 0),
        confidence_factors: Vec::new(),
        tenant_preferred_times: Vec::new(),
        vendors: Vec::new(),
    }
}

#[test]
fn late_night_gas_leak_gets_top_priority_and_emergency_vendor() {
    let mut request = base_request("EMERGENCY", "PLUMBING");
    request.context.hazards.gas_leak = true;
    request.context.timing.is_late_night = true;
    request.reported_at = reported(2025, 3, 3, 22, 15);
    request.tenant_preferred_times = vec!["ASAP".to_string()];
    request.confidence_factors = vec![ConfidenceFactor::negative(
        "borderline_severity",
        0.15,
        "description consistent with HIGH as well",
    )];
    request.vendors = vec![
        plumber("V-EM", "Night Flow Plumbing", &[], true),
        plumber("V-DAY", "Daylight Drains", &["Monday 08:00-17:00"], false),
    ];

    let decision = TriageEngine::default().decide(&request);

    // 5.667 × gas 4.0 × late night 1.35 × late-night-emergency 1.25 = 38.252.
    assert_eq!(decision.priority.priority_score, 97);
    assert!(decision
        .priority
        .calculation_trace
        .contains("HR[gas_leak]=4.0"));
    assert!(decision
        .priority
        .calculation_trace
        .contains("IR[late_night_emergency]=1.25"));

    // Emergency tier: wall-clock deadlines, no calendar involvement.
    assert_eq!(decision.sla.spec.response_hours, 4);
    assert_eq!(decision.sla.response_deadline, reported(2025, 3, 4, 2, 15));
    assert_eq!(decision.sla.resolution_deadline, reported(2025, 3, 4, 22, 15));

    // 0.70 - 0.15 = 0.55, below the review-queue threshold.
    assert_eq!(decision.confidence.routing, Routing::PmImmediateReview);
    assert!(decision.confidence.risk_flags.contains("borderline_severity"));

    let assignment = decision.assignment.expect("vendor pool supplied");
    assert_eq!(assignment.total_available, 2);
    assert_eq!(assignment.assigned[0].vendor.vendor_id, "V-EM");
    assert_eq!(assignment.assigned[0].matched_times, vec!["ASAP".to_string()]);
    assert!(assignment.assigned[1].matched_times.is_empty());
}

#[test]
fn cold_snap_no_heat_for_elderly_tenant_compounds_hazards() {
    let mut request = base_request("HIGH", "HVAC");
    request.context.tenant.is_elderly = true;
    request.context.weather.outdoor_temp_f = 35.0;
    request.context.timing.is_weekend = true;
    // Saturday noon; HIGH counts business hours only.
    request.reported_at = reported(2025, 1, 11, 12, 0);

    let decision = TriageEngine::default().decide(&request);

    // elderly 1.5 × extreme cold 2.2 × weekend 1.15, plus the
    // vulnerability/environmental interaction at 1.5.
    let trace = &decision.priority.calculation_trace;
    assert!(trace.contains("HR[elderly_tenant]=1.5"));
    assert!(trace.contains("HR[extreme_cold_no_heat]=2.2"));
    assert!(trace.contains("HR[weekend]=1.15"));
    assert!(trace.contains("IR[vulnerability_environmental]=1.5"));
    assert!(SeverityBand::of(Severity::High).contains(decision.priority.priority_score));
    assert_eq!(decision.priority.priority_score, 76);

    // Counting starts Monday 08:00; 24 business hours at 10h/day
    // lands Wednesday 12:00.
    assert_eq!(
        decision.sla.response_deadline,
        reported(2025, 1, 15, 12, 0)
    );
}

#[test]
fn strong_signals_auto_approve_without_risk_flags() {
    let mut request = base_request("MEDIUM", "APPLIANCE");
    request.confidence_factors = vec![
        ConfidenceFactor::positive("detailed_description", 0.15, "model and symptom named"),
        ConfidenceFactor::positive("clear_photos", 0.10, "photos match the description"),
    ];

    let decision = TriageEngine::default().decide(&request);

    assert!((decision.confidence.confidence - 0.95).abs() < 1e-9);
    assert_eq!(decision.confidence.routing, Routing::AutoApprove);
    assert!(decision.confidence.risk_flags.is_empty());
}

#[test]
fn neutral_medium_request_sits_at_band_floor_with_business_sla() {
    let request = base_request("MEDIUM", "GENERAL");

    let decision = TriageEngine::default().decide(&request);

    assert_eq!(decision.priority.priority_score, 25);
    assert!(decision.priority.applied_factors.is_empty());
    assert!(decision.priority.calculation_trace.starts_with("h0=0.429"));
    assert_eq!(decision.sla.spec.response_hours, 48);
    assert_eq!(decision.sla.spec.resolution_hours, 120);
    // Monday 10:00 + 48 business hours at 10h/day: Mon 8h, Tue 10h,
    // Wed 10h, Thu 10h, Fri 10h -> Friday close.
    assert_eq!(decision.sla.response_deadline, reported(2025, 3, 7, 18, 0));
}

#[test]
fn repeated_decisions_rotate_tied_vendors() {
    let mut request = base_request("MEDIUM", "PLUMBING");
    request.tenant_preferred_times = vec!["Monday 09:00-12:00".to_string()];
    request.vendors = vec![
        plumber("V1", "First Call", &["Monday 08:00-17:00"], false),
        plumber("V2", "Second Wind", &["Monday 08:00-17:00"], false),
        plumber("V3", "Third Rail", &["Monday 08:00-17:00"], false),
    ];

    let engine = TriageEngine::default();
    let primaries: Vec<String> = (0..3)
        .map(|_| {
            let decision = engine.decide(&request);
            let assignment = decision.assignment.expect("vendor pool supplied");
            assignment.assigned[0].vendor.vendor_id.clone()
        })
        .collect();

    assert_eq!(primaries, vec!["V1", "V2", "V3"]);
}

#[test]
fn unmatched_trade_yields_an_empty_assignment_not_an_error() {
    let mut request = base_request("LOW", "ROOFING");
    request.tenant_preferred_times = vec!["Monday 09:00-12:00".to_string()];
    request.vendors = vec![plumber("V1", "First Call", &["Monday 08:00-17:00"], false)];

    let decision = TriageEngine::default().decide(&request);

    let assignment = decision.assignment.expect("vendor pool supplied");
    assert_eq!(assignment.total_available, 0);
    assert!(assignment.assigned.is_empty());
}

#[test]
fn configured_calendar_shifts_business_deadlines() {
    // 9-17 calendar: 8 business hours per day.
    let calendar = BusinessCalendar::new(9, 17).expect("valid business hours");
    let engine = TriageEngine::new(calendar);

    let mut request = base_request("HIGH", "GENERAL");
    request.reported_at = reported(2025, 3, 3, 9, 0);

    let decision = engine.decide(&request);

    // Monday 09:00 + 24 business hours at 8h/day: Mon 8h, Tue 8h,
    // Wed 8h -> Wednesday close.
    assert_eq!(decision.sla.response_deadline, reported(2025, 3, 5, 17, 0));
}

#[test]
fn decision_serializes_with_audit_fields() {
    let mut request = base_request("EMERGENCY", "PLUMBING");
    request.context.hazards.gas_leak = true;

    let decision = TriageEngine::default().decide(&request);
    let value = serde_json::to_value(&decision).expect("decision serializes");

    assert!(value["priority"]["calculation_trace"]
        .as_str()
        .expect("trace is a string")
        .starts_with("h0=5.667"));
    assert_eq!(value["priority"]["priority_score"], 95);
    assert_eq!(value["sla"]["spec"]["vendor_tier"], "ANY");
    assert_eq!(value["confidence"]["routing"], "PM_REVIEW_QUEUE");
    assert!(value.get("assignment").is_none());
}
