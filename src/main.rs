use clap::{Args, Parser, Subcommand};
use maintenance_triage::config::AppConfig;
use maintenance_triage::engine::{TriageEngine, TriageRequest};
use maintenance_triage::error::AppError;
use maintenance_triage::telemetry;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Maintenance Triage Engine",
    about = "Score, route, and assign classified maintenance requests from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full triage pipeline on a request file and print the decision
    Decide(DecideArgs),
}

#[derive(Args, Debug)]
struct DecideArgs {
    /// Path to a JSON triage request
    request: PathBuf,
    /// Pretty-print the decision JSON
    #[arg(long)]
    pretty: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Decide(args) => run_decide(args),
    }
}

fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw = fs::read_to_string(&args.request)?;
    let request: TriageRequest = serde_json::from_str(&raw)?;

    let calendar = config.business_hours.calendar()?;
    let engine = TriageEngine::new(calendar);
    let decision = engine.decide(&request);

    info!(
        severity = request.classification.severity.label(),
        score = decision.priority.priority_score,
        routing = decision.confidence.routing.label(),
        "decision rendered"
    );

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&decision)?
    } else {
        serde_json::to_string(&decision)?
    };
    println!("{rendered}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maintenance_triage::engine::Routing;

    #[test]
    fn request_file_contents_drive_a_full_decision() {
        let raw = r#"{
            "classification": { "severity": "EMERGENCY", "trade": "PLUMBING" },
            "reported_at": "2025-03-03T22:15:00",
            "context": { "hazards": { "gas_leak": true }, "timing": { "is_late_night": true } },
            "tenant_preferred_times": ["ASAP"],
            "vendors": [{
                "vendor_id": "V-100",
                "company_name": "Night Flow Plumbing",
                "primary_trade": "PLUMBING",
                "handles_emergency": true
            }]
        }"#;

        let request: TriageRequest = serde_json::from_str(raw).expect("valid request");
        let engine = TriageEngine::default();
        let decision = engine.decide(&request);

        assert!(decision.priority.priority_score >= 80);
        assert_eq!(decision.sla.spec.response_hours, 4);
        assert_eq!(decision.confidence.routing, Routing::PmReviewQueue);
        let assignment = decision.assignment.expect("vendor pool supplied");
        assert_eq!(assignment.assigned[0].vendor.vendor_id, "V-100");
    }

    #[test]
    fn malformed_request_surfaces_a_json_error() {
        let err = serde_json::from_str::<TriageRequest>("{}").expect_err("missing fields rejected");
        let app_err = AppError::from(err);
        assert!(app_err.to_string().starts_with("json error"));
    }
}
