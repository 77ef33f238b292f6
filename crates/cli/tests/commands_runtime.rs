use chrono::DateTime;
use rust_decimal::Decimal;
use serde_json::Value;

use freightdesk_cli::commands::{accept, contract_status, rate};
use freightdesk_core::domain::quote::{EquipmentType, Temperature, WarehousingService};

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

#[test]
fn ftl_reefer_rate_matches_the_published_example() {
    let result = rate::run(&rate::RateService::Ftl {
        miles: Decimal::from(500),
        equipment: EquipmentType::Reefer,
        weight: Decimal::from(42_000),
        hazmat: false,
        team_driver: false,
        origin: "Laredo, TX".to_owned(),
        destination: "Kansas City, MO".to_owned(),
        commodity: "Produce".to_owned(),
    });
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["base_rate"], "1750");
    assert_eq!(payload["surcharge"], "315");
    assert_eq!(payload["total"], "2065");
    assert!(payload["quote_number"].as_str().expect("quote number").starts_with("FTL-"));
}

#[test]
fn frozen_kitting_warehousing_rate_matches_the_published_example() {
    let result = rate::run(&rate::RateService::Warehousing {
        service: WarehousingService::Kitting,
        pallets: 10,
        months: 3,
        location: "Reno, NV".to_owned(),
        temperature: Temperature::Frozen,
    });
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["base_rate"], "2100");
    assert_eq!(payload["surcharge"], "210");
    assert_eq!(payload["surcharge_kind"], "handling");
    assert_eq!(payload["total"], "2310");
}

#[test]
fn accept_transcript_timestamps_are_monotonically_non_decreasing() {
    let result = accept::run(true);
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    let steps = payload["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 7);

    let mut previous = None;
    for step in steps {
        let at = step["completed_at"].as_str().expect("every step is completed");
        let parsed = DateTime::parse_from_rfc3339(at).expect("rfc3339 timestamp");
        if let Some(previous) = previous {
            assert!(parsed >= previous, "timestamps regressed at {}", step["step"]);
        }
        previous = Some(parsed);
    }
}

#[test]
fn accept_transcript_ends_with_contract_generation() {
    let result = accept::run(false);
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    let steps = payload["steps"].as_array().expect("steps array");
    assert_eq!(
        steps.last().and_then(|step| step["step"].as_str()),
        Some("contract_generation_triggered")
    );
}

#[test]
fn contract_status_sample_reports_six_milestones() {
    let result = contract_status::run(None, true);
    assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

    let payload = parse_payload(&result.output);
    let steps = payload["workflow"]["steps"].as_array().expect("milestone array");
    assert_eq!(steps.len(), 6);
    assert_eq!(steps[0]["milestone"], "creation");
    assert_eq!(steps[0]["completed"], true);
}
