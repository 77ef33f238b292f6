use std::fs;
use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use freightdesk_core::contract_workflow::{derive_contract_workflow, ContractWorkflowView};
use freightdesk_core::domain::contract::{
    BrokerContract, ContractId, ContractStatus, PaymentStatus,
};

use super::{pretty_json, CommandResult};

#[derive(Debug, Serialize)]
struct ContractStatusReport {
    contract_number: String,
    status: ContractStatus,
    payment_status: PaymentStatus,
    total_value: Decimal,
    margin: Decimal,
    margin_percent: Decimal,
    workflow: ContractWorkflowView,
}

fn sample_contract() -> BrokerContract {
    let now = Utc::now();
    BrokerContract {
        id: ContractId("BC-2026-0001".to_owned()),
        contract_number: "BSA-2026-0001".to_owned(),
        quote_reference: None,
        customer_name: "Granite Foods".to_owned(),
        customer_email: "ap@granitefoods.example".to_owned(),
        customer_phone: "555-0188".to_owned(),
        total_value: Decimal::from(45_000),
        margin: Decimal::from(6_750),
        status: ContractStatus::Approved,
        payment_status: PaymentStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

fn report(contract: &BrokerContract) -> ContractStatusReport {
    ContractStatusReport {
        contract_number: contract.contract_number.clone(),
        status: contract.status,
        payment_status: contract.payment_status,
        total_value: contract.total_value,
        margin: contract.margin,
        margin_percent: contract.margin_percent(),
        workflow: derive_contract_workflow(contract),
    }
}

pub fn run(file: Option<&Path>, sample: bool) -> CommandResult {
    let contract = match (file, sample) {
        (Some(path), _) => {
            let contents = match fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(error) => {
                    return CommandResult::failure(
                        "contract-status",
                        "io",
                        format!("could not read `{}`: {error}", path.display()),
                        2,
                    );
                }
            };
            match serde_json::from_str::<BrokerContract>(&contents) {
                Ok(contract) => contract,
                Err(error) => {
                    return CommandResult::failure(
                        "contract-status",
                        "parse",
                        format!("invalid contract JSON: {error}"),
                        2,
                    );
                }
            }
        }
        (None, true) => sample_contract(),
        (None, false) => {
            return CommandResult::failure(
                "contract-status",
                "usage",
                "provide --file <path> or --sample",
                2,
            );
        }
    };

    let report = report(&contract);
    info!(
        contract_number = %report.contract_number,
        progress = %report.workflow.progress,
        "contract workflow derived"
    );
    pretty_json("contract-status", &report)
}
