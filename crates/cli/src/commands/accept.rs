use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use freightdesk_core::clock::SystemClock;
use freightdesk_core::domain::contract::{
    BrokerContract, ContractId, ContractStatus, PaymentStatus,
};
use freightdesk_core::domain::quote::{FreightClass, LtlRequest, Quote, QuoteRequest};
use freightdesk_core::domain::shipper::{NewShipper, ShipperId};
use freightdesk_core::errors::ApplicationError;
use freightdesk_core::integrations::{
    ApprovalOutcome, ContractDesk, StubContractDesk, StubShipperDirectory,
};
use freightdesk_core::rating::{DeterministicRateEngine, RateEngine};
use freightdesk_core::workflow::states::{AcceptanceWorkflow, StepName, WorkflowPlan};
use freightdesk_db::repositories::{
    ContractRepository, InMemoryContractRepository, InMemoryQuoteRepository,
    InMemoryShipperRepository, InMemoryWorkflowRepository, QuoteRepository,
};
use freightdesk_db::AcceptanceWorkflowManager;

use super::{pretty_json, CommandResult};

#[derive(Debug, Serialize)]
struct AcceptTranscript {
    quote: Quote,
    workflow_id: String,
    plan: WorkflowPlan,
    shipper_id: String,
    steps: Vec<TranscriptStep>,
    contract: BrokerContract,
    approval: ApprovalOutcome,
}

#[derive(Debug, Serialize)]
struct TranscriptStep {
    step: &'static str,
    completed_by: Option<String>,
    completed_at: Option<String>,
}

fn transcript(
    workflow: &AcceptanceWorkflow,
    quote: Quote,
    contract: BrokerContract,
    approval: ApprovalOutcome,
) -> AcceptTranscript {
    AcceptTranscript {
        quote,
        contract,
        approval,
        workflow_id: workflow.id.0.clone(),
        plan: workflow.plan,
        shipper_id: workflow.shipper_id.0.clone(),
        steps: workflow
            .steps
            .iter()
            .map(|step| TranscriptStep {
                step: step.name.as_str(),
                completed_by: step.completed_by.clone(),
                completed_at: step.completed_at.map(|at| at.to_rfc3339()),
            })
            .collect(),
    }
}

fn sample_request() -> QuoteRequest {
    QuoteRequest::Ltl(LtlRequest {
        weight_lb: Decimal::from(1_000),
        pallets: 2,
        freight_class: FreightClass::C150,
        liftgate: true,
        residential: false,
        origin: "Atlanta, GA".to_owned(),
        destination: "Dallas, TX".to_owned(),
        commodity: "Auto parts".to_owned(),
    })
}

async fn run_workflow(automated: bool) -> Result<AcceptTranscript, ApplicationError> {
    let broker_id = "broker-001";
    let shipper_id = ShipperId("shipper-17".to_owned());

    let engine = DeterministicRateEngine::default();
    let quote = engine.rate(&sample_request())?;

    let quotes = InMemoryQuoteRepository::default();
    quotes.save(quote.clone()).await?;

    let manager = AcceptanceWorkflowManager::new(
        InMemoryWorkflowRepository::default(),
        InMemoryShipperRepository::default(),
        Box::new(StubShipperDirectory),
        SystemClock,
    );

    let plan =
        if automated { WorkflowPlan::WithShipperOnboarding } else { WorkflowPlan::Standard };
    let snapshot = serde_json::to_value(&quote)
        .map_err(|error| ApplicationError::Integration(error.to_string()))?;
    let workflow_id = manager
        .initialize(plan, quote.id.clone(), broker_id, shipper_id.clone(), snapshot)
        .await?;

    manager
        .complete_step(
            &workflow_id,
            StepName::QuoteGenerated,
            json!({ "quote_number": quote.quote_number }),
            broker_id,
        )
        .await?;
    manager
        .complete_step(
            &workflow_id,
            StepName::QuoteSentToShipper,
            json!({ "sent_at": Utc::now().to_rfc3339() }),
            broker_id,
        )
        .await?;
    manager
        .complete_step(
            &workflow_id,
            StepName::QuoteReviewedByShipper,
            json!({ "reviewed_at": Utc::now().to_rfc3339() }),
            &shipper_id.0,
        )
        .await?;
    manager
        .complete_step(
            &workflow_id,
            StepName::QuoteAcceptedByShipper,
            json!({ "accepted_at": Utc::now().to_rfc3339() }),
            &shipper_id.0,
        )
        .await?;

    if automated {
        let intake = NewShipper {
            name: "Granite Foods".to_owned(),
            email: "ops@granitefoods.example".to_owned(),
            phone: "555-0188".to_owned(),
            address: "12 Cold Chain Rd".to_owned(),
        };
        manager
            .complete_step(
                &workflow_id,
                StepName::ShipperInformationCollected,
                serde_json::to_value(&intake)
                    .map_err(|error| ApplicationError::Integration(error.to_string()))?,
                "shipper",
            )
            .await?;
        manager
            .complete_step(
                &workflow_id,
                StepName::ShipperVerified,
                json!({ "credit_approved": true, "credit_limit": 50_000 }),
                broker_id,
            )
            .await?;
        manager.create_shipper_in_system(&workflow_id, intake).await?;
    }

    manager
        .complete_step(
            &workflow_id,
            StepName::ContractGenerationTriggered,
            json!({ "triggered_at": Utc::now().to_rfc3339() }),
            broker_id,
        )
        .await?;

    let workflow = manager.find(&workflow_id).await?;

    let accepted = quotes
        .find_by_id(&quote.id)
        .await?
        .ok_or_else(|| ApplicationError::Persistence("accepted quote vanished".to_owned()))?;
    let mut contract = generate_contract(&accepted, automated);
    let desk = StubContractDesk;
    let approval = desk
        .request_approval(&contract.id)
        .await
        .map_err(|error| ApplicationError::Integration(error.to_string()))?;
    if approval.accepted {
        contract.transition_to(ContractStatus::PendingApproval, Utc::now())?;
    }

    let contracts = InMemoryContractRepository::default();
    contracts.save(contract.clone()).await?;
    let contract = contracts
        .find_by_id(&contract.id)
        .await?
        .ok_or_else(|| ApplicationError::Persistence("generated contract vanished".to_owned()))?;

    Ok(transcript(&workflow, quote, contract, approval))
}

/// Draft broker-shipper agreement seeded from the accepted quote. Margin is
/// the standard 15% brokerage spread on the quoted total.
fn generate_contract(quote: &Quote, automated: bool) -> BrokerContract {
    let now = Utc::now();
    let (customer_name, customer_email, customer_phone) = if automated {
        (
            "Granite Foods",
            "ops@granitefoods.example",
            "555-0188",
        )
    } else {
        ("Acme Manufacturing", "ap@acme.example", "555-0101")
    };

    BrokerContract {
        id: ContractId(format!("contract-{}", quote.id.0)),
        contract_number: format!("BSA-{}", now.timestamp_millis()),
        quote_reference: Some(quote.id.clone()),
        customer_name: customer_name.to_owned(),
        customer_email: customer_email.to_owned(),
        customer_phone: customer_phone.to_owned(),
        total_value: quote.total,
        margin: (quote.total * Decimal::new(15, 2)).round_dp(2),
        status: ContractStatus::Draft,
        payment_status: PaymentStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

pub fn run(automated: bool) -> CommandResult {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("accept", "runtime", error.to_string(), 3),
    };

    match runtime.block_on(run_workflow(automated)) {
        Ok(transcript) => pretty_json("accept", &transcript),
        Err(error) => CommandResult::failure("accept", "workflow", error.to_string(), 2),
    }
}
