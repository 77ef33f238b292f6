use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::quote::QuoteId;
use crate::domain::shipper::ShipperId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(pub String);

/// Steps between a generated quote and a triggered contract generation, in
/// the order they must complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    QuoteGenerated,
    QuoteSentToShipper,
    QuoteReviewedByShipper,
    QuoteAcceptedByShipper,
    ShipperInformationCollected,
    ShipperVerified,
    ContractGenerationTriggered,
}

impl StepName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuoteGenerated => "quote_generated",
            Self::QuoteSentToShipper => "quote_sent_to_shipper",
            Self::QuoteReviewedByShipper => "quote_reviewed_by_shipper",
            Self::QuoteAcceptedByShipper => "quote_accepted_by_shipper",
            Self::ShipperInformationCollected => "shipper_information_collected",
            Self::ShipperVerified => "shipper_verified",
            Self::ContractGenerationTriggered => "contract_generation_triggered",
        }
    }
}

/// Which step sequence a workflow runs. `Standard` goes straight from
/// acceptance to contract generation against an existing shipper;
/// `WithShipperOnboarding` inserts the information-collection and
/// verification steps for shippers not yet in the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPlan {
    Standard,
    WithShipperOnboarding,
}

impl WorkflowPlan {
    pub fn steps(&self) -> &'static [StepName] {
        use StepName::{
            ContractGenerationTriggered, QuoteAcceptedByShipper, QuoteGenerated,
            QuoteReviewedByShipper, QuoteSentToShipper, ShipperInformationCollected,
            ShipperVerified,
        };

        match self {
            Self::Standard => &[
                QuoteGenerated,
                QuoteSentToShipper,
                QuoteReviewedByShipper,
                QuoteAcceptedByShipper,
                ContractGenerationTriggered,
            ],
            Self::WithShipperOnboarding => &[
                QuoteGenerated,
                QuoteSentToShipper,
                QuoteReviewedByShipper,
                QuoteAcceptedByShipper,
                ShipperInformationCollected,
                ShipperVerified,
                ContractGenerationTriggered,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: StepName,
    pub status: StepStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<String>,
    pub payload: Option<Value>,
}

impl WorkflowStep {
    pub fn pending(name: StepName) -> Self {
        Self { name, status: StepStatus::Pending, completed_at: None, completed_by: None, payload: None }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StepStatus::Completed
    }
}

/// Tracker for one quote's path from generation to contract generation.
/// Append-only: steps flip from pending to completed and never back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceWorkflow {
    pub id: WorkflowId,
    pub quote_id: QuoteId,
    pub broker_id: String,
    pub shipper_id: ShipperId,
    pub plan: WorkflowPlan,
    pub snapshot: Value,
    pub steps: Vec<WorkflowStep>,
    pub created_at: DateTime<Utc>,
}

impl AcceptanceWorkflow {
    pub fn step(&self, name: StepName) -> Option<&WorkflowStep> {
        self.steps.iter().find(|step| step.name == name)
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_completed()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(WorkflowStep::is_completed)
    }
}
