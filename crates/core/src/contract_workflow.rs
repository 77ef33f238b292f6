use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::contract::{BrokerContract, ContractStatus, PaymentStatus};

/// The six externally-triggered milestones a broker contract moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractMilestone {
    Creation,
    ApprovalRequest,
    ManagementApproval,
    CustomerSignature,
    Invoicing,
    Payment,
}

impl ContractMilestone {
    pub const ALL: [ContractMilestone; 6] = [
        Self::Creation,
        Self::ApprovalRequest,
        Self::ManagementApproval,
        Self::CustomerSignature,
        Self::Invoicing,
        Self::Payment,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::Creation => "Contract drafted from the accepted quote",
            Self::ApprovalRequest => "Approval requested from management",
            Self::ManagementApproval => "Management approval granted",
            Self::CustomerSignature => "Customer signature received",
            Self::Invoicing => "Invoice generated and sent",
            Self::Payment => "Payment received",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MilestoneView {
    pub milestone: ContractMilestone,
    pub description: &'static str,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractWorkflowView {
    pub steps: Vec<MilestoneView>,
    /// Percentage of milestones completed, whole number.
    pub progress: Decimal,
}

/// How far along the status chain a contract has moved. Cancelled contracts
/// rank at zero: the projection cannot know which states were reached before
/// cancellation, so only creation is reported.
fn status_rank(status: ContractStatus) -> u8 {
    match status {
        ContractStatus::Draft | ContractStatus::Cancelled => 0,
        ContractStatus::PendingApproval => 1,
        ContractStatus::Approved => 2,
        ContractStatus::Signed => 3,
        ContractStatus::Active | ContractStatus::Completed => 4,
    }
}

fn milestone_completed(contract: &BrokerContract, milestone: ContractMilestone) -> bool {
    let rank = status_rank(contract.status);
    match milestone {
        ContractMilestone::Creation => true,
        ContractMilestone::ApprovalRequest => rank >= 1,
        ContractMilestone::ManagementApproval => rank >= 2,
        ContractMilestone::CustomerSignature => rank >= 3,
        ContractMilestone::Invoicing => matches!(
            contract.payment_status,
            PaymentStatus::Invoiced | PaymentStatus::Overdue | PaymentStatus::Paid
        ),
        ContractMilestone::Payment => contract.payment_status == PaymentStatus::Paid,
    }
}

/// Read-only projection of a contract into the six-milestone progress view.
/// Pure function of `status` and `payment_status`; mutates nothing.
pub fn derive_contract_workflow(contract: &BrokerContract) -> ContractWorkflowView {
    let steps: Vec<MilestoneView> = ContractMilestone::ALL
        .iter()
        .map(|milestone| MilestoneView {
            milestone: *milestone,
            description: milestone.description(),
            completed: milestone_completed(contract, *milestone),
        })
        .collect();

    let completed = steps.iter().filter(|step| step.completed).count();
    let progress =
        (Decimal::from(completed) / Decimal::from(steps.len()) * Decimal::from(100)).round_dp(0);

    ContractWorkflowView { steps, progress }
}
