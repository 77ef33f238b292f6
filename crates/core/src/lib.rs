pub mod audit;
pub mod clock;
pub mod config;
pub mod contract_workflow;
pub mod domain;
pub mod errors;
pub mod integrations;
pub mod rating;
pub mod workflow;

pub use clock::{Clock, FixedClock, SystemClock};
pub use contract_workflow::{
    derive_contract_workflow, ContractMilestone, ContractWorkflowView, MilestoneView,
};
pub use domain::contract::{BrokerContract, ContractId, ContractStatus, PaymentStatus};
pub use domain::quote::{Quote, QuoteId, QuoteRequest, ServiceKind, SurchargeKind};
pub use domain::shipper::{NewShipper, Shipper, ShipperId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use rating::{DeterministicRateEngine, RateEngine};
pub use workflow::engine::WorkflowEngine;
pub use workflow::states::{
    AcceptanceWorkflow, StepName, StepStatus, WorkflowId, WorkflowPlan, WorkflowStep,
};
