pub mod manager;
pub mod repositories;

pub use manager::AcceptanceWorkflowManager;
pub use repositories::{
    ContractRepository, InMemoryContractRepository, InMemoryQuoteRepository,
    InMemoryShipperRepository, InMemoryWorkflowRepository, QuoteRepository, RepositoryError,
    ShipperRepository, WorkflowRepository,
};
