use async_trait::async_trait;
use thiserror::Error;

use freightdesk_core::domain::contract::{BrokerContract, ContractId};
use freightdesk_core::domain::quote::{Quote, QuoteId};
use freightdesk_core::domain::shipper::{Shipper, ShipperId};
use freightdesk_core::workflow::states::{AcceptanceWorkflow, WorkflowId};

pub mod memory;

pub use memory::{
    InMemoryContractRepository, InMemoryQuoteRepository, InMemoryShipperRepository,
    InMemoryWorkflowRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<Quote>, RepositoryError>;
    async fn save(&self, quote: Quote) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &WorkflowId,
    ) -> Result<Option<AcceptanceWorkflow>, RepositoryError>;

    /// All workflows initialized for a quote. More than one entry is
    /// possible because initialization never deduplicates.
    async fn find_by_quote(
        &self,
        quote_id: &QuoteId,
    ) -> Result<Vec<AcceptanceWorkflow>, RepositoryError>;

    async fn save(&self, workflow: AcceptanceWorkflow) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn find_by_id(&self, id: &ContractId)
        -> Result<Option<BrokerContract>, RepositoryError>;
    async fn list(&self) -> Result<Vec<BrokerContract>, RepositoryError>;
    async fn save(&self, contract: BrokerContract) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ShipperRepository: Send + Sync {
    async fn find_by_id(&self, id: &ShipperId) -> Result<Option<Shipper>, RepositoryError>;
    async fn save(&self, shipper: Shipper) -> Result<(), RepositoryError>;
}
