use std::collections::HashMap;

use tokio::sync::RwLock;

use freightdesk_core::domain::contract::{BrokerContract, ContractId};
use freightdesk_core::domain::quote::{Quote, QuoteId};
use freightdesk_core::domain::shipper::{Shipper, ShipperId};
use freightdesk_core::workflow::states::{AcceptanceWorkflow, WorkflowId};

use super::{
    ContractRepository, QuoteRepository, RepositoryError, ShipperRepository, WorkflowRepository,
};

#[derive(Default)]
pub struct InMemoryQuoteRepository {
    quotes: RwLock<HashMap<String, Quote>>,
}

#[async_trait::async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn find_by_id(&self, id: &QuoteId) -> Result<Option<Quote>, RepositoryError> {
        let quotes = self.quotes.read().await;
        Ok(quotes.get(&id.0).cloned())
    }

    async fn save(&self, quote: Quote) -> Result<(), RepositoryError> {
        let mut quotes = self.quotes.write().await;
        quotes.insert(quote.id.0.clone(), quote);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryWorkflowRepository {
    workflows: RwLock<HashMap<String, AcceptanceWorkflow>>,
}

#[async_trait::async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn find_by_id(
        &self,
        id: &WorkflowId,
    ) -> Result<Option<AcceptanceWorkflow>, RepositoryError> {
        let workflows = self.workflows.read().await;
        Ok(workflows.get(&id.0).cloned())
    }

    async fn find_by_quote(
        &self,
        quote_id: &QuoteId,
    ) -> Result<Vec<AcceptanceWorkflow>, RepositoryError> {
        let workflows = self.workflows.read().await;
        let mut matches: Vec<AcceptanceWorkflow> = workflows
            .values()
            .filter(|workflow| workflow.quote_id == *quote_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(matches)
    }

    async fn save(&self, workflow: AcceptanceWorkflow) -> Result<(), RepositoryError> {
        let mut workflows = self.workflows.write().await;
        workflows.insert(workflow.id.0.clone(), workflow);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryContractRepository {
    contracts: RwLock<HashMap<String, BrokerContract>>,
}

#[async_trait::async_trait]
impl ContractRepository for InMemoryContractRepository {
    async fn find_by_id(
        &self,
        id: &ContractId,
    ) -> Result<Option<BrokerContract>, RepositoryError> {
        let contracts = self.contracts.read().await;
        Ok(contracts.get(&id.0).cloned())
    }

    async fn list(&self) -> Result<Vec<BrokerContract>, RepositoryError> {
        let contracts = self.contracts.read().await;
        let mut all: Vec<BrokerContract> = contracts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn save(&self, contract: BrokerContract) -> Result<(), RepositoryError> {
        let mut contracts = self.contracts.write().await;
        contracts.insert(contract.id.0.clone(), contract);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryShipperRepository {
    shippers: RwLock<HashMap<String, Shipper>>,
}

#[async_trait::async_trait]
impl ShipperRepository for InMemoryShipperRepository {
    async fn find_by_id(&self, id: &ShipperId) -> Result<Option<Shipper>, RepositoryError> {
        let shippers = self.shippers.read().await;
        Ok(shippers.get(&id.0).cloned())
    }

    async fn save(&self, shipper: Shipper) -> Result<(), RepositoryError> {
        let mut shippers = self.shippers.write().await;
        shippers.insert(shipper.id.0.clone(), shipper);
        Ok(())
    }
}
