use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::contract::ContractId;
use crate::domain::shipper::{NewShipper, ShipperId};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntegrationError {
    #[error("shipper directory rejected the request: {0}")]
    ShipperDirectory(String),
    #[error("contract desk rejected the request: {0}")]
    ContractDesk(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipperCreated {
    pub shipper_id: ShipperId,
}

/// Directory of shipper records maintained outside this process. The core
/// only needs creation; reads stay with the owning system.
#[async_trait]
pub trait ShipperDirectory: Send + Sync {
    async fn create_shipper(&self, intake: NewShipper) -> Result<ShipperCreated, IntegrationError>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    pub accepted: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOutcome {
    pub success: bool,
    pub invoice_url: Option<String>,
    pub message: String,
}

/// Contract approval and invoicing, owned by the invoicing provider.
#[async_trait]
pub trait ContractDesk: Send + Sync {
    async fn request_approval(
        &self,
        contract_id: &ContractId,
    ) -> Result<ApprovalOutcome, IntegrationError>;

    async fn generate_invoice(
        &self,
        contract_id: &ContractId,
    ) -> Result<InvoiceOutcome, IntegrationError>;
}

/// Accepts every intake and assigns a fresh id, standing in for the real
/// directory in demos and tests.
#[derive(Clone, Debug, Default)]
pub struct StubShipperDirectory;

#[async_trait]
impl ShipperDirectory for StubShipperDirectory {
    async fn create_shipper(&self, intake: NewShipper) -> Result<ShipperCreated, IntegrationError> {
        if intake.name.trim().is_empty() {
            return Err(IntegrationError::ShipperDirectory(
                "shipper name is required".to_owned(),
            ));
        }
        Ok(ShipperCreated { shipper_id: ShipperId(format!("shipper-{}", Uuid::new_v4())) })
    }
}

/// Canned approval and invoicing responses.
#[derive(Clone, Debug, Default)]
pub struct StubContractDesk;

#[async_trait]
impl ContractDesk for StubContractDesk {
    async fn request_approval(
        &self,
        contract_id: &ContractId,
    ) -> Result<ApprovalOutcome, IntegrationError> {
        Ok(ApprovalOutcome {
            accepted: true,
            message: format!("Approval request submitted for contract {}", contract_id.0),
        })
    }

    async fn generate_invoice(
        &self,
        contract_id: &ContractId,
    ) -> Result<InvoiceOutcome, IntegrationError> {
        Ok(InvoiceOutcome {
            success: true,
            invoice_url: Some(format!("https://invoices.example/{}", contract_id.0)),
            message: format!("Invoice generated for contract {}", contract_id.0),
        })
    }
}
