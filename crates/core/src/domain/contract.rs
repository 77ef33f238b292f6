use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::QuoteId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    PendingApproval,
    Approved,
    Signed,
    Active,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Invoiced,
    Paid,
    Overdue,
}

/// Broker-shipper agreement generated off an accepted quote. All transitions
/// are externally triggered; there are no timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrokerContract {
    pub id: ContractId,
    pub contract_number: String,
    pub quote_reference: Option<QuoteId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub total_value: Decimal,
    pub margin: Decimal,
    pub status: ContractStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BrokerContract {
    /// Margin as a percentage of total value, one decimal place. Zero-value
    /// contracts report 0 rather than dividing by zero.
    pub fn margin_percent(&self) -> Decimal {
        if self.total_value.is_zero() {
            return Decimal::ZERO;
        }

        (self.margin / self.total_value * Decimal::from(100)).round_dp(1)
    }

    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        use ContractStatus::{
            Active, Approved, Cancelled, Completed, Draft, PendingApproval, Signed,
        };

        matches!(
            (self.status, next),
            (Draft, PendingApproval)
                | (PendingApproval, Approved)
                | (Approved, Signed)
                | (Signed, Active)
                | (Active, Completed)
                | (
                    Draft | PendingApproval | Approved | Signed | Active,
                    Cancelled
                )
        )
    }

    pub fn transition_to(&mut self, next: ContractStatus, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.status = next;
            self.updated_at = now;
            return Ok(());
        }

        Err(DomainError::InvalidContractTransition { from: self.status, to: next })
    }

    pub fn can_transition_payment_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::{Invoiced, Overdue, Paid, Pending};

        matches!(
            (self.payment_status, next),
            (Pending, Invoiced) | (Invoiced, Paid) | (Invoiced, Overdue) | (Overdue, Paid)
        )
    }

    pub fn transition_payment_to(
        &mut self,
        next: PaymentStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.can_transition_payment_to(next) {
            self.payment_status = next;
            self.updated_at = now;
            return Ok(());
        }

        Err(DomainError::InvalidPaymentTransition { from: self.payment_status, to: next })
    }
}
