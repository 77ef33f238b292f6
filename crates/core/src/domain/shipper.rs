use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipperId(pub String);

/// Intake payload collected at the `shipper_information_collected` step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewShipper {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipper {
    pub id: ShipperId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub credit_approved: bool,
    pub credit_limit: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Shipper {
    pub fn from_intake(id: ShipperId, intake: NewShipper, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: intake.name,
            email: intake.email,
            phone: intake.phone,
            address: intake.address,
            credit_approved: false,
            credit_limit: Decimal::ZERO,
            created_at,
        }
    }
}
