use rust_decimal::Decimal;

use crate::domain::quote::{EquipmentType, FtlRequest};
use crate::rating::round_currency;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FtlBreakdown {
    pub base_rate: Decimal,
    pub fuel_surcharge: Decimal,
    pub total: Decimal,
}

/// FTL rate card: $2.50/mile linehaul, equipment multiplier, then hazmat and
/// team-driver multipliers stacked multiplicatively, plus an 18% fuel
/// surcharge on the resulting base.
pub fn rate(request: &FtlRequest) -> FtlBreakdown {
    let mut base = request.miles * Decimal::new(25, 1);

    base *= match request.equipment {
        EquipmentType::Flatbed => Decimal::new(13, 1),
        EquipmentType::Reefer => Decimal::new(14, 1),
        EquipmentType::PowerOnly => Decimal::new(8, 1),
        EquipmentType::Van | EquipmentType::StepDeck | EquipmentType::Lowboy => Decimal::ONE,
    };

    if request.hazmat {
        base *= Decimal::new(125, 2);
    }
    if request.team_driver {
        base *= Decimal::new(15, 1);
    }

    let fuel = base * Decimal::new(18, 2);

    let base_rate = round_currency(base);
    let fuel_surcharge = round_currency(fuel);
    FtlBreakdown { base_rate, fuel_surcharge, total: base_rate + fuel_surcharge }
}
