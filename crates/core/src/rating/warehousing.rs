use rust_decimal::Decimal;

use crate::domain::quote::{Temperature, WarehousingRequest, WarehousingService};
use crate::rating::round_currency;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarehousingBreakdown {
    pub base_rate: Decimal,
    pub handling_fee: Decimal,
    pub total: Decimal,
}

/// Warehousing rate card: $25 per pallet per month, service and temperature
/// multipliers stacked, plus a 10% handling fee.
pub fn rate(request: &WarehousingRequest) -> WarehousingBreakdown {
    let mut base =
        Decimal::from(request.pallet_count) * Decimal::from(25) * Decimal::from(request.duration_months);

    base *= match request.service {
        WarehousingService::CrossDock => Decimal::new(8, 1),
        WarehousingService::PickPack => Decimal::new(13, 1),
        WarehousingService::Kitting => Decimal::new(14, 1),
        WarehousingService::Distribution => Decimal::new(12, 1),
        WarehousingService::Storage => Decimal::ONE,
    };

    base *= match request.temperature {
        Temperature::Refrigerated => Decimal::new(15, 1),
        Temperature::Frozen => Decimal::from(2),
        Temperature::Ambient | Temperature::ClimateControlled => Decimal::ONE,
    };

    let handling = base * Decimal::new(1, 1);

    let base_rate = round_currency(base);
    let handling_fee = round_currency(handling);
    WarehousingBreakdown { base_rate, handling_fee, total: base_rate + handling_fee }
}
