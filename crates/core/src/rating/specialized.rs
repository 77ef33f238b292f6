use rust_decimal::Decimal;

use crate::domain::quote::{SpecializedRequest, SpecializedService};
use crate::rating::round_currency;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecializedBreakdown {
    pub base_rate: Decimal,
    /// 1% of declared value.
    pub insurance: Decimal,
    pub fuel_surcharge: Decimal,
    pub total: Decimal,
}

/// Specialized rate card: $1.20/lb with a service multiplier, insurance at
/// 1% of declared value, and a 15% fuel surcharge on the base.
pub fn rate(request: &SpecializedRequest) -> SpecializedBreakdown {
    let mut base = request.weight_lb * Decimal::new(12, 1);

    base *= match request.service {
        SpecializedService::WhiteGlove => Decimal::new(15, 1),
        SpecializedService::InsideDelivery => Decimal::new(13, 1),
        SpecializedService::Liftgate => Decimal::new(12, 1),
        SpecializedService::Standard => Decimal::ONE,
    };

    let insurance_raw = request.declared_value * Decimal::new(1, 2);
    let fuel = base * Decimal::new(15, 2);

    let base_rate = round_currency(base);
    let insurance = round_currency(insurance_raw);
    let fuel_surcharge = round_currency(fuel);
    SpecializedBreakdown {
        base_rate,
        insurance,
        fuel_surcharge,
        total: base_rate + insurance + fuel_surcharge,
    }
}
