use rust_decimal::Decimal;

use crate::domain::quote::LtlRequest;
use crate::rating::round_currency;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LtlBreakdown {
    /// Class-adjusted linehaul plus flat accessorials, rounded.
    pub adjusted_rate: Decimal,
    pub fuel_surcharge: Decimal,
    pub total: Decimal,
}

/// LTL rate card: $0.85/lb linehaul, class multiplier (first matching
/// threshold wins, checked high to low), flat liftgate/residential
/// accessorials, then a 15% fuel surcharge on the adjusted rate.
pub fn rate(request: &LtlRequest) -> LtlBreakdown {
    let mut base = request.weight_lb * Decimal::new(85, 2);

    let class_tenths = request.freight_class.tenths();
    if class_tenths >= 1750 {
        base *= Decimal::new(15, 1);
    } else if class_tenths >= 1250 {
        base *= Decimal::new(13, 1);
    } else if class_tenths >= 850 {
        base *= Decimal::new(11, 1);
    }

    let mut adjusted = base;
    if request.liftgate {
        adjusted += Decimal::from(150);
    }
    if request.residential {
        adjusted += Decimal::from(200);
    }

    let fuel = adjusted * Decimal::new(15, 2);

    let adjusted_rate = round_currency(adjusted);
    let fuel_surcharge = round_currency(fuel);
    // Components are rounded before summing; the summed total can differ by
    // one unit from rounding the raw sum, and that is the published figure.
    LtlBreakdown { adjusted_rate, fuel_surcharge, total: adjusted_rate + fuel_surcharge }
}
