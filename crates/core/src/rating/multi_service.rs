use rust_decimal::Decimal;

use crate::domain::quote::{MultiServiceRequest, ServiceCost, ServiceKind};
use crate::errors::DomainError;
use crate::rating::round_currency;

#[derive(Clone, Debug, PartialEq)]
pub struct MultiServiceBreakdown {
    /// Sum of service costs after the bundle discount, rounded.
    pub discounted_rate: Decimal,
    pub discount: Decimal,
    pub fuel_surcharge: Decimal,
    pub total: Decimal,
    pub breakdown: Vec<ServiceCost>,
}

fn service_cost(service: ServiceKind, total_weight: Decimal) -> Decimal {
    match service {
        ServiceKind::Ltl => total_weight * Decimal::new(85, 2),
        ServiceKind::Ftl => Decimal::from(500),
        ServiceKind::Warehousing => (total_weight / Decimal::from(1_000)).ceil() * Decimal::from(25),
        ServiceKind::Specialized => total_weight * Decimal::new(12, 1),
        ServiceKind::MultiService => total_weight * Decimal::new(5, 1),
    }
}

/// Bundled quote across several service families. At least one service and
/// both locations are required; a 5% discount applies to bundles of two or
/// more services. The per-entry breakdown costs are rounded for display, but
/// the discount math runs on the unrounded sum.
pub fn rate(request: &MultiServiceRequest) -> Result<MultiServiceBreakdown, DomainError> {
    if request.selected_services.is_empty() {
        return Err(DomainError::validation(
            "selected_services",
            "at least one service is required",
        ));
    }
    if request.common_origin.trim().is_empty() {
        return Err(DomainError::validation("common_origin", "origin is required"));
    }
    if request.common_destination.trim().is_empty() {
        return Err(DomainError::validation("common_destination", "destination is required"));
    }

    let mut sum = Decimal::ZERO;
    let mut breakdown = Vec::with_capacity(request.selected_services.len());
    for service in &request.selected_services {
        let cost = service_cost(*service, request.total_weight_lb);
        sum += cost;
        breakdown.push(ServiceCost { service: *service, cost: round_currency(cost) });
    }

    let discount_raw = if request.selected_services.len() >= 2 {
        sum * Decimal::new(5, 2)
    } else {
        Decimal::ZERO
    };
    let discounted = sum - discount_raw;
    let fuel = discounted * Decimal::new(15, 2);

    let discounted_rate = round_currency(discounted);
    let fuel_surcharge = round_currency(fuel);
    Ok(MultiServiceBreakdown {
        discounted_rate,
        discount: round_currency(discount_raw),
        fuel_surcharge,
        total: discounted_rate + fuel_surcharge,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::quote::{MultiServiceRequest, ServiceKind};
    use crate::errors::DomainError;

    use super::rate;

    fn request(services: Vec<ServiceKind>, weight: i64) -> MultiServiceRequest {
        MultiServiceRequest {
            selected_services: services,
            common_origin: "Columbus, OH".to_owned(),
            common_destination: "Nashville, TN".to_owned(),
            total_weight_lb: Decimal::from(weight),
            notes: String::new(),
        }
    }

    #[test]
    fn two_service_bundle_discount_is_five_percent_of_the_sum() {
        let rated = rate(&request(vec![ServiceKind::Ltl, ServiceKind::Ftl], 1_000))
            .expect("valid bundle");

        // sum = 1000*0.85 + 500 = 1350; discount 67.5 -> 68 displayed
        assert_eq!(rated.discount, Decimal::from(68));
        // discounted 1282.5 -> 1283; fuel 192.375 -> 192
        assert_eq!(rated.discounted_rate, Decimal::from(1_283));
        assert_eq!(rated.fuel_surcharge, Decimal::from(192));
        assert_eq!(rated.total, Decimal::from(1_475));
    }

    #[test]
    fn bundle_discount_is_exact_when_the_sum_is_whole() {
        let rated = rate(&request(vec![ServiceKind::Ltl, ServiceKind::Ftl], 2_000))
            .expect("valid bundle");

        // sum = 2000*0.85 + 500 = 2200; exactly 5% off
        assert_eq!(rated.discount, Decimal::from(110));
        assert_eq!(rated.discounted_rate, Decimal::from(2_090));
    }

    #[test]
    fn single_service_bundle_gets_no_discount() {
        let rated = rate(&request(vec![ServiceKind::Specialized], 1_000)).expect("valid bundle");

        assert_eq!(rated.discount, Decimal::ZERO);
        assert_eq!(rated.discounted_rate, Decimal::from(1_200));
    }

    #[test]
    fn warehousing_component_bills_per_started_thousand_pounds() {
        let rated = rate(&request(vec![ServiceKind::Warehousing], 1_001)).expect("valid bundle");

        // ceil(1001/1000) * 25 = 50
        assert_eq!(rated.discounted_rate, Decimal::from(50));
    }

    #[test]
    fn breakdown_lists_every_selected_service() {
        let rated = rate(&request(
            vec![ServiceKind::Ltl, ServiceKind::Warehousing, ServiceKind::Specialized],
            2_000,
        ))
        .expect("valid bundle");

        let services: Vec<_> = rated.breakdown.iter().map(|line| line.service).collect();
        assert_eq!(
            services,
            vec![ServiceKind::Ltl, ServiceKind::Warehousing, ServiceKind::Specialized]
        );
        assert_eq!(rated.breakdown[0].cost, Decimal::from(1_700));
        assert_eq!(rated.breakdown[1].cost, Decimal::from(50));
        assert_eq!(rated.breakdown[2].cost, Decimal::from(2_400));
    }

    #[test]
    fn empty_service_selection_is_rejected() {
        let error = rate(&request(vec![], 1_000)).expect_err("must reject empty selection");
        assert!(matches!(
            error,
            DomainError::Validation { ref field, .. } if field == "selected_services"
        ));
    }

    #[test]
    fn blank_locations_are_rejected() {
        let mut input = request(vec![ServiceKind::Ltl], 1_000);
        input.common_origin = "   ".to_owned();
        let error = rate(&input).expect_err("must reject blank origin");
        assert!(matches!(
            error,
            DomainError::Validation { ref field, .. } if field == "common_origin"
        ));

        let mut input = request(vec![ServiceKind::Ltl], 1_000);
        input.common_destination = String::new();
        let error = rate(&input).expect_err("must reject blank destination");
        assert!(matches!(
            error,
            DomainError::Validation { ref field, .. } if field == "common_destination"
        ));
    }
}
