pub mod ftl;
pub mod ltl;
pub mod multi_service;
pub mod specialized;
pub mod warehousing;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::clock::{Clock, SystemClock};
use crate::domain::quote::{Quote, QuoteId, QuoteRequest, ServiceCost, SurchargeKind};
use crate::errors::DomainError;

/// Rounds to whole currency units with half-away-from-zero semantics. Every
/// published money figure passes through this at the points the rate cards
/// define, not only at display time.
pub(crate) fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub trait RateEngine: Send + Sync {
    fn rate(&self, request: &QuoteRequest) -> Result<Quote, DomainError>;
}

struct Components {
    base_rate: Decimal,
    surcharge: Decimal,
    surcharge_kind: SurchargeKind,
    total: Decimal,
    insurance: Option<Decimal>,
    breakdown: Option<Vec<ServiceCost>>,
    discount: Option<Decimal>,
}

impl Components {
    fn fuel(base_rate: Decimal, surcharge: Decimal, total: Decimal) -> Self {
        Self {
            base_rate,
            surcharge,
            surcharge_kind: SurchargeKind::Fuel,
            total,
            insurance: None,
            breakdown: None,
            discount: None,
        }
    }
}

/// Rate-card engine: pure arithmetic over the request, no I/O, no hidden
/// state. The injected clock only feeds quote numbers and timestamps.
pub struct DeterministicRateEngine<C = SystemClock> {
    clock: C,
}

impl Default for DeterministicRateEngine<SystemClock> {
    fn default() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C> DeterministicRateEngine<C>
where
    C: Clock,
{
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Rates the request and records a `quote.rated` or `quote.rejected`
    /// audit event alongside the result.
    pub fn rate_with_audit<S>(
        &self,
        request: &QuoteRequest,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<Quote, DomainError>
    where
        S: AuditSink,
    {
        match self.rate(request) {
            Ok(quote) => {
                sink.emit(
                    AuditEvent::new(
                        Some(quote.id.clone()),
                        audit.correlation_id.clone(),
                        "quote.rated",
                        AuditCategory::Rating,
                        audit.actor.clone(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("quote_number", quote.quote_number.clone())
                    .with_metadata("service", quote.kind.quote_prefix())
                    .with_metadata("total", quote.total.to_string()),
                );
                Ok(quote)
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        audit.quote_id.clone(),
                        audit.correlation_id.clone(),
                        "quote.rejected",
                        AuditCategory::Rating,
                        audit.actor.clone(),
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("service", request.kind().quote_prefix())
                    .with_metadata("error", error.to_string()),
                );
                Err(error)
            }
        }
    }
}

impl<C> RateEngine for DeterministicRateEngine<C>
where
    C: Clock,
{
    fn rate(&self, request: &QuoteRequest) -> Result<Quote, DomainError> {
        let generated_at = self.clock.now();
        let kind = request.kind();
        let quote_number = format!("{}-{}", kind.quote_prefix(), generated_at.timestamp_millis());

        let components = match request {
            QuoteRequest::Ltl(ltl) => {
                let rated = ltl::rate(ltl);
                Components::fuel(rated.adjusted_rate, rated.fuel_surcharge, rated.total)
            }
            QuoteRequest::Ftl(ftl) => {
                let rated = ftl::rate(ftl);
                Components::fuel(rated.base_rate, rated.fuel_surcharge, rated.total)
            }
            QuoteRequest::Specialized(specialized) => {
                let rated = specialized::rate(specialized);
                let mut components =
                    Components::fuel(rated.base_rate, rated.fuel_surcharge, rated.total);
                components.insurance = Some(rated.insurance);
                components
            }
            QuoteRequest::Warehousing(warehousing) => {
                let rated = warehousing::rate(warehousing);
                Components {
                    surcharge_kind: SurchargeKind::Handling,
                    ..Components::fuel(rated.base_rate, rated.handling_fee, rated.total)
                }
            }
            QuoteRequest::MultiService(multi) => {
                let rated = multi_service::rate(multi)?;
                let mut components =
                    Components::fuel(rated.discounted_rate, rated.fuel_surcharge, rated.total);
                components.breakdown = Some(rated.breakdown);
                components.discount = Some(rated.discount);
                components
            }
        };

        Ok(Quote {
            id: QuoteId(Uuid::new_v4().to_string()),
            kind,
            quote_number,
            generated_at,
            base_rate: components.base_rate,
            surcharge: components.surcharge,
            surcharge_kind: components.surcharge_kind,
            total: components.total,
            insurance: components.insurance,
            service_breakdown: components.breakdown,
            discount: components.discount,
            detail: request.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::audit::{AuditContext, AuditOutcome, InMemoryAuditSink};
    use crate::clock::FixedClock;
    use crate::domain::quote::{
        FreightClass, LtlRequest, MultiServiceRequest, QuoteRequest, ServiceKind, SurchargeKind,
    };
    use crate::rating::{round_currency, DeterministicRateEngine, RateEngine};

    fn ltl_request() -> QuoteRequest {
        QuoteRequest::Ltl(LtlRequest {
            weight_lb: Decimal::from(1_000),
            pallets: 2,
            freight_class: FreightClass::C150,
            liftgate: true,
            residential: false,
            origin: "Atlanta, GA".to_owned(),
            destination: "Dallas, TX".to_owned(),
            commodity: "Auto parts".to_owned(),
        })
    }

    #[test]
    fn quote_number_embeds_prefix_and_epoch_millis() {
        let engine = DeterministicRateEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000));
        let quote = engine.rate(&ltl_request()).expect("ltl quote");

        assert_eq!(quote.kind, ServiceKind::Ltl);
        assert_eq!(quote.quote_number, "LTL-1730000000000");
        assert_eq!(quote.generated_at.timestamp_millis(), 1_730_000_000_000);
    }

    #[test]
    fn single_service_total_is_sum_of_rounded_components() {
        let engine = DeterministicRateEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000));
        let quote = engine.rate(&ltl_request()).expect("ltl quote");

        assert_eq!(quote.surcharge_kind, SurchargeKind::Fuel);
        assert_eq!(quote.total, quote.base_rate + quote.surcharge);
    }

    #[test]
    fn detail_echoes_the_originating_request() {
        let engine = DeterministicRateEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000));
        let request = ltl_request();
        let quote = engine.rate(&request).expect("ltl quote");
        assert_eq!(quote.detail, request);
    }

    #[test]
    fn rating_emits_a_success_audit_event() {
        let engine = DeterministicRateEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000));
        let sink = InMemoryAuditSink::default();
        let context = AuditContext::new(None, "req-11", "broker-001");

        let quote = engine
            .rate_with_audit(&ltl_request(), &sink, &context)
            .expect("ltl quote");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "quote.rated");
        assert_eq!(events[0].quote_id.as_ref(), Some(&quote.id));
        assert_eq!(events[0].metadata.get("quote_number").map(String::as_str), Some("LTL-1730000000000"));
        assert_eq!(events[0].metadata.get("total").map(String::as_str), Some("1443"));
    }

    #[test]
    fn rejected_rating_emits_a_rejection_audit_event() {
        let engine = DeterministicRateEngine::new(FixedClock::at_epoch_millis(1_730_000_000_000));
        let sink = InMemoryAuditSink::default();
        let context = AuditContext::new(None, "req-12", "broker-001");

        let request = QuoteRequest::MultiService(MultiServiceRequest {
            selected_services: vec![],
            common_origin: "Columbus, OH".to_owned(),
            common_destination: "Nashville, TN".to_owned(),
            total_weight_lb: Decimal::from(1_000),
            notes: String::new(),
        });
        engine
            .rate_with_audit(&request, &sink, &context)
            .expect_err("empty selection must be rejected");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "quote.rejected");
        assert_eq!(events[0].outcome, AuditOutcome::Rejected);
        assert_eq!(events[0].metadata.get("service").map(String::as_str), Some("MS"));
        assert!(events[0].metadata.contains_key("error"));
    }

    #[test]
    fn currency_rounding_is_half_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(18825, 2)), Decimal::from(188));
        assert_eq!(round_currency(Decimal::new(1885, 1)), Decimal::from(189));
        assert_eq!(round_currency(Decimal::new(25, 1)), Decimal::from(3));
    }
}
