use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::{info, warn};

use freightdesk_core::domain::quote::{
    EquipmentType, FreightClass, FtlRequest, LtlRequest, MultiServiceRequest, QuoteRequest,
    ServiceKind, SpecializedRequest, SpecializedService, Temperature, WarehousingRequest,
    WarehousingService,
};
use freightdesk_core::rating::{DeterministicRateEngine, RateEngine};

use super::{pretty_json, CommandResult};

#[derive(Debug, Subcommand)]
pub enum RateService {
    #[command(about = "Less-than-truckload: priced by weight and freight class")]
    Ltl {
        #[arg(long, help = "Shipment weight in pounds")]
        weight: Decimal,
        #[arg(long, default_value_t = 1)]
        pallets: u32,
        #[arg(long, default_value = "50", help = "NMFC freight class (50-500)")]
        freight_class: FreightClass,
        #[arg(long)]
        liftgate: bool,
        #[arg(long)]
        residential: bool,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long, default_value = "")]
        commodity: String,
    },
    #[command(about = "Full truckload: priced by distance and equipment")]
    Ftl {
        #[arg(long)]
        miles: Decimal,
        #[arg(long, value_parser = parse_equipment, default_value = "van")]
        equipment: EquipmentType,
        #[arg(long, default_value = "0")]
        weight: Decimal,
        #[arg(long)]
        hazmat: bool,
        #[arg(long)]
        team_driver: bool,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long, default_value = "")]
        commodity: String,
    },
    #[command(about = "Specialized handling with declared-value insurance")]
    Specialized {
        #[arg(long, value_parser = parse_specialized_service, default_value = "white-glove")]
        service: SpecializedService,
        #[arg(long)]
        weight: Decimal,
        #[arg(long, default_value = "")]
        dimensions: String,
        #[arg(long, default_value = "0")]
        declared_value: Decimal,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long = "requirement")]
        requirements: Vec<String>,
    },
    #[command(about = "Warehousing: priced per pallet-month")]
    Warehousing {
        #[arg(long, value_parser = parse_warehousing_service, default_value = "storage")]
        service: WarehousingService,
        #[arg(long)]
        pallets: u32,
        #[arg(long, default_value_t = 1)]
        months: u32,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, value_parser = parse_temperature, default_value = "ambient")]
        temperature: Temperature,
    },
    #[command(about = "Bundle several services into one discounted quote")]
    Multi {
        #[arg(long = "service", value_parser = parse_service_kind, help = "Repeatable service tag")]
        services: Vec<ServiceKind>,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        weight: Decimal,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

fn parse_equipment(value: &str) -> Result<EquipmentType, String> {
    match value {
        "van" => Ok(EquipmentType::Van),
        "reefer" => Ok(EquipmentType::Reefer),
        "flatbed" => Ok(EquipmentType::Flatbed),
        "step-deck" => Ok(EquipmentType::StepDeck),
        "lowboy" => Ok(EquipmentType::Lowboy),
        "power-only" => Ok(EquipmentType::PowerOnly),
        other => Err(format!("unknown equipment type `{other}`")),
    }
}

fn parse_specialized_service(value: &str) -> Result<SpecializedService, String> {
    match value {
        "white-glove" => Ok(SpecializedService::WhiteGlove),
        "inside-delivery" => Ok(SpecializedService::InsideDelivery),
        "liftgate" => Ok(SpecializedService::Liftgate),
        "standard" => Ok(SpecializedService::Standard),
        other => Err(format!("unknown specialized service `{other}`")),
    }
}

fn parse_warehousing_service(value: &str) -> Result<WarehousingService, String> {
    match value {
        "storage" => Ok(WarehousingService::Storage),
        "cross-dock" => Ok(WarehousingService::CrossDock),
        "pick-pack" => Ok(WarehousingService::PickPack),
        "kitting" => Ok(WarehousingService::Kitting),
        "distribution" => Ok(WarehousingService::Distribution),
        other => Err(format!("unknown warehousing service `{other}`")),
    }
}

fn parse_temperature(value: &str) -> Result<Temperature, String> {
    match value {
        "ambient" => Ok(Temperature::Ambient),
        "climate-controlled" => Ok(Temperature::ClimateControlled),
        "refrigerated" => Ok(Temperature::Refrigerated),
        "frozen" => Ok(Temperature::Frozen),
        other => Err(format!("unknown temperature class `{other}`")),
    }
}

fn parse_service_kind(value: &str) -> Result<ServiceKind, String> {
    match value {
        "ltl" => Ok(ServiceKind::Ltl),
        "ftl" => Ok(ServiceKind::Ftl),
        "specialized" => Ok(ServiceKind::Specialized),
        "warehousing" => Ok(ServiceKind::Warehousing),
        other => Err(format!("unknown service tag `{other}`")),
    }
}

pub(crate) fn build_request(service: &RateService) -> QuoteRequest {
    match service {
        RateService::Ltl {
            weight,
            pallets,
            freight_class,
            liftgate,
            residential,
            origin,
            destination,
            commodity,
        } => QuoteRequest::Ltl(LtlRequest {
            weight_lb: *weight,
            pallets: *pallets,
            freight_class: *freight_class,
            liftgate: *liftgate,
            residential: *residential,
            origin: origin.clone(),
            destination: destination.clone(),
            commodity: commodity.clone(),
        }),
        RateService::Ftl {
            miles,
            equipment,
            weight,
            hazmat,
            team_driver,
            origin,
            destination,
            commodity,
        } => QuoteRequest::Ftl(FtlRequest {
            miles: *miles,
            equipment: *equipment,
            weight_lb: *weight,
            hazmat: *hazmat,
            team_driver: *team_driver,
            origin: origin.clone(),
            destination: destination.clone(),
            commodity: commodity.clone(),
        }),
        RateService::Specialized {
            service,
            weight,
            dimensions,
            declared_value,
            origin,
            destination,
            requirements,
        } => QuoteRequest::Specialized(SpecializedRequest {
            service: *service,
            weight_lb: *weight,
            dimensions: dimensions.clone(),
            declared_value: *declared_value,
            origin: origin.clone(),
            destination: destination.clone(),
            special_requirements: requirements.clone(),
        }),
        RateService::Warehousing { service, pallets, months, location, temperature } => {
            QuoteRequest::Warehousing(WarehousingRequest {
                service: *service,
                pallet_count: *pallets,
                duration_months: *months,
                location: location.clone(),
                temperature: *temperature,
            })
        }
        RateService::Multi { services, origin, destination, weight, notes } => {
            QuoteRequest::MultiService(MultiServiceRequest {
                selected_services: services.clone(),
                common_origin: origin.clone(),
                common_destination: destination.clone(),
                total_weight_lb: *weight,
                notes: notes.clone(),
            })
        }
    }
}

pub fn run(service: &RateService) -> CommandResult {
    let request = build_request(service);
    let engine = DeterministicRateEngine::default();

    match engine.rate(&request) {
        Ok(quote) => {
            info!(quote_number = %quote.quote_number, total = %quote.total, "quote rated");
            pretty_json("rate", &quote)
        }
        Err(error) => {
            warn!(error = %error, "rate request rejected");
            CommandResult::failure("rate", "validation", error.to_string(), 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_equipment, parse_service_kind, parse_temperature, run, RateService,
    };
    use freightdesk_core::domain::quote::{EquipmentType, FreightClass, ServiceKind, Temperature};
    use rust_decimal::Decimal;
    use serde_json::Value;

    #[test]
    fn ltl_rate_command_prints_the_published_example() {
        let result = run(&RateService::Ltl {
            weight: Decimal::from(1_000),
            pallets: 2,
            freight_class: FreightClass::C150,
            liftgate: true,
            residential: false,
            origin: "Atlanta, GA".to_owned(),
            destination: "Dallas, TX".to_owned(),
            commodity: "Auto parts".to_owned(),
        });

        assert_eq!(result.exit_code, 0);
        let payload: Value = serde_json::from_str(&result.output).expect("json output");
        assert_eq!(payload["base_rate"], "1255");
        assert_eq!(payload["surcharge"], "188");
        assert_eq!(payload["total"], "1443");
    }

    #[test]
    fn multi_rate_command_rejects_empty_service_selection() {
        let result = run(&RateService::Multi {
            services: vec![],
            origin: "Columbus, OH".to_owned(),
            destination: "Nashville, TN".to_owned(),
            weight: Decimal::from(1_000),
            notes: String::new(),
        });

        assert_eq!(result.exit_code, 2);
        let payload: Value = serde_json::from_str(&result.output).expect("json output");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "validation");
    }

    #[test]
    fn flag_values_map_to_domain_enums() {
        assert_eq!(parse_equipment("power-only"), Ok(EquipmentType::PowerOnly));
        assert_eq!(parse_temperature("frozen"), Ok(Temperature::Frozen));
        assert_eq!(parse_service_kind("warehousing"), Ok(ServiceKind::Warehousing));
        assert!(parse_service_kind("multi").is_err());
    }
}
