use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

/// Service families the brokerage quotes. `MultiService` bundles several of
/// the single-service tags into one combined quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Ltl,
    Ftl,
    Specialized,
    Warehousing,
    MultiService,
}

impl ServiceKind {
    /// Quote-number prefix, e.g. `LTL-1730000000000`.
    pub fn quote_prefix(&self) -> &'static str {
        match self {
            Self::Ltl => "LTL",
            Self::Ftl => "FTL",
            Self::Specialized => "SPC",
            Self::Warehousing => "WH",
            Self::MultiService => "MS",
        }
    }
}

/// NMFC freight classes used for LTL pricing. Values span 50 through 500.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreightClass {
    C50,
    C55,
    C60,
    C65,
    C70,
    C77_5,
    C85,
    C92_5,
    C100,
    C110,
    C125,
    C150,
    C175,
    C200,
    C250,
    C300,
    C400,
    C500,
}

impl FreightClass {
    /// Class value scaled by ten so the fractional classes (77.5, 92.5) stay
    /// integral. Threshold checks in the rating engine compare against this.
    pub fn tenths(&self) -> u16 {
        match self {
            Self::C50 => 500,
            Self::C55 => 550,
            Self::C60 => 600,
            Self::C65 => 650,
            Self::C70 => 700,
            Self::C77_5 => 775,
            Self::C85 => 850,
            Self::C92_5 => 925,
            Self::C100 => 1000,
            Self::C110 => 1100,
            Self::C125 => 1250,
            Self::C150 => 1500,
            Self::C175 => 1750,
            Self::C200 => 2000,
            Self::C250 => 2500,
            Self::C300 => 3000,
            Self::C400 => 4000,
            Self::C500 => 5000,
        }
    }
}

impl std::str::FromStr for FreightClass {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "50" => Ok(Self::C50),
            "55" => Ok(Self::C55),
            "60" => Ok(Self::C60),
            "65" => Ok(Self::C65),
            "70" => Ok(Self::C70),
            "77.5" => Ok(Self::C77_5),
            "85" => Ok(Self::C85),
            "92.5" => Ok(Self::C92_5),
            "100" => Ok(Self::C100),
            "110" => Ok(Self::C110),
            "125" => Ok(Self::C125),
            "150" => Ok(Self::C150),
            "175" => Ok(Self::C175),
            "200" => Ok(Self::C200),
            "250" => Ok(Self::C250),
            "300" => Ok(Self::C300),
            "400" => Ok(Self::C400),
            "500" => Ok(Self::C500),
            other => Err(format!("unknown freight class `{other}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Van,
    Reefer,
    Flatbed,
    StepDeck,
    Lowboy,
    PowerOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecializedService {
    WhiteGlove,
    InsideDelivery,
    Liftgate,
    Standard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehousingService {
    Storage,
    CrossDock,
    PickPack,
    Kitting,
    Distribution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Ambient,
    ClimateControlled,
    Refrigerated,
    Frozen,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LtlRequest {
    pub weight_lb: Decimal,
    pub pallets: u32,
    pub freight_class: FreightClass,
    pub liftgate: bool,
    pub residential: bool,
    pub origin: String,
    pub destination: String,
    pub commodity: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FtlRequest {
    pub miles: Decimal,
    pub equipment: EquipmentType,
    pub weight_lb: Decimal,
    pub hazmat: bool,
    pub team_driver: bool,
    pub origin: String,
    pub destination: String,
    pub commodity: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecializedRequest {
    pub service: SpecializedService,
    pub weight_lb: Decimal,
    pub dimensions: String,
    pub declared_value: Decimal,
    pub origin: String,
    pub destination: String,
    pub special_requirements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarehousingRequest {
    pub service: WarehousingService,
    pub pallet_count: u32,
    pub duration_months: u32,
    pub location: String,
    pub temperature: Temperature,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiServiceRequest {
    pub selected_services: Vec<ServiceKind>,
    pub common_origin: String,
    pub common_destination: String,
    pub total_weight_lb: Decimal,
    pub notes: String,
}

/// Rating input, tagged by service family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteRequest {
    Ltl(LtlRequest),
    Ftl(FtlRequest),
    Specialized(SpecializedRequest),
    Warehousing(WarehousingRequest),
    MultiService(MultiServiceRequest),
}

impl QuoteRequest {
    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Ltl(_) => ServiceKind::Ltl,
            Self::Ftl(_) => ServiceKind::Ftl,
            Self::Specialized(_) => ServiceKind::Specialized,
            Self::Warehousing(_) => ServiceKind::Warehousing,
            Self::MultiService(_) => ServiceKind::MultiService,
        }
    }
}

/// Whether the surcharge line on a quote is a fuel surcharge or a
/// warehousing handling fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    Fuel,
    Handling,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: ServiceKind,
    pub cost: Decimal,
}

/// Priced quote. Immutable once produced by the rating engine; every money
/// field is already rounded to whole currency units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub kind: ServiceKind,
    pub quote_number: String,
    pub generated_at: DateTime<Utc>,
    pub base_rate: Decimal,
    pub surcharge: Decimal,
    pub surcharge_kind: SurchargeKind,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_breakdown: Option<Vec<ServiceCost>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    pub detail: QuoteRequest,
}
