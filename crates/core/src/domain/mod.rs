pub mod contract;
pub mod quote;
pub mod shipper;
