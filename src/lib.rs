pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::config::toml_config::TariffConfig;
pub use crate::core::{
    cost::CostCalculator,
    engine::EstimationEngine,
    offer::{OfferOutcome, OfferResolver, OfferTable},
    pipeline::CourierPipeline,
    scheduler::{DeliveryScheduler, Schedule},
};
pub use crate::domain::model::{BatchSummary, FleetSpec, Offer, OutputFormat, Package};
pub use crate::utils::error::{CourierError, Result};
