pub mod cost;
pub mod engine;
pub mod offer;
pub mod pipeline;
pub mod scheduler;

pub use crate::domain::model::{DeliveryBatch, DeliveryReport, PackageEstimate};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
