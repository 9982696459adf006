pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GeminiGenerator, LocalStorage};
pub use config::{AppConfig, CliConfig};
pub use core::client::{ApiCredential, EstimationClient};
pub use core::engine::EstimateEngine;
pub use domain::model::{
    BuildingType, Location, MaterialQuality, NormalizedEstimate, ProjectDetails, RabCategory,
    RabItem, RabResult,
};
pub use utils::error::{EstimateError, Result};
