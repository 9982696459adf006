pub mod client;
pub mod engine;
pub mod normalize;
pub mod prompt;
pub mod render;

pub use crate::domain::model::{NormalizedEstimate, ProjectDetails, RabCategory, RabItem, RabResult};
pub use crate::domain::ports::{ServiceConfig, Storage, TextGenerator};
pub use crate::utils::error::Result;
