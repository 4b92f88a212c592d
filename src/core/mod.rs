pub mod client;
pub mod runner;
pub mod steps;

pub use crate::domain::model::{SmokeReport, StepOutcome, StepReport};
pub use crate::domain::ports::{ConfigProvider, SmokeContext, SmokeStep};
pub use crate::utils::error::Result;
