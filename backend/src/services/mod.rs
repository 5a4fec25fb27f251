//! Business logic services for the Rainfall Predictor

pub mod history;
pub mod model;
pub mod prediction;
pub mod reporting;

pub use history::{HistoryStore, PredictionRecord};
pub use model::{ModelMetrics, ModelService};
pub use prediction::PredictionService;
pub use reporting::ReportingService;
