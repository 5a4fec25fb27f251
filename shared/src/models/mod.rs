//! Domain models for the Rainfall Predictor

mod observation;
mod prediction;
mod regression;

pub use observation::*;
pub use prediction::*;
pub use regression::*;
