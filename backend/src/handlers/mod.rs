//! HTTP request handlers

pub mod health;
pub mod model;
pub mod prediction;
pub mod reporting;
pub mod weather;

pub use health::*;
pub use model::*;
pub use prediction::*;
pub use reporting::*;
pub use weather::*;
