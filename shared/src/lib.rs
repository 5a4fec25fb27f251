//! Shared types and prediction logic for the Rainfall Predictor
//!
//! This crate holds everything that is pure computation: the data model, the
//! rule-based predictor, the geographic adjuster, the feature preprocessor and
//! the model artifact types. It is used by the backend server and, through
//! WASM, by the browser form.

pub mod climate;
pub mod features;
pub mod forecast;
pub mod models;
pub mod rules;
pub mod types;
pub mod validation;

pub use climate::*;
pub use features::*;
pub use forecast::*;
pub use models::*;
pub use rules::*;
pub use types::*;
pub use validation::*;
