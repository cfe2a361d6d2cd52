pub mod commands;
pub mod contracts;
mod corpus;
pub mod engine;
pub mod error;
pub mod money;
pub mod tariff;
pub mod trip;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use engine::{Breakdown, Evaluation, compute, compute_amount};
pub use error::{EngineError, EngineResult};
pub use money::Cents;
pub use tariff::{TARIFF_V1, TARIFF_VERSION, Tariff};
pub use trip::Trip;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
