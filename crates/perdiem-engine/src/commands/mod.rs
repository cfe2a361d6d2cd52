pub mod compute;
pub mod eval;
pub mod tariff;

mod common;
