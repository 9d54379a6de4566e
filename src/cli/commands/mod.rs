//! CLI command implementations.

mod config;
mod doctor;
mod fetch;
mod serve;
mod suggest;

pub use config::run_config;
pub use doctor::run_doctor;
pub use fetch::run_fetch;
pub use serve::{router, run_serve};
pub use suggest::run_suggest;
