//! Configuration audit of registry contracts and their on-chain routes.

mod engine;
mod manifest;

pub use engine::{static_checks, ConfigAuditEngine};
pub use manifest::{missing_functions, required_functions};
