//! Route health: recheck, overview, preflight and auto-fix.

mod autofix;
mod health;
mod orchestrator;

pub use health::{FeeQuoteHealth, FeeQuoteHealthProbe, RouterFeeQuoteProbe};
pub use orchestrator::RouteHealthOrchestrator;
