//! Bridge adapter orchestration.
//!
//! - `status`: live adapter registration and destination configuration
//! - `admin`: write operations submitted through a [`TransactionExecutor`](crate::services::blockchain::TransactionExecutor)
//! - `context`: chain and contract resolution shared by both

mod admin;
mod context;
mod error;
mod status;

pub use admin::{AdminOpsService, TxStepOutcome};
pub use context::{require_contract, require_evm_rpc, resolve_route, ResolvedContract, RouteContext};
pub use error::BridgeError;
pub use status::BridgeStatusResolver;
pub(crate) use status::{bridge_arg, dest_arg, eid_arg};
