//! Revert and error decoding.
//!
//! Turns raw revert bytes returned by Router, Gateway or adapter calls into a
//! [`RouteErrorDecoded`](crate::models::RouteErrorDecoded) report.

mod decoder;

pub use decoder::{panic_reason, RevertDecoder};
