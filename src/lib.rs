//! Cross-chain bridge adapter orchestration and on-chain configuration audit.
//!
//! Talks to Gateway, Router, Vault and bridge adapter contracts over JSON-RPC to
//! report per-route adapter state, audit deployed configuration, remediate
//! misconfigured routes, decode reverts and build payment payloads.
//!
//! # Layout
//! - `models`: registry entities, configuration and derived reports
//! - `repositories`: in-memory chain, contract and token registries
//! - `services`: RPC clients and the orchestration services
//! - `bootstrap`: wiring of the services from [`models::AppConfig`]
//! - `utils`: codecs and logging

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
