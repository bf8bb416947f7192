//! Application layer for the RecycleHub core.
//!
//! This crate contains:
//! - Configuration loading and logging initialization
//! - The domain services (collections, points, vouchers)
//! - Collaborator traits (identity, photo ingestion, voucher rendering)
//! - The role-gated workflow facade consumed by the excluded UI layer

pub mod config;
pub mod identity;
pub mod logging;
pub mod notify;
pub mod photos;
pub mod render;
pub mod services;
pub mod workflow;

pub use workflow::RecycleHub;
