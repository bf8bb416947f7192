//! Domain layer for the RecycleHub core.
//!
//! This crate contains:
//! - Domain models (CollectionRequest, PointsLedger, Voucher, Actor)
//! - Pure business services (material points table, weight scaling)
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;
