//! Shared utilities and common types for the RecycleHub core.
//!
//! This crate provides common functionality used across all other crates:
//! - Business-rule validation logic (weights, time slots)
//! - Voucher reference number generation

pub mod reference;
pub mod validation;
