//! Voucher domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A redeemable reward produced by a successful point redemption.
///
/// Immutable once created; rendering and export are external concerns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Voucher {
    /// Human-facing reference, e.g. `RH-17234567-0042`.
    pub number: String,
    /// Monetary value granted by the matched reward tier.
    pub value: f64,
    /// Points deducted from the ledger for this voucher.
    pub points_spent: f64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub beneficiary: String,
}

impl Voucher {
    /// Whether the voucher has expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
