//! Voucher reference number generation.

use chrono::Utc;
use rand::Rng;

/// Generates a voucher reference of the form `RH-<timestamp>-<random>`.
///
/// The timestamp component is the last eight digits of the current Unix
/// timestamp in milliseconds, the random component a zero-padded four digit
/// number. References are unique enough for a single local store; they are
/// not cryptographic tokens.
pub fn voucher_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    let random: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("RH-{tail}-{random:04}")
}
