//! Voucher issuance.

use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::errors::DomainError;
use domain::models::Voucher;
use uuid::Uuid;

use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::services::points::PointsService;

/// Converts a point balance into an immutable voucher record.
///
/// The deduction itself is delegated to [`PointsService::redeem`] and its
/// failures propagate unchanged. Rendering the voucher into a document is
/// an external concern.
pub struct VoucherIssuer {
    points: Arc<PointsService>,
    validity_days: i64,
    notifier: Arc<ChangeNotifier>,
}

impl VoucherIssuer {
    pub fn new(points: Arc<PointsService>, validity_days: i64, notifier: Arc<ChangeNotifier>) -> Self {
        Self {
            points,
            validity_days,
            notifier,
        }
    }

    /// Redeems `point_cost` points for the named beneficiary.
    pub fn issue(
        &self,
        user_id: Uuid,
        point_cost: f64,
        beneficiary: &str,
    ) -> Result<Voucher, DomainError> {
        if beneficiary.trim().is_empty() {
            return Err(DomainError::Validation(
                "A beneficiary name is required".to_string(),
            ));
        }

        let reward = self.points.redeem(user_id, point_cost)?;

        let issued_at = Utc::now();
        let voucher = Voucher {
            number: shared::reference::voucher_number(),
            value: reward.value,
            points_spent: reward.points,
            issued_at,
            expires_at: issued_at + Duration::days(self.validity_days),
            beneficiary: beneficiary.trim().to_string(),
        };

        tracing::info!(
            user_id = %user_id,
            number = %voucher.number,
            value = voucher.value,
            "voucher issued"
        );
        self.notifier.emit(&ChangeEvent::VoucherIssued {
            number: voucher.number.clone(),
        });
        Ok(voucher)
    }
}
