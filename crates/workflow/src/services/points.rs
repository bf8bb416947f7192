//! Points accrual and redemption over per-user ledgers.

use std::sync::Arc;

use chrono::Utc;
use domain::errors::DomainError;
use domain::models::{MaterialEntry, PointTransaction, RewardDetail, TransactionKind};
use domain::services::MaterialPointsTable;
use persistence::repositories::LedgerRepository;
use uuid::Uuid;

use crate::config::RewardTier;
use crate::notify::{ChangeEvent, ChangeNotifier};

/// Result of a successful accrual.
#[derive(Debug, Clone, Copy)]
pub struct Accrued {
    pub points: f64,
    pub new_balance: f64,
}

/// Accrual and redemption are the only balance mutators in the system.
pub struct PointsService {
    ledgers: LedgerRepository,
    table: MaterialPointsTable,
    tiers: Vec<RewardTier>,
    notifier: Arc<ChangeNotifier>,
}

impl PointsService {
    pub fn new(
        ledgers: LedgerRepository,
        table: MaterialPointsTable,
        tiers: Vec<RewardTier>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            ledgers,
            table,
            tiers,
            notifier,
        }
    }

    /// Prices the given materials, appends an accrual transaction carrying
    /// the per-material breakdown, and raises the balance.
    ///
    /// Balance and history are persisted together before this returns.
    pub fn accrue(&self, user_id: Uuid, materials: &[MaterialEntry]) -> Result<Accrued, DomainError> {
        let breakdown = self.table.breakdown(materials);
        let points: f64 = breakdown.iter().map(|b| b.points).sum();
        let transaction = PointTransaction {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: TransactionKind::Accrual,
            points,
            description: "Points earned for a collection".to_string(),
            materials: Some(breakdown),
            reward: None,
        };

        let new_balance = self.ledgers.mutate(user_id, |ledger| {
            ledger.record(transaction);
            Ok(ledger.balance)
        })?;

        tracing::info!(user_id = %user_id, points, new_balance, "points accrued");
        self.notifier.emit(&ChangeEvent::PointsChanged { user_id });
        Ok(Accrued { points, new_balance })
    }

    /// Exchanges `point_cost` points for the reward tier matching it exactly.
    ///
    /// The tier table is configuration; arbitrary amounts are not redeemable.
    pub fn redeem(&self, user_id: Uuid, point_cost: f64) -> Result<RewardDetail, DomainError> {
        let tier = self
            .tiers
            .iter()
            .copied()
            .find(|t| t.points == point_cost)
            .ok_or(DomainError::InvalidRewardTier(point_cost))?;
        let reward = RewardDetail {
            value: tier.value,
            points: point_cost,
        };

        self.ledgers.mutate(user_id, |ledger| {
            if ledger.balance < point_cost {
                return Err(DomainError::InsufficientPoints {
                    balance: ledger.balance,
                    required: point_cost,
                });
            }
            ledger.record(PointTransaction {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                kind: TransactionKind::Redemption,
                points: -point_cost,
                description: "Points exchanged for a voucher".to_string(),
                materials: None,
                reward: Some(reward),
            });
            Ok(())
        })?;

        tracing::info!(user_id = %user_id, points = point_cost, value = tier.value, "points redeemed");
        self.notifier.emit(&ChangeEvent::PointsChanged { user_id });
        Ok(reward)
    }

    /// Current balance; users without a ledger have 0.
    pub fn balance(&self, user_id: Uuid) -> Result<f64, DomainError> {
        Ok(self.ledgers.load(user_id)?.balance)
    }

    /// Transaction history, most recent first.
    pub fn history(&self, user_id: Uuid) -> Result<Vec<PointTransaction>, DomainError> {
        Ok(self.ledgers.load(user_id)?.transactions)
    }
}
