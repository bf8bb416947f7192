//! Points ledger domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::MaterialKind;

/// Kind of a point transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Accrual,
    Redemption,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Accrual => write!(f, "accrual"),
            TransactionKind::Redemption => write!(f, "redemption"),
        }
    }
}

/// Per-material share of an accrual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaterialPoints {
    pub kind: MaterialKind,
    pub kilograms: f64,
    pub points: f64,
}

/// Reward detail of a redemption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RewardDetail {
    /// Monetary value of the voucher obtained.
    pub value: f64,
    /// Points spent on it.
    pub points: f64,
}

/// One entry in a user's point history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PointTransaction {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    /// Signed delta: positive for accruals, negative for redemptions.
    pub points: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<MaterialPoints>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardDetail>,
}

/// A user's point balance with its append-only history, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PointsLedger {
    pub user_id: Uuid,
    pub balance: f64,
    pub transactions: Vec<PointTransaction>,
}

impl PointsLedger {
    /// An empty ledger with a zero balance.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            balance: 0.0,
            transactions: Vec::new(),
        }
    }

    /// Applies a transaction: adjusts the balance by its delta and prepends
    /// it to the history.
    pub fn record(&mut self, transaction: PointTransaction) {
        self.balance += transaction.points;
        self.transactions.insert(0, transaction);
    }

    /// Recomputes the balance by summing all transaction deltas.
    ///
    /// Always equals `balance` for a consistent ledger; used by tests and
    /// consistency checks.
    pub fn replayed_balance(&self) -> f64 {
        self.transactions.iter().map(|t| t.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accrual(points: f64) -> PointTransaction {
        PointTransaction {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: TransactionKind::Accrual,
            points,
            description: "Points earned for a collection".to_string(),
            materials: Some(vec![MaterialPoints {
                kind: MaterialKind::Plastic,
                kilograms: points / 2.0,
                points,
            }]),
            reward: None,
        }
    }

    fn redemption(points: f64) -> PointTransaction {
        PointTransaction {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: TransactionKind::Redemption,
            points: -points,
            description: "Points exchanged for a voucher".to_string(),
            materials: None,
            reward: Some(RewardDetail {
                value: 50.0,
                points,
            }),
        }
    }

    #[test]
    fn test_transaction_kind_display() {
        assert_eq!(TransactionKind::Accrual.to_string(), "accrual");
        assert_eq!(TransactionKind::Redemption.to_string(), "redemption");
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = PointsLedger::new(Uuid::new_v4());
        assert_eq!(ledger.balance, 0.0);
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn test_record_updates_balance_and_prepends() {
        let mut ledger = PointsLedger::new(Uuid::new_v4());
        ledger.record(accrual(100.0));
        ledger.record(accrual(20.0));
        ledger.record(redemption(100.0));

        assert_eq!(ledger.balance, 20.0);
        assert_eq!(ledger.transactions.len(), 3);
        // Most recent first
        assert_eq!(ledger.transactions[0].kind, TransactionKind::Redemption);
        assert_eq!(ledger.transactions[2].points, 100.0);
    }

    #[test]
    fn test_replayed_balance_matches_live_balance() {
        let mut ledger = PointsLedger::new(Uuid::new_v4());
        for _ in 0..5 {
            ledger.record(accrual(14.0));
        }
        ledger.record(redemption(50.0));

        assert_eq!(ledger.replayed_balance(), ledger.balance);
        assert_eq!(ledger.balance, 20.0);
    }

    #[test]
    fn test_transaction_serde_round_trip() {
        let tx = redemption(100.0);
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains(r#""kind":"redemption""#));
        // Accrual-only detail is absent on redemptions
        assert!(!json.contains("materials"));

        let back: PointTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.points, -100.0);
        assert_eq!(back.reward.unwrap().value, 50.0);
    }
}
