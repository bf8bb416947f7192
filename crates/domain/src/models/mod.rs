//! Domain models.

pub mod collection;
pub mod points;
pub mod user;
pub mod voucher;

pub use collection::{
    declared_total, validate_materials, CollectionRequest, CollectionStatus,
    CreateCollectionRequest, MaterialEntry, MaterialKind, UpdateCollectionRequest,
};
pub use points::{MaterialPoints, PointTransaction, PointsLedger, RewardDetail, TransactionKind};
pub use user::{Actor, Role};
pub use voucher::Voucher;
