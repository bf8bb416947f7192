//! Application services.

pub mod collections;
pub mod points;
pub mod vouchers;

pub use collections::{CollectionService, MAX_OPEN_REQUESTS};
pub use points::{Accrued, PointsService};
pub use vouchers::VoucherIssuer;
