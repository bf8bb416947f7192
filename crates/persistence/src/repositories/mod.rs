//! Repository implementations.

pub mod collection;
pub mod ledger;

pub use collection::{CollectionRepository, COLLECTIONS_KEY};
pub use ledger::{ledger_key, LedgerRepository};
