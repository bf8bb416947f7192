//! Pure business services.

pub mod points_table;

pub use points_table::{scale_to_actual_weight, MaterialPointsTable};
