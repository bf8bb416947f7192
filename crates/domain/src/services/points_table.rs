//! Material points table and weight reconciliation.
//!
//! Points are computed from the per-material kilograms actually collected.
//! When the measured total differs from the declared total, the declared
//! per-material composition is assumed proportionally accurate and every
//! entry is scaled by the measured/declared ratio before pricing.

use std::collections::HashMap;

use crate::models::{MaterialEntry, MaterialKind, MaterialPoints};

/// Points-per-kilogram rates by material kind.
///
/// Rates are configuration, not law; the defaults follow the production
/// table (plastic 2, glass 1, paper 1, metal 5).
#[derive(Debug, Clone)]
pub struct MaterialPointsTable {
    rates: HashMap<MaterialKind, f64>,
}

impl MaterialPointsTable {
    pub fn new(rates: HashMap<MaterialKind, f64>) -> Self {
        Self { rates }
    }

    /// Rate for a material kind; unlisted kinds earn nothing.
    pub fn points_per_kg(&self, kind: MaterialKind) -> f64 {
        self.rates.get(&kind).copied().unwrap_or(0.0)
    }

    /// Total points for a material list.
    pub fn points_for(&self, materials: &[MaterialEntry]) -> f64 {
        materials
            .iter()
            .map(|m| m.kilograms * self.points_per_kg(m.kind))
            .sum()
    }

    /// Per-material breakdown, as recorded on accrual transactions.
    pub fn breakdown(&self, materials: &[MaterialEntry]) -> Vec<MaterialPoints> {
        materials
            .iter()
            .map(|m| MaterialPoints {
                kind: m.kind,
                kilograms: m.kilograms,
                points: m.kilograms * self.points_per_kg(m.kind),
            })
            .collect()
    }
}

impl Default for MaterialPointsTable {
    fn default() -> Self {
        Self::new(HashMap::from([
            (MaterialKind::Plastic, 2.0),
            (MaterialKind::Glass, 1.0),
            (MaterialKind::Paper, 1.0),
            (MaterialKind::Metal, 5.0),
        ]))
    }
}

/// Scales declared materials to the actually measured total weight.
///
/// Each entry is multiplied by `actual_kg / declared_kg` so the declared
/// material mix is preserved while the sum equals the measured weight.
pub fn scale_to_actual_weight(
    materials: &[MaterialEntry],
    actual_kg: f64,
    declared_kg: f64,
) -> Vec<MaterialEntry> {
    let ratio = actual_kg / declared_kg;
    materials
        .iter()
        .map(|m| MaterialEntry {
            kind: m.kind,
            kilograms: m.kilograms * ratio,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: MaterialKind, kilograms: f64) -> MaterialEntry {
        MaterialEntry { kind, kilograms }
    }

    #[test]
    fn test_default_rates() {
        let table = MaterialPointsTable::default();
        assert_eq!(table.points_per_kg(MaterialKind::Plastic), 2.0);
        assert_eq!(table.points_per_kg(MaterialKind::Glass), 1.0);
        assert_eq!(table.points_per_kg(MaterialKind::Paper), 1.0);
        assert_eq!(table.points_per_kg(MaterialKind::Metal), 5.0);
    }

    #[test]
    fn test_unlisted_kind_earns_nothing() {
        let table = MaterialPointsTable::new(HashMap::from([(MaterialKind::Metal, 5.0)]));
        assert_eq!(table.points_per_kg(MaterialKind::Paper), 0.0);
        assert_eq!(table.points_for(&[entry(MaterialKind::Paper, 4.0)]), 0.0);
    }

    #[test]
    fn test_points_for() {
        let table = MaterialPointsTable::default();
        let materials = vec![
            entry(MaterialKind::Plastic, 2.0),
            entry(MaterialKind::Glass, 3.0),
        ];
        assert_eq!(table.points_for(&materials), 7.0);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let table = MaterialPointsTable::default();
        let materials = vec![
            entry(MaterialKind::Plastic, 1.5),
            entry(MaterialKind::Metal, 2.0),
            entry(MaterialKind::Paper, 0.5),
        ];
        let breakdown = table.breakdown(&materials);
        assert_eq!(breakdown.len(), 3);
        let total: f64 = breakdown.iter().map(|b| b.points).sum();
        assert_eq!(total, table.points_for(&materials));
        assert_eq!(breakdown[1].points, 10.0);
    }

    #[test]
    fn test_scale_preserves_mix() {
        // Declared 4 + 6 = 10 kg, measured 5 kg -> 2 + 3 kg
        let declared = vec![
            entry(MaterialKind::Plastic, 4.0),
            entry(MaterialKind::Glass, 6.0),
        ];
        let scaled = scale_to_actual_weight(&declared, 5.0, 10.0);
        assert_eq!(scaled[0].kilograms, 2.0);
        assert_eq!(scaled[1].kilograms, 3.0);

        let table = MaterialPointsTable::default();
        assert_eq!(table.points_for(&scaled), 7.0);
    }

    #[test]
    fn test_scale_up_when_measured_exceeds_declared() {
        let declared = vec![entry(MaterialKind::Metal, 2.0)];
        let scaled = scale_to_actual_weight(&declared, 3.0, 2.0);
        assert_eq!(scaled[0].kilograms, 3.0);
    }
}
