//! Collection request domain models and lifecycle rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A recyclable material kind accepted for pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Plastic,
    Glass,
    Paper,
    Metal,
}

impl std::fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialKind::Plastic => write!(f, "plastic"),
            MaterialKind::Glass => write!(f, "glass"),
            MaterialKind::Paper => write!(f, "paper"),
            MaterialKind::Metal => write!(f, "metal"),
        }
    }
}

/// One (material kind, declared kilograms) pair on a collection request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaterialEntry {
    pub kind: MaterialKind,
    pub kilograms: f64,
}

/// Lifecycle state of a collection request.
///
/// Transitions are one-directional: Requested -> Assigned -> InProgress ->
/// Validated or Rejected. Validated and Rejected are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Requested,
    Assigned,
    InProgress,
    Validated,
    Rejected,
}

impl CollectionStatus {
    /// True for states that count against the requester's open-request limit.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            CollectionStatus::Requested | CollectionStatus::Assigned | CollectionStatus::InProgress
        )
    }

    /// True for the absorbing states.
    pub fn is_terminal(self) -> bool {
        matches!(self, CollectionStatus::Validated | CollectionStatus::Rejected)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: CollectionStatus) -> bool {
        use CollectionStatus::*;
        matches!(
            (self, next),
            (Requested, Assigned)
                | (Assigned, InProgress)
                | (Assigned, Validated)
                | (Assigned, Rejected)
                | (InProgress, Validated)
                | (InProgress, Rejected)
        )
    }
}

impl std::fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionStatus::Requested => write!(f, "requested"),
            CollectionStatus::Assigned => write!(f, "assigned"),
            CollectionStatus::InProgress => write!(f, "in_progress"),
            CollectionStatus::Validated => write!(f, "validated"),
            CollectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A waste pickup request as stored in the collections document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CollectionRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub materials: Vec<MaterialEntry>,
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub status: CollectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_awarded: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionRequest {
    /// Total declared weight, the sum over all material entries.
    pub fn declared_weight(&self) -> f64 {
        declared_total(&self.materials)
    }
}

/// Sum of the declared kilograms of a material list.
pub fn declared_total(materials: &[MaterialEntry]) -> f64 {
    materials.iter().map(|m| m.kilograms).sum()
}

/// Payload for creating a collection request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCollectionRequest {
    #[validate(custom(function = "validate_materials"))]
    pub materials: Vec<MaterialEntry>,

    #[validate(length(min = 1, message = "An address is required"))]
    pub address: String,

    pub scheduled_date: NaiveDate,

    #[validate(custom(function = "validate_slot"))]
    pub time_slot: String,

    pub notes: Option<String>,

    #[serde(default)]
    pub photos: Vec<String>,
}

/// Partial update of a request's declared fields.
///
/// `None` leaves a field unchanged. State transitions go through the
/// dedicated assign/start/validate/reject operations, never through here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCollectionRequest {
    pub materials: Option<Vec<MaterialEntry>>,
    pub address: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub notes: Option<String>,
    pub photos: Option<Vec<String>>,
}

impl UpdateCollectionRequest {
    /// True when no declared field is touched.
    pub fn is_empty(&self) -> bool {
        self.materials.is_none()
            && self.address.is_none()
            && self.scheduled_date.is_none()
            && self.time_slot.is_none()
            && self.notes.is_none()
            && self.photos.is_none()
    }
}

/// Validates a declared material list: non-empty, positive entries, total
/// within the accepted range.
pub fn validate_materials(materials: &[MaterialEntry]) -> Result<(), validator::ValidationError> {
    if materials.is_empty() {
        let mut err = validator::ValidationError::new("materials_empty");
        err.message = Some("At least one material is required".into());
        return Err(err);
    }
    if materials.iter().any(|m| m.kilograms <= 0.0) {
        let mut err = validator::ValidationError::new("material_weight");
        err.message = Some("Each material weight must be positive".into());
        return Err(err);
    }
    shared::validation::validate_declared_weight(declared_total(materials))
}

fn validate_slot(time_slot: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_time_slot(time_slot)
}
