//! Collection request lifecycle service.
//!
//! Owns every rule of the request lifecycle: creation limits, edit and
//! delete guards, the assign/start/validate/reject transitions, and the
//! weight reconciliation that feeds points accrual on validation.

use std::sync::Arc;

use chrono::Utc;
use domain::errors::DomainError;
use domain::models::{
    declared_total, validate_materials, CollectionRequest, CollectionStatus,
    CreateCollectionRequest, MaterialEntry, UpdateCollectionRequest,
};
use domain::services::{scale_to_actual_weight, MaterialPointsTable};
use persistence::repositories::CollectionRepository;
use shared::validation::{validate_rejection_reason, validate_time_slot, MAX_DECLARED_KG};
use uuid::Uuid;
use validator::Validate;

use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::services::points::PointsService;

/// Maximum number of simultaneously open requests per requester.
pub const MAX_OPEN_REQUESTS: usize = 3;

pub struct CollectionService {
    collections: CollectionRepository,
    table: MaterialPointsTable,
    points: Arc<PointsService>,
    notifier: Arc<ChangeNotifier>,
}

impl CollectionService {
    pub fn new(
        collections: CollectionRepository,
        table: MaterialPointsTable,
        points: Arc<PointsService>,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Self {
            collections,
            table,
            points,
            notifier,
        }
    }

    /// Creates a request in the Requested state.
    ///
    /// Fails when the declared weight or time slot is out of range, or when
    /// the requester already has the maximum number of open requests.
    pub fn create(
        &self,
        requester_id: Uuid,
        payload: CreateCollectionRequest,
    ) -> Result<CollectionRequest, DomainError> {
        payload.validate()?;

        let created = self.collections.mutate(|all| {
            let open = all
                .iter()
                .filter(|c| c.requester_id == requester_id && c.status.is_open())
                .count();
            if open >= MAX_OPEN_REQUESTS {
                return Err(DomainError::LimitExceeded(format!(
                    "You already have {MAX_OPEN_REQUESTS} open collection requests"
                )));
            }

            let now = Utc::now();
            let request = CollectionRequest {
                id: Uuid::new_v4(),
                requester_id,
                materials: payload.materials,
                address: payload.address,
                scheduled_date: payload.scheduled_date,
                time_slot: payload.time_slot,
                notes: payload.notes,
                photos: payload.photos,
                status: CollectionStatus::Requested,
                collector_id: None,
                actual_weight: None,
                points_awarded: None,
                rejection_reason: None,
                created_at: now,
                updated_at: now,
            };
            all.push(request.clone());
            Ok(request)
        })?;

        tracing::info!(
            request_id = %created.id,
            requester_id = %requester_id,
            declared_kg = created.declared_weight(),
            "collection request created"
        );
        self.notifier
            .emit(&ChangeEvent::CollectionChanged { id: created.id });
        Ok(created)
    }

    /// Fetch a single request.
    pub fn get(&self, id: Uuid) -> Result<CollectionRequest, DomainError> {
        self.collections
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("collection request {id}")))
    }

    /// Edits declared fields of a request still in the Requested state.
    ///
    /// When the materials change, the requester's summed open weight across
    /// all other open requests plus the new weight must stay within the
    /// ceiling.
    pub fn update(
        &self,
        requester_id: Uuid,
        id: Uuid,
        update: UpdateCollectionRequest,
    ) -> Result<CollectionRequest, DomainError> {
        if let Some(materials) = &update.materials {
            validate_materials(materials)?;
        }
        if let Some(slot) = &update.time_slot {
            validate_time_slot(slot)?;
        }
        if let Some(address) = &update.address {
            if address.trim().is_empty() {
                return Err(DomainError::Validation("An address is required".to_string()));
            }
        }

        let updated = self.collections.mutate(|all| {
            let index = all
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("collection request {id}")))?;
            if all[index].requester_id != requester_id {
                return Err(DomainError::Forbidden(
                    "only the requester who created a request may edit it".to_string(),
                ));
            }
            // An update that touches nothing is a no-op in any state.
            if update.is_empty() {
                return Ok(all[index].clone());
            }
            if all[index].status != CollectionStatus::Requested {
                return Err(DomainError::InvalidState(
                    "only requests still awaiting a collector can be edited".to_string(),
                ));
            }

            if let Some(materials) = &update.materials {
                let other_open: f64 = all
                    .iter()
                    .filter(|c| {
                        c.requester_id == requester_id && c.id != id && c.status.is_open()
                    })
                    .map(|c| c.declared_weight())
                    .sum();
                if other_open + declared_total(materials) > MAX_DECLARED_KG {
                    return Err(DomainError::LimitExceeded(format!(
                        "Your open requests may not exceed {MAX_DECLARED_KG} kg in total"
                    )));
                }
            }

            let request = &mut all[index];
            if let Some(materials) = update.materials {
                request.materials = materials;
            }
            if let Some(address) = update.address {
                request.address = address;
            }
            if let Some(scheduled_date) = update.scheduled_date {
                request.scheduled_date = scheduled_date;
            }
            if let Some(time_slot) = update.time_slot {
                request.time_slot = time_slot;
            }
            if let Some(notes) = update.notes {
                request.notes = Some(notes);
            }
            if let Some(photos) = update.photos {
                request.photos = photos;
            }
            request.updated_at = Utc::now();
            Ok(request.clone())
        })?;

        tracing::info!(request_id = %id, "collection request updated");
        self.notifier.emit(&ChangeEvent::CollectionChanged { id });
        Ok(updated)
    }

    /// Deletes a request still in the Requested state.
    pub fn delete(&self, requester_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.collections.mutate(|all| {
            let index = all
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("collection request {id}")))?;
            if all[index].requester_id != requester_id {
                return Err(DomainError::Forbidden(
                    "only the requester who created a request may delete it".to_string(),
                ));
            }
            if all[index].status != CollectionStatus::Requested {
                return Err(DomainError::InvalidState(
                    "only requests still awaiting a collector can be deleted".to_string(),
                ));
            }
            all.remove(index);
            Ok(())
        })?;

        tracing::info!(request_id = %id, "collection request deleted");
        self.notifier.emit(&ChangeEvent::CollectionChanged { id });
        Ok(())
    }

    /// Requested -> Assigned, recording the claiming collector.
    pub fn assign(&self, id: Uuid, collector_id: Uuid) -> Result<CollectionRequest, DomainError> {
        let updated = self.transition(id, CollectionStatus::Assigned, |request| {
            request.collector_id = Some(collector_id);
            Ok(())
        })?;
        tracing::info!(request_id = %id, collector_id = %collector_id, "collection request assigned");
        Ok(updated)
    }

    /// Assigned -> InProgress.
    pub fn start(&self, id: Uuid) -> Result<CollectionRequest, DomainError> {
        let updated = self.transition(id, CollectionStatus::InProgress, |_| Ok(()))?;
        tracing::info!(request_id = %id, "collection started");
        Ok(updated)
    }

    /// Assigned or InProgress -> Validated.
    ///
    /// The declared material mix is scaled to the measured total, priced
    /// through the points table, stored on the request, and accrued to the
    /// requester's ledger.
    pub fn validate(
        &self,
        id: Uuid,
        actual_kilograms: f64,
    ) -> Result<CollectionRequest, DomainError> {
        if actual_kilograms <= 0.0 {
            return Err(DomainError::Validation(
                "Measured weight must be positive".to_string(),
            ));
        }

        let mut scaled: Vec<MaterialEntry> = Vec::new();
        let updated = self.transition(id, CollectionStatus::Validated, |request| {
            let declared = request.declared_weight();
            scaled = scale_to_actual_weight(&request.materials, actual_kilograms, declared);
            request.actual_weight = Some(actual_kilograms);
            request.points_awarded = Some(self.table.points_for(&scaled));
            Ok(())
        })?;

        let accrued = self.points.accrue(updated.requester_id, &scaled)?;
        tracing::info!(
            request_id = %id,
            actual_kg = actual_kilograms,
            points = accrued.points,
            "collection validated"
        );
        Ok(updated)
    }

    /// Assigned or InProgress -> Rejected, with a mandatory reason.
    /// No points are awarded.
    pub fn reject(&self, id: Uuid, reason: &str) -> Result<CollectionRequest, DomainError> {
        validate_rejection_reason(reason)?;
        let updated = self.transition(id, CollectionStatus::Rejected, |request| {
            request.rejection_reason = Some(reason.to_string());
            Ok(())
        })?;
        tracing::info!(request_id = %id, "collection rejected");
        Ok(updated)
    }

    /// Requests created by a requester.
    pub fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<CollectionRequest>, DomainError> {
        self.collections.list_by_requester(requester_id)
    }

    /// Requests awaiting a collector in the given city.
    pub fn list_available_by_city(&self, city: &str) -> Result<Vec<CollectionRequest>, DomainError> {
        self.collections.list_available_by_city(city)
    }

    /// Requests assigned to a collector.
    pub fn list_by_collector(&self, collector_id: Uuid) -> Result<Vec<CollectionRequest>, DomainError> {
        self.collections.list_by_collector(collector_id)
    }

    /// One atomic lifecycle transition; the closure runs after the
    /// transition guard and before the document is saved.
    fn transition<F>(
        &self,
        id: Uuid,
        next: CollectionStatus,
        apply: F,
    ) -> Result<CollectionRequest, DomainError>
    where
        F: FnOnce(&mut CollectionRequest) -> Result<(), DomainError>,
    {
        let updated = self.collections.mutate(|all| {
            let request = all
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("collection request {id}")))?;
            if !request.status.can_transition_to(next) {
                return Err(DomainError::InvalidState(format!(
                    "cannot move a {} request to {}",
                    request.status, next
                )));
            }
            request.status = next;
            apply(request)?;
            request.updated_at = Utc::now();
            Ok(request.clone())
        })?;

        self.notifier.emit(&ChangeEvent::CollectionChanged { id });
        Ok(updated)
    }
}
