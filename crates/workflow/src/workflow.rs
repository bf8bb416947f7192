//! Role-gated workflow facade.
//!
//! Maps the requester and collector roles to the operations each may invoke
//! and wires the services over one storage backend. The identity collaborator
//! supplies who is acting; a role mismatch or missing session surfaces as
//! `Forbidden` and the session layer decides how to react.

use std::sync::Arc;

use domain::errors::DomainError;
use domain::models::{
    Actor, CollectionRequest, CreateCollectionRequest, PointTransaction, Role,
    UpdateCollectionRequest, Voucher,
};
use persistence::repositories::{CollectionRepository, LedgerRepository};
use persistence::store::StorageBackend;
use uuid::Uuid;

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::notify::{ChangeEvent, ChangeNotifier};
use crate::photos::PhotoIngestor;
use crate::services::{CollectionService, PointsService, VoucherIssuer};

pub struct RecycleHub {
    identity: Arc<dyn IdentityProvider>,
    photos: Arc<dyn PhotoIngestor>,
    collections: CollectionService,
    points: Arc<PointsService>,
    vouchers: VoucherIssuer,
    notifier: Arc<ChangeNotifier>,
}

impl RecycleHub {
    /// Wires the services over one storage backend.
    pub fn new(
        config: &Config,
        store: Arc<dyn StorageBackend>,
        identity: Arc<dyn IdentityProvider>,
        photos: Arc<dyn PhotoIngestor>,
    ) -> Self {
        let notifier = Arc::new(ChangeNotifier::new());
        let table = config.points.table();
        let points = Arc::new(PointsService::new(
            LedgerRepository::new(store.clone()),
            table.clone(),
            config.rewards.tiers.clone(),
            notifier.clone(),
        ));
        let collections = CollectionService::new(
            CollectionRepository::new(store),
            table,
            points.clone(),
            notifier.clone(),
        );
        let vouchers = VoucherIssuer::new(
            points.clone(),
            config.rewards.voucher_validity_days,
            notifier.clone(),
        );

        Self {
            identity,
            photos,
            collections,
            points,
            vouchers,
            notifier,
        }
    }

    /// Registers a change listener for the UI layer.
    pub fn subscribe(&self, listener: Box<dyn Fn(&ChangeEvent) + Send + Sync>) {
        self.notifier.subscribe(listener);
    }

    // Requester operations

    /// Creates a collection request owned by the current requester.
    pub fn create_collection(
        &self,
        payload: CreateCollectionRequest,
    ) -> Result<CollectionRequest, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.collections.create(actor.id, payload)
    }

    /// Lists the current requester's own requests.
    pub fn my_collections(&self) -> Result<Vec<CollectionRequest>, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.collections.list_by_requester(actor.id)
    }

    /// Edits one of the current requester's requests.
    pub fn update_collection(
        &self,
        id: Uuid,
        update: UpdateCollectionRequest,
    ) -> Result<CollectionRequest, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.collections.update(actor.id, id, update)
    }

    /// Deletes one of the current requester's requests.
    pub fn delete_collection(&self, id: Uuid) -> Result<(), DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.collections.delete(actor.id, id)
    }

    /// The current requester's point balance.
    pub fn my_balance(&self) -> Result<f64, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.points.balance(actor.id)
    }

    /// The current requester's point history, most recent first.
    pub fn my_history(&self) -> Result<Vec<PointTransaction>, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.points.history(actor.id)
    }

    /// Exchanges points from the current requester's balance for a voucher.
    pub fn redeem_points(
        &self,
        point_cost: f64,
        beneficiary: &str,
    ) -> Result<Voucher, DomainError> {
        let actor = self.require_role(Role::Requester)?;
        self.vouchers.issue(actor.id, point_cost, beneficiary)
    }

    // Collector operations

    /// Requests awaiting a collector in the given city.
    pub fn available_collections(&self, city: &str) -> Result<Vec<CollectionRequest>, DomainError> {
        self.require_role(Role::Collector)?;
        self.collections.list_available_by_city(city)
    }

    /// Claims a request for the current collector.
    pub fn accept_collection(&self, id: Uuid) -> Result<CollectionRequest, DomainError> {
        let actor = self.require_role(Role::Collector)?;
        self.collections.assign(id, actor.id)
    }

    /// Marks a claimed request as being collected.
    pub fn start_collection(&self, id: Uuid) -> Result<CollectionRequest, DomainError> {
        self.require_role(Role::Collector)?;
        self.collections.start(id)
    }

    /// Confirms a pickup with the measured weight, awarding points.
    pub fn validate_collection(
        &self,
        id: Uuid,
        actual_kilograms: f64,
    ) -> Result<CollectionRequest, DomainError> {
        self.require_role(Role::Collector)?;
        self.collections.validate(id, actual_kilograms)
    }

    /// Rejects a pickup with a reason; no points are awarded.
    pub fn reject_collection(&self, id: Uuid, reason: &str) -> Result<CollectionRequest, DomainError> {
        self.require_role(Role::Collector)?;
        self.collections.reject(id, reason)
    }

    /// Lists the requests assigned to the current collector.
    pub fn my_assignments(&self) -> Result<Vec<CollectionRequest>, DomainError> {
        let actor = self.require_role(Role::Collector)?;
        self.collections.list_by_collector(actor.id)
    }

    // Operations open to any signed-in actor

    /// Fetches a single request.
    pub fn collection(&self, id: Uuid) -> Result<CollectionRequest, DomainError> {
        self.require_session()?;
        self.collections.get(id)
    }

    /// Converts raw image bytes into a reference storable on a request.
    pub fn ingest_photo(&self, bytes: &[u8], content_type: &str) -> Result<String, DomainError> {
        self.require_session()?;
        Ok(self.photos.ingest(bytes, content_type))
    }

    fn require_session(&self) -> Result<Actor, DomainError> {
        self.identity.current_actor().ok_or_else(|| {
            DomainError::Forbidden("no active session, sign in again".to_string())
        })
    }

    fn require_role(&self, role: Role) -> Result<Actor, DomainError> {
        let actor = self.require_session()?;
        if actor.role != role {
            return Err(DomainError::Forbidden(format!("{role} role required")));
        }
        Ok(actor)
    }
}
