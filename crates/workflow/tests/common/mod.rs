//! Common test utilities for integration tests.
//!
//! Builds a workflow facade over an in-memory store with a switchable
//! identity, so tests can act as the requester, the collector, or nobody.

// Allow dead code in this module - these are helper utilities that may not be
// used by all integration tests but are intentionally available to each.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::models::{Actor, CreateCollectionRequest, MaterialEntry, MaterialKind, Role};
use fake::faker::name::en::Name;
use fake::Fake;
use persistence::store::MemoryStore;
use recyclehub_workflow::config::{
    Config, LoggingConfig, PointsConfig, RewardTier, RewardsConfig, StorageConfig,
};
use recyclehub_workflow::identity::StaticIdentity;
use recyclehub_workflow::photos::DataUrlIngestor;
use recyclehub_workflow::RecycleHub;
use uuid::Uuid;

pub struct TestApp {
    pub hub: RecycleHub,
    pub identity: Arc<StaticIdentity>,
    pub requester: Actor,
    pub collector: Actor,
}

impl TestApp {
    pub fn as_requester(&self) {
        self.identity.set(Some(self.requester));
    }

    pub fn as_collector(&self) {
        self.identity.set(Some(self.collector));
    }

    pub fn sign_out(&self) {
        self.identity.set(None);
    }

    /// Runs one full requester-to-collector cycle on a metal request and
    /// returns the points it earned (metal_kg * 5 under the test config).
    pub fn earn_points(&self, metal_kg: f64) -> f64 {
        self.as_requester();
        let request = self
            .hub
            .create_collection(payload(vec![(MaterialKind::Metal, metal_kg)]))
            .expect("create for earning points");

        self.as_collector();
        self.hub
            .accept_collection(request.id)
            .expect("accept for earning points");
        let validated = self
            .hub
            .validate_collection(request.id, metal_kg)
            .expect("validate for earning points");

        self.as_requester();
        validated.points_awarded.unwrap_or(0.0)
    }
}

/// Test configuration built by hand, without touching config files.
pub fn test_config() -> Config {
    Config {
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        storage: StorageConfig {
            path: ".recyclehub-test".to_string(),
        },
        points: PointsConfig {
            plastic_per_kg: 2.0,
            glass_per_kg: 1.0,
            paper_per_kg: 1.0,
            metal_per_kg: 5.0,
        },
        rewards: RewardsConfig {
            tiers: vec![
                RewardTier {
                    points: 100.0,
                    value: 50.0,
                },
                RewardTier {
                    points: 200.0,
                    value: 120.0,
                },
                RewardTier {
                    points: 500.0,
                    value: 350.0,
                },
            ],
            voucher_validity_days: 90,
        },
    }
}

/// Fresh facade over an empty in-memory store, signed out.
pub fn test_app() -> TestApp {
    let identity = Arc::new(StaticIdentity::anonymous());
    let hub = RecycleHub::new(
        &test_config(),
        Arc::new(MemoryStore::new()),
        identity.clone(),
        Arc::new(DataUrlIngestor),
    );
    TestApp {
        hub,
        identity,
        requester: Actor {
            id: Uuid::new_v4(),
            role: Role::Requester,
        },
        collector: Actor {
            id: Uuid::new_v4(),
            role: Role::Collector,
        },
    }
}

/// A valid creation payload for the given (kind, kilograms) pairs.
pub fn payload(materials: Vec<(MaterialKind, f64)>) -> CreateCollectionRequest {
    CreateCollectionRequest {
        materials: materials
            .into_iter()
            .map(|(kind, kilograms)| MaterialEntry { kind, kilograms })
            .collect(),
        address: "marrakech, mhamid 4".to_string(),
        scheduled_date: Utc::now().date_naive() + Duration::days(3),
        time_slot: "14:00-15:00".to_string(),
        notes: None,
        photos: vec![],
    }
}

/// A generated beneficiary name.
pub fn beneficiary() -> String {
    Name().fake()
}
