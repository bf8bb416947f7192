use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use domain::models::{Actor, CreateCollectionRequest, MaterialEntry, MaterialKind, Role};
use persistence::store::FileStore;
use recyclehub_workflow::config::Config;
use recyclehub_workflow::identity::StaticIdentity;
use recyclehub_workflow::logging;
use recyclehub_workflow::photos::DataUrlIngestor;
use recyclehub_workflow::RecycleHub;
use tracing::info;
use uuid::Uuid;

// Stable ids so repeated runs find the same demo accounts in the store.
const DEMO_REQUESTER: Uuid = Uuid::from_u128(0x5eed_0001);
const DEMO_COLLECTOR: Uuid = Uuid::from_u128(0x5eed_0002);

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting RecycleHub core v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(FileStore::open(&config.storage.path)?);
    let identity = Arc::new(StaticIdentity::anonymous());
    let hub = RecycleHub::new(&config, store, identity.clone(), Arc::new(DataUrlIngestor));

    identity.set(Some(Actor {
        id: DEMO_REQUESTER,
        role: Role::Requester,
    }));

    // First run against an empty store: seed demo data and walk one
    // request through its full lifecycle.
    if hub.my_collections()?.is_empty() {
        info!("Empty store, seeding demo data");
        seed_demo_flow(&hub, &identity)?;
    }

    let requests = hub.my_collections()?;
    info!(
        requests = requests.len(),
        balance = hub.my_balance()?,
        "demo requester state"
    );
    for request in &requests {
        info!(
            request_id = %request.id,
            status = %request.status,
            declared_kg = request.declared_weight(),
            points = request.points_awarded.unwrap_or(0.0),
            "collection request"
        );
    }

    Ok(())
}

fn seed_demo_flow(hub: &RecycleHub, identity: &StaticIdentity) -> Result<()> {
    let photo = hub.ingest_photo(b"not really a png", "image/png")?;

    let first = hub.create_collection(CreateCollectionRequest {
        materials: vec![
            MaterialEntry {
                kind: MaterialKind::Plastic,
                kilograms: 5.0,
            },
            MaterialEntry {
                kind: MaterialKind::Glass,
                kilograms: 5.0,
            },
        ],
        address: "marrakech, mhamid 4".to_string(),
        scheduled_date: Utc::now().date_naive() + Duration::days(3),
        time_slot: "14:00-15:00".to_string(),
        notes: None,
        photos: vec![photo],
    })?;

    hub.create_collection(CreateCollectionRequest {
        materials: vec![MaterialEntry {
            kind: MaterialKind::Plastic,
            kilograms: 1.0,
        }],
        address: "marrakech, mhamid 4".to_string(),
        scheduled_date: Utc::now().date_naive() + Duration::days(10),
        time_slot: "11:00-12:00".to_string(),
        notes: Some("ring the bell twice".to_string()),
        photos: vec![],
    })?;

    // A collector picks up the first request and validates it at 8 kg.
    identity.set(Some(Actor {
        id: DEMO_COLLECTOR,
        role: Role::Collector,
    }));
    hub.accept_collection(first.id)?;
    hub.start_collection(first.id)?;
    hub.validate_collection(first.id, 8.0)?;

    identity.set(Some(Actor {
        id: DEMO_REQUESTER,
        role: Role::Requester,
    }));
    Ok(())
}
