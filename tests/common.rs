//! Test utilities & fixtures.
//! Builds small worlds over tempdir-backed stores. Tests that mutate state
//! get their own tempdir so runs stay independent.

use concierge::config::MovementConfig;
use concierge::world::{CategoryId, LocationId, WorldEngine, WorldStore, WorldStoreBuilder};
use tempfile::TempDir;

#[allow(dead_code)] // Not every test binary uses every fixture.
pub fn world_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("world.json")
}

/// A compact hotel world: one ordinary category, the private-quarters hub,
/// one self-adjacent row, and a three-stop bus network.
#[allow(dead_code)]
pub fn hotel_store(dir: &TempDir) -> WorldStore {
    let store = WorldStoreBuilder::new(world_path(dir))
        .without_seed()
        .open()
        .expect("open store");
    let mut doc = store.load().expect("load");
    doc.available_destinations.insert(
        CategoryId::from("Hotel"),
        vec![
            LocationId::from("lobby"),
            LocationId::from("bar"),
            LocationId::from("roof"),
        ],
    );
    doc.available_destinations.insert(
        CategoryId::from("Hotel Eclipse"),
        vec![
            LocationId::from("lobby"),
            LocationId::from("bar"),
            LocationId::from("bedroom"),
        ],
    );
    doc.available_destinations.insert(
        CategoryId::from("beach"),
        vec![LocationId::from("promenade"), LocationId::from("marina")],
    );
    doc.bus_destinations = vec![
        LocationId::from("hotel-entrance"),
        LocationId::from("promenade"),
        LocationId::from("marina"),
    ];
    store.save(&doc).expect("save");
    store
}

#[allow(dead_code)]
pub fn hotel_engine(dir: &TempDir) -> WorldEngine {
    WorldEngine::new(hotel_store(dir), MovementConfig::default()).expect("engine")
}

/// Reopen an engine over the same document file, as a fresh process would.
#[allow(dead_code)]
pub fn reopen_engine(dir: &TempDir) -> WorldEngine {
    let store = WorldStore::open(world_path(dir)).expect("reopen store");
    WorldEngine::new(store, MovementConfig::default()).expect("engine")
}
