//! Location & movement engine: the persisted world model and the algorithms
//! deciding whether a requested move is legal and what state changes it
//! produces. The chat transport, command parsing, and channel permissions
//! are external collaborators; they hand this module resolved identifiers
//! and apply the access effects it emits.

pub mod cooldown;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod rooms;
pub mod state;
pub mod store;
pub mod toggles;
pub mod types;

pub use cooldown::{check as check_cooldown, CooldownStatus};
pub use engine::{AccessControl, LoggedAccess, WorldEngine};
pub use errors::WorldError;
pub use graph::{available_destinations, bus_destinations, resolve_context};
pub use rooms::{assign_room, owned_room, resolve_bedroom};
pub use state::{
    canonical_world_document, BEDROOM_TOKEN, PRIVATE_QUARTERS_CATEGORY, PRIVATE_QUARTERS_HUB,
    SELF_ADJACENT_CATEGORIES, STARTER_WORLD_LOCATION_IDS,
};
pub use store::{WorldStore, WorldStoreBuilder};
pub use toggles::{
    pause_or_resume_bus, toggle_bus_destination, toggle_forbidden, toggle_locked,
};
pub use types::*;
