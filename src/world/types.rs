use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const WORLD_SCHEMA_VERSION: u8 = 1;

/// Unique name of a location. In a chat deployment this is the channel name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Name of a category: a grouping of locations that shares one adjacency row.
/// Self-adjacent terrain re-uses location names as row keys, hence the
/// conversion from [`LocationId`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<&LocationId> for CategoryId {
    fn from(location: &LocationId) -> Self {
        Self(location.as_str().to_string())
    }
}

/// Identity of a participant, as resolved by the chat collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The two travel modes, each with its own cooldown ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MoveMode {
    Walk,
    Bus,
}

impl MoveMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Bus => "bus",
        }
    }
}

impl FromStr for MoveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "bus" => Ok(Self::Bus),
            other => Err(format!("unknown travel mode: {other}")),
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the travel graph is keyed for a given origin. Resolved once, before
/// any adjacency lookup, instead of rewriting category strings in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementContext {
    /// Ordinary category: the adjacency row is keyed by the category name.
    Standard { key: CategoryId },
    /// Private quarters: every private room shares the hub category's row,
    /// and the origin is presented as the reserved `bedroom` token so the
    /// caller's own room never shows up in listings.
    PrivateQuarters {
        key: CategoryId,
        effective_origin: LocationId,
    },
    /// Self-adjacent terrain: the adjacency row is keyed by the origin
    /// location itself.
    SelfAdjacent { key: CategoryId },
}

impl MovementContext {
    /// The adjacency-table key this context resolves to.
    pub fn lookup_key(&self) -> &CategoryId {
        match self {
            Self::Standard { key } => key,
            Self::PrivateQuarters { key, .. } => key,
            Self::SelfAdjacent { key } => key,
        }
    }

    /// The location filtered out of the listing as "where you already are".
    pub fn effective_origin<'a>(&'a self, origin: &'a LocationId) -> &'a LocationId {
        match self {
            Self::PrivateQuarters {
                effective_origin, ..
            } => effective_origin,
            _ => origin,
        }
    }
}

/// The single persisted snapshot of the whole world. Writes are always
/// whole-document rewrites; there is no field-level patching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldDocument {
    pub schema_version: u8,
    /// Adjacency table: category (or self-adjacent location) to reachable
    /// locations, in configured listing order.
    pub available_destinations: HashMap<CategoryId, Vec<LocationId>>,
    /// Locations hidden from destination listings.
    #[serde(default)]
    pub forbidden_locations: Vec<LocationId>,
    /// Locations from which outward movement is disallowed.
    #[serde(default)]
    pub locked_locations: Vec<LocationId>,
    /// The live bus network.
    #[serde(default)]
    pub bus_destinations: Vec<LocationId>,
    /// Snapshot of the bus network saved by a pause, restored by a resume.
    #[serde(default)]
    pub bus_state: Vec<LocationId>,
    #[serde(default)]
    pub walk_cooldown: HashMap<UserId, DateTime<Utc>>,
    #[serde(default)]
    pub bus_cooldown: HashMap<UserId, DateTime<Utc>>,
    /// Private room assignments, one room per user.
    #[serde(default)]
    pub room_owners: HashMap<UserId, LocationId>,
}

impl WorldDocument {
    pub fn empty() -> Self {
        Self {
            schema_version: WORLD_SCHEMA_VERSION,
            available_destinations: HashMap::new(),
            forbidden_locations: Vec::new(),
            locked_locations: Vec::new(),
            bus_destinations: Vec::new(),
            bus_state: Vec::new(),
            walk_cooldown: HashMap::new(),
            bus_cooldown: HashMap::new(),
            room_owners: HashMap::new(),
        }
    }

    pub fn is_locked(&self, location: &LocationId) -> bool {
        self.locked_locations.contains(location)
    }

    pub fn is_forbidden(&self, location: &LocationId) -> bool {
        self.forbidden_locations.contains(location)
    }

    pub fn cooldown_ledger(&self, mode: MoveMode) -> &HashMap<UserId, DateTime<Utc>> {
        match mode {
            MoveMode::Walk => &self.walk_cooldown,
            MoveMode::Bus => &self.bus_cooldown,
        }
    }

    pub fn cooldown_ledger_mut(&mut self, mode: MoveMode) -> &mut HashMap<UserId, DateTime<Utc>> {
        match mode {
            MoveMode::Walk => &mut self.walk_cooldown,
            MoveMode::Bus => &mut self.bus_cooldown,
        }
    }
}

/// One movement attempt as handed over by the collaborator: caller identity
/// and channel/category already resolved to domain identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRequest {
    pub user: UserId,
    pub mode: MoveMode,
    pub origin: LocationId,
    /// Category of the origin; required for walk moves, unused for bus.
    pub category: Option<CategoryId>,
    /// Absent destination means "list where I could go".
    pub destination: Option<LocationId>,
}

impl MoveRequest {
    pub fn walk(user: UserId, origin: LocationId, category: CategoryId) -> Self {
        Self {
            user,
            mode: MoveMode::Walk,
            origin,
            category: Some(category),
            destination: None,
        }
    }

    pub fn bus(user: UserId, origin: LocationId) -> Self {
        Self {
            user,
            mode: MoveMode::Bus,
            origin,
            category: None,
            destination: None,
        }
    }

    pub fn to(mut self, destination: LocationId) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// Outcome of flipping a location in or out of one of the toggle sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Whether the bus network is live after a pause-or-resume swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusService {
    Enabled,
    Disabled,
}

/// A movement that actually applied: access changed hands and the cooldown
/// timestamp was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReceipt {
    pub user: UserId,
    pub mode: MoveMode,
    pub origin: LocationId,
    pub destination: LocationId,
    pub moved_at: DateTime<Utc>,
}

/// Result of a movement transaction, handed back to the collaborator for
/// presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    Moved(MoveReceipt),
    /// No destination was supplied; the transaction ended read-only with the
    /// listing of reachable locations.
    Destinations(Vec<LocationId>),
}
