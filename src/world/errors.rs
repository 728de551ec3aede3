use thiserror::Error;

/// Failures of world transactions, categorized rather than thrown as generic
/// errors. The first six are routine outcomes surfaced to the collaborator;
/// the rest are infrastructure failures. None are fatal to the process.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Outward movement from the origin is currently disallowed.
    #[error("movement from this location is locked")]
    LocationLocked,

    /// No adjacency row is configured for the origin's lookup key.
    #[error("no movement routes configured for {0}")]
    InvalidCategory(String),

    /// The requested destination is not in the reachable set.
    #[error("unreachable destination: {0}")]
    InvalidDestination(String),

    /// The user moved too recently in this mode.
    #[error("on cooldown for another {}s", .remaining.num_seconds())]
    OnCooldown { remaining: chrono::Duration },

    /// The user asked for their bedroom but owns no room.
    #[error("no room assigned to {0}")]
    NoRoomAssigned(String),

    /// The user already owns a room.
    #[error("{0} already owns a room")]
    AlreadyOwned(String),

    /// Wrapper around IO errors (directory creation, document writes).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json document errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when loading a document with an unexpected schema version.
    #[error("schema mismatch: expected {expected}, got {found}")]
    SchemaMismatch { expected: u8, found: u8 },
}

impl WorldError {
    /// Routine outcomes the collaborator should surface as a passive marker
    /// (a reaction, not an error message).
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::LocationLocked | Self::OnCooldown { .. })
    }
}
