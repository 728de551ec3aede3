//! Room ownership registry: one private room per user.
//!
//! Room names are derived from the registry size at assignment time
//! (`room-N`, N = size + 1). There is no unassign operation, so the
//! numbering never regresses.

use crate::world::errors::WorldError;
use crate::world::state::BEDROOM_TOKEN;
use crate::world::types::{LocationId, UserId, WorldDocument};

/// Record a new room for `user` and return its derived name.
///
/// The underlying channel is created by the collaborator; the registry only
/// records the mapping.
pub fn assign_room(doc: &mut WorldDocument, user: &UserId) -> Result<LocationId, WorldError> {
    if doc.room_owners.contains_key(user) {
        return Err(WorldError::AlreadyOwned(user.to_string()));
    }
    let room = LocationId::new(format!("room-{}", doc.room_owners.len() + 1));
    doc.room_owners.insert(user.clone(), room.clone());
    Ok(room)
}

/// The room owned by `user`, if any.
pub fn owned_room<'a>(doc: &'a WorldDocument, user: &UserId) -> Option<&'a LocationId> {
    doc.room_owners.get(user)
}

/// Resolve the reserved `bedroom` token to the caller's own room; any other
/// destination passes through unchanged.
pub fn resolve_bedroom(
    doc: &WorldDocument,
    user: &UserId,
    destination: &LocationId,
) -> Result<LocationId, WorldError> {
    if destination.as_str() != BEDROOM_TOKEN {
        return Ok(destination.clone());
    }
    owned_room(doc, user)
        .cloned()
        .ok_or_else(|| WorldError::NoRoomAssigned(user.to_string()))
}
