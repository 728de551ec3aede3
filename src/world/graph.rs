//! Travel graph resolution: which locations can be reached from where.
//!
//! The adjacency table is keyed by category, except for the two special
//! rules resolved here first: private quarters collapse onto the shared hub
//! row with the origin re-labeled `bedroom`, and self-adjacent terrain keys
//! its row by the origin location itself.

use log::warn;

use crate::world::errors::WorldError;
use crate::world::state::{
    is_self_adjacent, BEDROOM_TOKEN, PRIVATE_QUARTERS_CATEGORY, PRIVATE_QUARTERS_HUB,
};
use crate::world::types::{CategoryId, LocationId, MovementContext, WorldDocument};

/// Resolve the movement context for an origin and its category.
///
/// Fails with `InvalidCategory` when the category is neither special nor
/// present in the adjacency table; that is a configuration gap and is logged
/// as a data-integrity warning.
pub fn resolve_context(
    doc: &WorldDocument,
    origin: &LocationId,
    category: &CategoryId,
) -> Result<MovementContext, WorldError> {
    if category.as_str() == PRIVATE_QUARTERS_CATEGORY {
        return Ok(MovementContext::PrivateQuarters {
            key: CategoryId::from(PRIVATE_QUARTERS_HUB),
            effective_origin: LocationId::from(BEDROOM_TOKEN),
        });
    }
    if is_self_adjacent(category) {
        return Ok(MovementContext::SelfAdjacent {
            key: CategoryId::from(origin),
        });
    }
    if doc.available_destinations.contains_key(category) {
        return Ok(MovementContext::Standard {
            key: category.clone(),
        });
    }
    warn!(
        "data integrity: category {} has no adjacency row (origin {})",
        category, origin
    );
    Err(WorldError::InvalidCategory(category.to_string()))
}

/// Compute the walkable destinations from `origin`, in configured order,
/// with the effective origin and all forbidden locations filtered out.
pub fn available_destinations(
    doc: &WorldDocument,
    origin: &LocationId,
    category: &CategoryId,
) -> Result<Vec<LocationId>, WorldError> {
    let context = resolve_context(doc, origin, category)?;
    let key = context.lookup_key();
    let Some(row) = doc.available_destinations.get(key) else {
        // A special-category key can still be missing its row entirely.
        warn!("data integrity: lookup key {} has no adjacency row", key);
        return Err(WorldError::InvalidCategory(key.to_string()));
    };
    let effective_origin = context.effective_origin(origin);
    Ok(row
        .iter()
        .filter(|loc| *loc != effective_origin && !doc.is_forbidden(loc))
        .cloned()
        .collect())
}

/// Compute the bus destinations from `origin`: the live network minus the
/// origin itself. The forbidden set does not apply to bus listings.
pub fn bus_destinations(doc: &WorldDocument, origin: &LocationId) -> Vec<LocationId> {
    doc.bus_destinations
        .iter()
        .filter(|loc| *loc != origin)
        .cloned()
        .collect()
}
