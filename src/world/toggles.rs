//! Visibility, lock, and bus-network toggles.
//!
//! All three per-location toggles share one primitive: a location absent from
//! the set is added, a present one is removed. The bus pause/resume swap is a
//! distinct whole-set operation and must not be confused with per-location
//! toggling.

use crate::world::types::{BusService, LocationId, ToggleOutcome, WorldDocument};

fn toggle(set: &mut Vec<LocationId>, location: &LocationId) -> ToggleOutcome {
    if let Some(pos) = set.iter().position(|l| l == location) {
        set.remove(pos);
        ToggleOutcome::Removed
    } else {
        set.push(location.clone());
        ToggleOutcome::Added
    }
}

/// Hide a location from destination listings, or reveal it again.
pub fn toggle_forbidden(doc: &mut WorldDocument, location: &LocationId) -> ToggleOutcome {
    toggle(&mut doc.forbidden_locations, location)
}

/// Disallow outward movement from a location, or allow it again.
pub fn toggle_locked(doc: &mut WorldDocument, location: &LocationId) -> ToggleOutcome {
    toggle(&mut doc.locked_locations, location)
}

/// Add a location to the live bus network, or remove it.
pub fn toggle_bus_destination(doc: &mut WorldDocument, location: &LocationId) -> ToggleOutcome {
    toggle(&mut doc.bus_destinations, location)
}

/// Swap the live bus network with its saved snapshot.
///
/// Pausing while the network is non-empty saves it and empties the live set;
/// invoking again while empty restores the snapshot verbatim. Per-location
/// toggles applied during a pause land in an otherwise-empty live set and are
/// overwritten by the resume; the snapshot is not merged.
pub fn pause_or_resume_bus(doc: &mut WorldDocument) -> BusService {
    if !doc.bus_destinations.is_empty() {
        doc.bus_state = std::mem::take(&mut doc.bus_destinations);
        BusService::Disabled
    } else {
        doc.bus_destinations = doc.bus_state.clone();
        BusService::Enabled
    }
}
