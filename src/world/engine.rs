//! The movement transaction: validate a requested move against the travel
//! graph, cooldown ledger, and toggle sets, then apply it atomically.
//!
//! The engine owns the world document behind a single mutex; every
//! read-modify-write (movement apply, toggles, room assignment) holds the
//! lock across the persistence write, so concurrent callers serialize per
//! store instance and no check-then-act race is possible.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::{Config, MovementConfig};
use crate::logutil::escape_log;
use crate::world::cooldown::{self, CooldownStatus};
use crate::world::errors::WorldError;
use crate::world::graph;
use crate::world::rooms;
use crate::world::store::WorldStore;
use crate::world::toggles;
use crate::world::types::{
    BusService, CategoryId, LocationId, MoveMode, MoveReceipt, MoveRequest, MoveResult,
    ToggleOutcome, UserId, WorldDocument,
};

/// The collaborator that applies channel access changes (the chat platform
/// in a full deployment). The engine emits a grant for the destination and a
/// revoke for the origin once a move has been persisted.
pub trait AccessControl: Send + Sync {
    fn grant(&self, user: &UserId, location: &LocationId);
    fn revoke(&self, user: &UserId, location: &LocationId);
}

/// Default collaborator: records access changes in the log only.
pub struct LoggedAccess;

impl AccessControl for LoggedAccess {
    fn grant(&self, user: &UserId, location: &LocationId) {
        info!(
            "access granted: {} -> {}",
            escape_log(user.as_str()),
            escape_log(location.as_str())
        );
    }

    fn revoke(&self, user: &UserId, location: &LocationId) {
        info!(
            "access revoked: {} -> {}",
            escape_log(user.as_str()),
            escape_log(location.as_str())
        );
    }
}

/// The location & movement engine over one persisted world document.
pub struct WorldEngine {
    store: WorldStore,
    doc: Mutex<WorldDocument>,
    access: Box<dyn AccessControl>,
    movement: MovementConfig,
}

impl WorldEngine {
    /// Build an engine over an already-opened store.
    pub fn new(store: WorldStore, movement: MovementConfig) -> Result<Self, WorldError> {
        let doc = store.load()?;
        Ok(Self {
            store,
            doc: Mutex::new(doc),
            access: Box::new(LoggedAccess),
            movement,
        })
    }

    /// Open the engine rooted at the configured document path.
    pub fn open(config: &Config) -> Result<Self, WorldError> {
        Self::new(
            WorldStore::open(&config.world.data_file)?,
            config.movement.clone(),
        )
    }

    /// Replace the access-control collaborator.
    pub fn with_access(mut self, access: Box<dyn AccessControl>) -> Self {
        self.access = access;
        self
    }

    fn lock_doc(&self) -> MutexGuard<'_, WorldDocument> {
        // A poisoned lock still guards a consistent document: memory is only
        // updated after a successful persist.
        self.doc
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the current in-memory document (status displays, tests).
    pub fn snapshot(&self) -> WorldDocument {
        self.lock_doc().clone()
    }

    /// Attempt one move. Without a destination the transaction ends
    /// read-only with the listing of reachable locations.
    pub fn move_user(&self, request: &MoveRequest) -> Result<MoveResult, WorldError> {
        self.move_user_at(request, Utc::now())
    }

    /// Deterministic variant of [`move_user`](Self::move_user) for callers
    /// that supply the clock.
    pub fn move_user_at(
        &self,
        request: &MoveRequest,
        now: DateTime<Utc>,
    ) -> Result<MoveResult, WorldError> {
        let mut doc = self.lock_doc();

        let reachable =
            Self::reachable(&doc, request.mode, &request.origin, request.category.as_ref())?;

        let Some(destination) = &request.destination else {
            return Ok(MoveResult::Destinations(reachable));
        };

        if !reachable.contains(destination) {
            debug!(
                "{} cannot reach {} from {}",
                escape_log(request.user.as_str()),
                escape_log(destination.as_str()),
                escape_log(request.origin.as_str())
            );
            return Err(WorldError::InvalidDestination(destination.to_string()));
        }

        let threshold = self.movement.threshold(request.mode);
        if let CooldownStatus::Waiting { remaining } =
            cooldown::check(&doc, request.mode, &request.user, now, threshold)
        {
            return Err(WorldError::OnCooldown { remaining });
        }

        let destination = match request.mode {
            MoveMode::Walk => rooms::resolve_bedroom(&doc, &request.user, destination)?,
            MoveMode::Bus => destination.clone(),
        };

        let receipt = self.apply(
            &mut doc,
            &request.user,
            request.mode,
            &request.origin,
            destination,
            now,
        )?;
        Ok(MoveResult::Moved(receipt))
    }

    /// The reachable-destination listing for one origin, lock check included.
    pub fn list_destinations(
        &self,
        origin: &LocationId,
        category: Option<&CategoryId>,
        mode: MoveMode,
    ) -> Result<Vec<LocationId>, WorldError> {
        let doc = self.lock_doc();
        Self::reachable(&doc, mode, origin, category)
    }

    /// Administrative teleport: no lock, validity, or cooldown checks, but
    /// the cooldown timestamp is recorded as if the move occurred normally.
    pub fn force_move(
        &self,
        user: &UserId,
        mode: MoveMode,
        origin: &LocationId,
        destination: &LocationId,
    ) -> Result<MoveReceipt, WorldError> {
        self.force_move_at(user, mode, origin, destination, Utc::now())
    }

    pub fn force_move_at(
        &self,
        user: &UserId,
        mode: MoveMode,
        origin: &LocationId,
        destination: &LocationId,
        now: DateTime<Utc>,
    ) -> Result<MoveReceipt, WorldError> {
        let mut doc = self.lock_doc();
        self.apply(&mut doc, user, mode, origin, destination.clone(), now)
    }

    /// Hide a location from destination listings, or reveal it again.
    pub fn toggle_forbidden(&self, location: &LocationId) -> Result<ToggleOutcome, WorldError> {
        let outcome = self.commit(|doc| Ok(toggles::toggle_forbidden(doc, location)))?;
        match outcome {
            ToggleOutcome::Added => info!("{} was hidden", escape_log(location.as_str())),
            ToggleOutcome::Removed => info!("{} was revealed", escape_log(location.as_str())),
        }
        Ok(outcome)
    }

    /// Lock outward movement from a location, or unlock it.
    pub fn toggle_locked(&self, location: &LocationId) -> Result<ToggleOutcome, WorldError> {
        let outcome = self.commit(|doc| Ok(toggles::toggle_locked(doc, location)))?;
        match outcome {
            ToggleOutcome::Added => info!("{} was locked", escape_log(location.as_str())),
            ToggleOutcome::Removed => info!("{} was unlocked", escape_log(location.as_str())),
        }
        Ok(outcome)
    }

    /// Add a location to the live bus network, or remove it.
    pub fn toggle_bus_destination(
        &self,
        location: &LocationId,
    ) -> Result<ToggleOutcome, WorldError> {
        let outcome = self.commit(|doc| Ok(toggles::toggle_bus_destination(doc, location)))?;
        match outcome {
            ToggleOutcome::Added => {
                info!("{} added to bus network", escape_log(location.as_str()))
            }
            ToggleOutcome::Removed => {
                info!("{} removed from bus network", escape_log(location.as_str()))
            }
        }
        Ok(outcome)
    }

    /// Swap the live bus network with its saved snapshot.
    pub fn pause_or_resume_bus(&self) -> Result<BusService, WorldError> {
        let service = self.commit(|doc| Ok(toggles::pause_or_resume_bus(doc)))?;
        match service {
            BusService::Disabled => info!("bus disabled"),
            BusService::Enabled => info!("bus enabled"),
        }
        Ok(service)
    }

    /// Assign a private room to `user` and return its derived name.
    pub fn assign_room(&self, user: &UserId) -> Result<LocationId, WorldError> {
        let room = self.commit(|doc| rooms::assign_room(doc, user))?;
        info!(
            "created {} for {}",
            room,
            escape_log(user.as_str())
        );
        Ok(room)
    }

    /// Steps 1-2 of the transaction: lock check, then the mode's listing.
    fn reachable(
        doc: &WorldDocument,
        mode: MoveMode,
        origin: &LocationId,
        category: Option<&CategoryId>,
    ) -> Result<Vec<LocationId>, WorldError> {
        if doc.is_locked(origin) {
            return Err(WorldError::LocationLocked);
        }
        match mode {
            MoveMode::Walk => {
                let Some(category) = category else {
                    warn!(
                        "data integrity: walk from {} without a resolved category",
                        escape_log(origin.as_str())
                    );
                    return Err(WorldError::InvalidCategory(String::from("<unset>")));
                };
                graph::available_destinations(doc, origin, category)
            }
            MoveMode::Bus => {
                if !doc.bus_destinations.contains(origin) {
                    debug!(
                        "bus requested outside the network: {}",
                        escape_log(origin.as_str())
                    );
                    return Err(WorldError::InvalidCategory(origin.to_string()));
                }
                Ok(graph::bus_destinations(doc, origin))
            }
        }
    }

    /// Apply step: stage the cooldown write, persist the staged document,
    /// then commit it to memory and emit the access effects. A failed
    /// persist leaves memory untouched, so no partial application is ever
    /// observable by a later request.
    fn apply(
        &self,
        doc: &mut WorldDocument,
        user: &UserId,
        mode: MoveMode,
        origin: &LocationId,
        destination: LocationId,
        now: DateTime<Utc>,
    ) -> Result<MoveReceipt, WorldError> {
        let mut staged = doc.clone();
        cooldown::record(&mut staged, mode, user, now);
        self.store.save(&staged)?;
        *doc = staged;

        self.access.grant(user, &destination);
        self.access.revoke(user, origin);
        info!(
            "{} moved to {} ({})",
            escape_log(user.as_str()),
            escape_log(destination.as_str()),
            mode
        );

        Ok(MoveReceipt {
            user: user.clone(),
            mode,
            origin: origin.clone(),
            destination,
            moved_at: now,
        })
    }

    /// Shared stage-persist-commit path for the toggle and registry
    /// operations.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut WorldDocument) -> Result<T, WorldError>,
    ) -> Result<T, WorldError> {
        let mut doc = self.lock_doc();
        let mut staged = doc.clone();
        let out = mutate(&mut staged)?;
        self.store.save(&staged)?;
        *doc = staged;
        Ok(out)
    }
}
