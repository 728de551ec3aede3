//! # Concierge - Location & Movement Engine for Role-Play Worlds
//!
//! Concierge models a text-based role-play world where participants move
//! between locations (chat channels) along a travel graph, subject to
//! visibility permissions, movement cooldowns, and game-master overrides.
//!
//! ## Features
//!
//! - **Travel Graph**: Category-based adjacency with special rules for
//!   private quarters and self-adjacent terrain.
//! - **Cooldown Ledger**: Per-mode, per-user wait windows (walk and bus).
//! - **Toggles**: Hide/reveal locations, lock movement, and manage the
//!   long-distance bus network including a full pause/resume swap.
//! - **Room Registry**: One private room per player with derived numbering.
//! - **Atomic Transactions**: Every move validates, persists, and applies
//!   access changes as one unit; a failed persist leaves no partial state.
//! - **Whole-Document Persistence**: One versioned JSON snapshot, rewritten
//!   in full behind an exclusive file lock.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use concierge::config::Config;
//! use concierge::world::{MoveRequest, WorldEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("concierge.toml").await?;
//!     let engine = WorldEngine::open(&config)?;
//!
//!     let request = MoveRequest::walk(
//!         "ada".into(),
//!         "lobby".into(),
//!         "Hotel Eclipse".into(),
//!     )
//!     .to("bar".into());
//!     let result = engine.move_user(&request)?;
//!     println!("{result:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`world`] - The engine: travel graph, cooldowns, toggles, rooms, and
//!   the movement transaction over the persisted world document
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Identifier validation at the boundary
//! - [`logutil`] - Log sanitation helpers
//!
//! ## Architecture
//!
//! The chat transport, command parsing, and channel permission system are
//! external collaborators. They hand the engine resolved identifiers and a
//! pre-checked game-master flag, and apply the access effects it emits:
//!
//! ```text
//! ┌──────────────────┐
//! │  Chat Transport  │ ← external collaborator (CLI stand-in in main.rs)
//! └──────────────────┘
//!          │
//! ┌──────────────────┐
//! │  WorldEngine     │ ← movement transactions, toggles, room registry
//! └──────────────────┘
//!          │
//! ┌──────────────────┐
//! │  WorldStore      │ ← whole-document JSON persistence
//! └──────────────────┘
//! ```

pub mod config;
pub mod logutil;
pub mod validation;
pub mod world;
