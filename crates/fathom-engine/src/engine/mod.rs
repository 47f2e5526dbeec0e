//! Match state and its per-turn refresh.
//!
//! - [`GameState`] - registry plus both players, refreshed from a [`TurnSnapshot`]
//! - [`Registry`] - id-ordered drone/fish/monster records
//! - [`PlayerState`] - score, delivered scans and owned drones
//! - [`DroneAction`] - the command emitted for a drone
//!
//! # Turn Flow
//!
//! 1. Build [`GameState`] once from the roster ([`GameState::from_roster`])
//! 2. Every turn, ingest the snapshot ([`GameState::apply_snapshot`]); per-turn fields are
//!    replaced, delivered scans are merged and drone memory is preserved
//! 3. A strategy reads the state and emits one [`DroneAction`] per owned drone
//!
//! # Example
//!
//! ```
//! use fathom_engine::{EntityId, GameState, RosterEntry};
//!
//! let roster = [
//!     RosterEntry { id: EntityId(4), color: 0, fish_type: 0 },
//!     RosterEntry { id: EntityId(5), color: -1, fish_type: -1 },
//! ];
//! let state = GameState::from_roster(&roster).unwrap();
//! assert_eq!(state.registry().fish().count(), 1);
//! assert_eq!(state.registry().monsters().count(), 1);
//! ```

pub use self::{action::*, game_state::*, player::*, registry::*, snapshot::*};

mod action;
mod game_state;
mod player;
mod registry;
mod snapshot;
