//! Game model for the drone scanning bot: geometry, creature and drone records, the entity
//! registry, and ingestion of the per-turn snapshot.
//!
//! Decision making lives in `fathom-evaluator`; this crate only keeps the world up to date
//! and rejects snapshots that cannot be acted on.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A snapshot that violates the protocol's declared bounds or the identity invariants.
///
/// These are fatal: the state cannot be trusted for the rest of the match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SnapshotError {
    #[display("roster has {count} creatures, at most {max} allowed")]
    CreatureCount { count: usize, max: usize },
    #[display("roster has {count} {kind} entries, at most {max} allowed")]
    KindCount {
        kind: EntityKind,
        count: usize,
        max: usize,
    },
    #[display("creature {id} has invalid color/type ({color}, {fish_type})")]
    InvalidCreatureKind {
        id: EntityId,
        color: i32,
        fish_type: i32,
    },
    #[display("{side} scan count {count} exceeds {max}")]
    ScanCount { side: Side, count: usize, max: usize },
    #[display("{side} drone count {count} outside 1..={max}")]
    DroneCount { side: Side, count: usize, max: usize },
    #[display("visible creature count {count} exceeds {max}")]
    VisibleCount { count: usize, max: usize },
    #[display("radar blip count {count} exceeds {max}")]
    BlipCount { count: usize, max: usize },
    #[display("drone scan count {count} exceeds {max}")]
    DroneScanCount { count: usize, max: usize },
    #[display("entity {id} at {position} is outside the map")]
    OffMap { id: EntityId, position: Vec2 },
    #[display("drone {drone_id} reports the scan of {creature_id} twice")]
    DuplicateScan {
        drone_id: EntityId,
        creature_id: EntityId,
    },
    #[display("drone {drone_id} reports two blips for {creature_id}")]
    DuplicateBlip {
        drone_id: EntityId,
        creature_id: EntityId,
    },
    #[display("drone {drone_id} holds more scans than there are fish")]
    HeldScanOverflow {
        #[error(not(source))]
        drone_id: EntityId,
    },
    #[display("drone {drone_id} reported more blips than there are creatures")]
    BlipOverflow {
        #[error(not(source))]
        drone_id: EntityId,
    },
    #[display("unknown entity {id}")]
    UnknownEntity {
        #[error(not(source))]
        id: EntityId,
    },
    #[display("entity {id} is not a drone")]
    NotADrone {
        #[error(not(source))]
        id: EntityId,
    },
    #[display("entity {id} is not a fish")]
    NotAFish {
        #[error(not(source))]
        id: EntityId,
    },
    #[display("entity {id} is not a creature")]
    NotACreature {
        #[error(not(source))]
        id: EntityId,
    },
    #[display("radar blip reported by drone {drone_id} which I do not own")]
    ForeignBlip {
        #[error(not(source))]
        drone_id: EntityId,
    },
    #[display("{_0}")]
    #[from]
    Registry(RegistryError),
}
