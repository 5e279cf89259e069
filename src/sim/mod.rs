//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per nominal 60 Hz frame)
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each entity list)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod lanes;
pub mod lasso;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Rect, aabb_overlap};
pub use entity::{Animation, CattleClass, Entity, EntityKind};
pub use lanes::{Lane, LaneAllocator};
pub use lasso::{RopeSegment, rope_tip, segment_intersects_rect};
pub use player::{Player, RopeState, Touch};
pub use spawner::{
    SpawnContext, SpawnPlan, SpawnerState, cattle_spawn_rate, fast_chance, fastest_chance,
    pick_cattle_class, plan_spawns,
};
pub use state::{EntityView, GameEvent, GamePhase, GameState, PlayerView, Snapshot};
pub use tick::{InputEvent, Key, TickInput, TickStatus, tick};
