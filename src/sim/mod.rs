//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod actor;
pub mod body;
pub mod bullet;
pub mod collision;
pub mod geom;
pub mod platform;
pub mod policy;
pub mod state;
pub mod tick;

pub use actor::{Action, Actor, ActorKind, Animation, Facing};
pub use body::{IntegrationParams, KinematicBody};
pub use bullet::{Bullet, BulletState};
pub use collision::{Hit, resolve_bullet_hit, resolve_ground_contact};
pub use geom::Rect;
pub use platform::{Platform, arena_platforms};
pub use policy::{Behavior, ControlPolicy, Intent, PatrolPolicy, PlayerPolicy, Senses};
pub use state::{GameEvent, GamePhase, GameState, RngState};
pub use tick::{TickInput, start_next_round, tick};
