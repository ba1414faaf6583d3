//! Arena Shooter - a 2D side-scrolling platform shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, actors, rounds)
//! - `view`: Per-frame snapshot handed to the presentation layer
//! - `platform`: Input source / presenter collaborators
//! - `runner`: Fixed-timestep loop driving the simulation
//! - `settings`: Data-driven tuning and launch options
//! - `highscores`: Top 10 leaderboard
//! - `persistence`: JSON save/load for settings, scores and replays

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod view;

pub use highscores::HighScores;
pub use persistence::{PersistError, Result};
pub use settings::{Settings, Tuning};

/// Game configuration constants
///
/// Units are pixels and frames (one frame = one tick at 60 Hz). Screen
/// coordinates: +x to the right, +y downward.
pub mod consts {
    use glam::Vec2;

    /// Target simulation rate
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Fixed simulation timestep in milliseconds (drives animation clocks)
    pub const FRAME_MS: f32 = 1000.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    /// Physics
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = -0.12;
    pub const MAX_FALL_SPEED: f32 = 8.0;
    pub const JUMP_IMPULSE: f32 = -19.0;
    /// Base horizontal acceleration; behaviors apply a biased fraction of it
    pub const ACC: f32 = 1.0;
    pub const PLAYER_ACCEL: f32 = ACC - 0.4;
    pub const ENEMY_ACCEL: f32 = ACC - 0.8;

    /// Actor defaults
    pub const PLAYER_MAX_HEALTH: u32 = 5;
    pub const ENEMY_MAX_HEALTH: u32 = 2;
    pub const PLAYER_SHOOT_COOLDOWN: u32 = 20;
    pub const ENEMY_SHOOT_COOLDOWN: u32 = 80;
    pub const PLAYER_SIZE: Vec2 = Vec2::new(60.0, 90.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(60.0, 90.0);

    /// Animation (milliseconds per frame)
    pub const PLAYER_ANIMATION_MS: f32 = 100.0;
    pub const ENEMY_ANIMATION_MS: f32 = 150.0;

    /// Enemy patrol cycle
    pub const PATROL_PERIOD: u32 = 800;
    pub const PATROL_JUMP_EVERY: u32 = 100;

    /// Bullets
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_SIZE: Vec2 = Vec2::new(20.0, 8.0);
    /// Muzzle offset from actor center, as fractions of actor width/height
    pub const MUZZLE_FORWARD: f32 = 0.7;
    pub const MUZZLE_RISE: f32 = 1.0 / 4.5;

    /// Rounds
    pub const ENEMY_BATCH_MIN: u32 = 3;
    pub const ENEMY_BATCH_MAX: u32 = 6;
    pub const KILL_REWARD: u64 = 50;
}
