//! Game settings and tuning
//!
//! Loaded from an optional JSON file at launch; every gameplay constant
//! can be overridden here without touching the simulation code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence;

/// Data-driven physics and gameplay balance
///
/// A session is fully described by its seed, its tuning and its input
/// sequence, so this travels inside `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Physics ===
    /// Downward acceleration injected every frame (px/frame²)
    pub gravity: f32,
    /// Horizontal drag coefficient (negative)
    pub friction: f32,
    /// Terminal downward velocity (px/frame)
    pub max_fall_speed: f32,
    /// Vertical velocity set on jump (negative = up)
    pub jump_impulse: f32,
    pub player_accel: f32,
    pub enemy_accel: f32,

    // === Combat ===
    pub bullet_speed: f32,
    pub player_shoot_cooldown: u32,
    pub enemy_shoot_cooldown: u32,
    pub player_max_health: u32,
    pub enemy_max_health: u32,

    // === Enemy AI ===
    pub patrol_period: u32,
    pub patrol_jump_every: u32,

    // === Rounds ===
    pub enemy_batch_min: u32,
    pub enemy_batch_max: u32,
    pub kill_reward: u64,

    // === Animation ===
    pub player_animation_ms: f32,
    pub enemy_animation_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            gravity: GRAVITY,
            friction: FRICTION,
            max_fall_speed: MAX_FALL_SPEED,
            jump_impulse: JUMP_IMPULSE,
            player_accel: PLAYER_ACCEL,
            enemy_accel: ENEMY_ACCEL,

            bullet_speed: BULLET_SPEED,
            player_shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            enemy_shoot_cooldown: ENEMY_SHOOT_COOLDOWN,
            player_max_health: PLAYER_MAX_HEALTH,
            enemy_max_health: ENEMY_MAX_HEALTH,

            patrol_period: PATROL_PERIOD,
            patrol_jump_every: PATROL_JUMP_EVERY,

            enemy_batch_min: ENEMY_BATCH_MIN,
            enemy_batch_max: ENEMY_BATCH_MAX,
            kill_reward: KILL_REWARD,

            player_animation_ms: PLAYER_ANIMATION_MS,
            enemy_animation_ms: ENEMY_ANIMATION_MS,
        }
    }
}

impl Tuning {
    /// Clamp values that would break the simulation back into range
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        if !self.screen_width.is_finite() || self.screen_width <= 0.0 {
            log::warn!("screen width {} invalid, using {}", self.screen_width, defaults.screen_width);
            self.screen_width = defaults.screen_width;
        }
        if !self.screen_height.is_finite() || self.screen_height <= 0.0 {
            log::warn!("screen height {} invalid, using {}", self.screen_height, defaults.screen_height);
            self.screen_height = defaults.screen_height;
        }
        // Friction must decay velocity, never amplify or overshoot it
        if !(-1.0..=0.0).contains(&self.friction) {
            log::warn!("friction {} out of range, using {}", self.friction, defaults.friction);
            self.friction = defaults.friction;
        }
        self.gravity = finite_or(self.gravity, defaults.gravity);
        self.max_fall_speed = finite_or(self.max_fall_speed, defaults.max_fall_speed);
        self.jump_impulse = finite_or(self.jump_impulse, defaults.jump_impulse);
        self.player_accel = finite_or(self.player_accel, defaults.player_accel);
        self.enemy_accel = finite_or(self.enemy_accel, defaults.enemy_accel);
        self.bullet_speed = finite_or(self.bullet_speed, defaults.bullet_speed);
        self.player_animation_ms = finite_or(self.player_animation_ms, defaults.player_animation_ms);
        self.enemy_animation_ms = finite_or(self.enemy_animation_ms, defaults.enemy_animation_ms);

        self.gravity = self.gravity.max(0.0);
        self.max_fall_speed = self.max_fall_speed.max(0.0);
        self.bullet_speed = self.bullet_speed.max(0.0);
        self.player_max_health = self.player_max_health.max(1);
        self.enemy_max_health = self.enemy_max_health.max(1);
        self.patrol_period = self.patrol_period.max(2);
        self.patrol_jump_every = self.patrol_jump_every.max(1);
        self.enemy_batch_min = self.enemy_batch_min.max(1);
        if self.enemy_batch_max < self.enemy_batch_min {
            self.enemy_batch_max = self.enemy_batch_min;
        }
        self.player_animation_ms = self.player_animation_ms.max(1.0);
        self.enemy_animation_ms = self.enemy_animation_ms.max(1.0);
        self
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Launch options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (None = derive from clock)
    pub seed: Option<u64>,
    /// Gate the loop to 60 Hz wall clock
    pub realtime: bool,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Where the leaderboard lives (None = don't persist)
    pub highscores_path: Option<String>,
    pub tuning: Tuning,
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match persistence::read_json::<Settings>(path) {
            Ok(mut settings) => {
                settings.tuning = settings.tuning.validate();
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        persistence::write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
