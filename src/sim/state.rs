//! Session state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; nothing is
//! captured ambiently.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::bullet::Bullet;
use super::platform::{Platform, arena_platforms};
use crate::settings::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player alive, rounds progressing
    Playing,
    /// Player dead; enemies keep patrolling, no new rounds
    GameOver,
}

/// Observable things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted { round: u32, enemies: u32 },
    BulletFired { bullet_id: u32, owner: ActorKind },
    ActorHit { target_id: u32, kind: ActorKind, health: u32 },
    /// `reward` is 0 when the player was already dead
    EnemyKilled { enemy_id: u32, reward: u64 },
    PlayerKilled,
}

/// RNG state wrapper for serialization
///
/// Each draw site takes a fresh PCG stream so the sequence depends only on
/// the seed and how many rounds have been generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    /// Current round (1-based once the session starts)
    pub round: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Static arena, first entry is the ground
    pub platforms: Vec<Platform>,
    pub player: Actor,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Actor>,
    /// Live bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session and spawn the first round
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validate();
        let platforms = arena_platforms(tuning.screen_width, tuning.screen_height);
        let ground_top = platforms[0].top();
        let spawn = Vec2::new(tuning.screen_width / 2.0, ground_top);

        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            round: 0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            platforms,
            player: Actor::player(0, spawn, &tuning),
            enemies: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::tick::start_next_round(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}
