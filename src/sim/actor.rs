//! Actors: the player and enemies
//!
//! Both kinds share one body/collide/animate pipeline; only the control
//! policy differs (see `policy`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::geom::Rect;
use super::policy::{Behavior, PatrolPolicy, PlayerPolicy};
use crate::consts::*;
use crate::settings::Tuning;

/// Which side an actor (or bullet) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Animation-relevant behavior classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Walking,
    Jumping,
}

impl Action {
    /// Number of frames in this action's sequence for the given actor kind
    pub fn frame_count(self, _kind: ActorKind) -> usize {
        match self {
            Action::Idle => 1,
            Action::Walking => 6,
            Action::Jumping => 1,
        }
    }
}

/// Looping frame sampler driven by an elapsed-time clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animation {
    pub action: Action,
    pub frame_index: usize,
    /// Milliseconds since the last frame advance
    pub elapsed_ms: f32,
}

impl Animation {
    /// Switch sequences; restarting only if the action actually changed
    pub fn set_action(&mut self, action: Action) {
        if action != self.action {
            self.action = action;
            self.frame_index = 0;
            self.elapsed_ms = 0.0;
        }
    }

    pub fn advance(&mut self, dt_ms: f32, interval_ms: f32, frame_count: usize) {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > interval_ms {
            self.elapsed_ms = 0.0;
            self.frame_index += 1;
        }
        if self.frame_index >= frame_count {
            self.frame_index = 0;
        }
    }
}

/// A player or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub kind: ActorKind,
    pub body: KinematicBody,
    pub size: Vec2,
    pub health: u32,
    pub alive: bool,
    pub facing: Facing,
    /// Airborne: not resting on a platform
    pub jumping: bool,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Horizontal acceleration the policy asked for this frame (before drag)
    pub move_intent: f32,
    pub animation: Animation,
    pub behavior: Behavior,
}

impl Actor {
    /// The player, standing at `pos` (midbottom)
    pub fn player(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: ActorKind::Player,
            body: KinematicBody::at(pos),
            size: PLAYER_SIZE,
            health: tuning.player_max_health,
            alive: true,
            facing: Facing::Left,
            jumping: false,
            shoot_cooldown: 0,
            move_intent: 0.0,
            animation: Animation::default(),
            behavior: Behavior::Player(PlayerPolicy),
        }
    }

    /// An enemy dropped in at `pos`, starting its patrol at `walk_phase`
    pub fn enemy(id: u32, pos: Vec2, walk_phase: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind: ActorKind::Enemy,
            body: KinematicBody::at(pos),
            size: ENEMY_SIZE,
            health: tuning.enemy_max_health,
            alive: true,
            facing: Facing::Right,
            jumping: true,
            shoot_cooldown: 0,
            move_intent: 0.0,
            animation: Animation::default(),
            behavior: Behavior::Patrol(PatrolPolicy::new(walk_phase)),
        }
    }

    /// Bounding rectangle in screen space
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_midbottom(self.body.pos, self.size)
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        !self.jumping
    }

    /// Sprites are drawn facing left; flip when facing right
    #[inline]
    pub fn flip_x(&self) -> bool {
        self.facing == Facing::Right
    }

    pub fn ready_to_fire(&self) -> bool {
        self.alive && self.shoot_cooldown == 0
    }

    /// Where this actor's bullets appear (center of the bullet)
    pub fn muzzle(&self) -> Vec2 {
        let center = self.rect().center();
        Vec2::new(
            center.x + MUZZLE_FORWARD * self.size.x * self.facing.sign(),
            center.y - self.size.y * MUZZLE_RISE,
        )
    }

    /// Apply damage; returns true only on the call that kills the actor
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            self.body.acc.x = 0.0;
            self.move_intent = 0.0;
            return true;
        }
        false
    }

    /// Airborne wins, then movement, then idle
    pub fn select_action(&self) -> Action {
        if self.jumping {
            Action::Jumping
        } else if self.move_intent != 0.0 {
            Action::Walking
        } else {
            Action::Idle
        }
    }

    /// Per-frame bookkeeping after movement and collisions
    pub fn update_state(&mut self, dt_ms: f32, tuning: &Tuning) {
        if !self.alive {
            return;
        }

        let action = self.select_action();
        self.animation.set_action(action);

        let interval = match self.kind {
            ActorKind::Player => tuning.player_animation_ms,
            ActorKind::Enemy => tuning.enemy_animation_ms,
        };
        self.animation
            .advance(dt_ms, interval, action.frame_count(self.kind));

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Reset the shot timer after firing
    pub fn rearm(&mut self, tuning: &Tuning) {
        self.shoot_cooldown = match self.kind {
            ActorKind::Player => tuning.player_shoot_cooldown,
            ActorKind::Enemy => tuning.enemy_shoot_cooldown,
        };
    }
}
