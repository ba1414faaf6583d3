//! Bullets
//!
//! `Active -> Consumed` on the first hit, `Active -> Expired` once fully off
//! screen. Both are terminal and the bullet is dropped the same frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{ActorKind, Facing};
use super::geom::Rect;
use crate::consts::BULLET_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletState {
    Active,
    /// Applied its one damage event
    Consumed,
    /// Left the screen without hitting anything
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Top-left corner of the bullet's rect
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// px per frame
    pub speed: f32,
    pub owner: ActorKind,
    pub state: BulletState,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2, facing: Facing, owner: ActorKind, speed: f32) -> Self {
        Self {
            id,
            pos,
            size: BULLET_SIZE,
            facing,
            speed,
            owner,
            state: BulletState::Active,
        }
    }

    /// A bullet centered on `muzzle`
    pub fn fired_from(id: u32, muzzle: Vec2, facing: Facing, owner: ActorKind, speed: f32) -> Self {
        Self::new(id, muzzle - BULLET_SIZE * 0.5, facing, owner, speed)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == BulletState::Active
    }

    /// Hostile to every kind except its owner's
    #[inline]
    pub fn threatens(&self, kind: ActorKind) -> bool {
        kind != self.owner
    }

    pub fn advance(&mut self) {
        self.pos.x += self.facing.sign() * self.speed;
    }

    /// Fully outside the horizontal bounds
    pub fn is_off_screen(&self, width: f32) -> bool {
        let rect = self.rect();
        rect.left() > width || rect.right() < 0.0
    }
}
