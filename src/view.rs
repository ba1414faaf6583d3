//! Per-frame view of the session for the presentation layer
//!
//! The simulation knows nothing about images, fonts or surfaces. Each frame
//! it hands over a list of sprites (position, animation frame, flip) and
//! the HUD numbers; whatever draws them lives behind `platform::Presenter`.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Action, ActorKind, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    Platform,
    Player,
    Enemy,
    Bullet,
}

/// One draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    /// Top-left corner in screen space
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation sequence and frame (None for static sprites)
    pub frame: Option<(Action, usize)>,
    pub flip_x: bool,
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub round: u32,
    pub health: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub tick: u64,
    pub sprites: Vec<SpriteView>,
    pub hud: Hud,
    /// Show the "Game Over" banner
    pub game_over: bool,
}

impl FrameView {
    /// Snapshot the drawable state; dead actors are not drawn
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::with_capacity(
            state.platforms.len() + state.enemies.len() + state.bullets.len() + 1,
        );

        for platform in &state.platforms {
            sprites.push(SpriteView {
                kind: SpriteKind::Platform,
                pos: platform.rect.min,
                size: platform.rect.size,
                frame: None,
                flip_x: false,
            });
        }

        let actors = std::iter::once(&state.player).chain(&state.enemies);
        for actor in actors.filter(|a| a.alive) {
            let rect = actor.rect();
            sprites.push(SpriteView {
                kind: match actor.kind {
                    ActorKind::Player => SpriteKind::Player,
                    ActorKind::Enemy => SpriteKind::Enemy,
                },
                pos: rect.min,
                size: rect.size,
                frame: Some((actor.animation.action, actor.animation.frame_index)),
                flip_x: actor.flip_x(),
            });
        }

        for bullet in &state.bullets {
            sprites.push(SpriteView {
                kind: SpriteKind::Bullet,
                pos: bullet.pos,
                size: bullet.size,
                frame: None,
                flip_x: bullet.facing == crate::sim::Facing::Left,
            });
        }

        Self {
            tick: state.time_ticks,
            sprites,
            hud: Hud {
                score: state.score,
                round: state.round,
                health: state.player.health,
            },
            game_over: state.is_game_over(),
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
