//! Collision detection and response
//!
//! Two kinds of contact matter: actors landing on platforms, and bullets
//! striking actors of the opposing side.

use super::actor::{Actor, ActorKind};
use super::bullet::{Bullet, BulletState};
use super::platform::Platform;

/// Resolve an actor against the platform set after integration
///
/// Only a falling actor (`vel.y > 0`) can land; actors pass freely up
/// through platform undersides. The first overlapping platform in iteration
/// order is the candidate. The actor rests on it when the platform's top edge
/// lies below the actor's top edge, i.e. the actor is coming down onto the
/// surface rather than dropping through it head first.
///
/// Returns whether the actor is grounded afterwards.
pub fn resolve_ground_contact(actor: &mut Actor, platforms: &[Platform]) -> bool {
    if actor.body.vel.y <= 0.0 {
        return actor.grounded();
    }

    actor.jumping = true;
    let rect = actor.rect();
    let Some(platform) = platforms.iter().find(|p| p.rect.overlaps(&rect)) else {
        return false;
    };

    if platform.top() > rect.top() {
        actor.body.pos.y = platform.top();
        actor.body.vel.y = 0.0;
        actor.jumping = false;
        return true;
    }
    false
}

/// A damage event produced by a bullet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target_id: u32,
    pub target_kind: ActorKind,
    /// Target health after the hit
    pub health: u32,
    /// This hit took the target from alive to dead
    pub killed: bool,
}

/// Apply at most one hit from `bullet` to the first hostile, living target
/// it overlaps, consuming the bullet
pub fn resolve_bullet_hit<'a>(
    bullet: &mut Bullet,
    targets: impl IntoIterator<Item = &'a mut Actor>,
) -> Option<Hit> {
    if !bullet.is_active() {
        return None;
    }

    let rect = bullet.rect();
    for target in targets {
        if !target.alive || !bullet.threatens(target.kind) {
            continue;
        }
        if rect.overlaps(&target.rect()) {
            let killed = target.take_damage(1);
            bullet.state = BulletState::Consumed;
            return Some(Hit {
                target_id: target.id,
                target_kind: target.kind,
                health: target.health,
                killed,
            });
        }
    }
    None
}
