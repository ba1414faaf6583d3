//! Kinematic body and per-frame integration
//!
//! Every movable actor owns one of these. Acceleration is recomputed by the
//! actor's behavior each frame; nothing here persists gravity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position / velocity / acceleration in px and px-per-frame units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Midbottom anchor of the owning actor
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
}

/// Bounds shared by every integration step
#[derive(Debug, Clone, Copy)]
pub struct IntegrationParams {
    /// Horizontal drag coefficient (negative)
    pub friction: f32,
    /// Terminal downward velocity
    pub max_fall_speed: f32,
    /// Horizontal wrap bound (x wraps to 0 past this, and back)
    pub wrap_width: f32,
}

impl KinematicBody {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// Advance one frame under `applied` acceleration (gravity included)
    ///
    /// Semi-implicit Euler with a drag term on x, a terminal fall speed and
    /// horizontal screen wrap.
    pub fn integrate(&mut self, applied: Vec2, params: &IntegrationParams) {
        self.acc = applied;
        self.acc.x += self.vel.x * params.friction;
        self.vel += self.acc;
        self.pos += self.vel + 0.5 * self.acc;

        if self.vel.y > params.max_fall_speed {
            self.vel.y = params.max_fall_speed;
        }

        // Screen wrap (left to right and vice versa)
        if self.pos.x > params.wrap_width {
            self.pos.x = 0.0;
        } else if self.pos.x < 0.0 {
            self.pos.x = params.wrap_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn params() -> IntegrationParams {
        IntegrationParams {
            friction: FRICTION,
            max_fall_speed: MAX_FALL_SPEED,
            wrap_width: SCREEN_WIDTH,
        }
    }

    #[test]
    fn test_single_step() {
        let mut body = KinematicBody::at(Vec2::new(100.0, 100.0));
        body.vel = Vec2::new(10.0, 0.0);

        body.integrate(Vec2::new(0.0, GRAVITY), &params());

        // acc.x = 10 * -0.12 = -1.2, vel.x = 8.8, pos.x += 8.8 - 0.6
        assert!((body.acc.x + 1.2).abs() < 1e-5);
        assert!((body.vel.x - 8.8).abs() < 1e-5);
        assert!((body.pos.x - 108.2).abs() < 1e-4);
        // vel.y = 0.5, pos.y += 0.5 + 0.25
        assert_eq!(body.vel.y, 0.5);
        assert_eq!(body.pos.y, 100.75);
    }

    #[test]
    fn test_fall_speed_clamped() {
        let mut body = KinematicBody::at(Vec2::new(100.0, 0.0));
        for _ in 0..100 {
            body.integrate(Vec2::new(0.0, GRAVITY), &params());
            assert!(body.vel.y <= MAX_FALL_SPEED);
        }
        assert_eq!(body.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_upward_velocity_not_clamped() {
        let mut body = KinematicBody::at(Vec2::new(100.0, 500.0));
        body.vel.y = JUMP_IMPULSE;
        body.integrate(Vec2::new(0.0, GRAVITY), &params());
        assert_eq!(body.vel.y, JUMP_IMPULSE + GRAVITY);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let mut body = KinematicBody::at(Vec2::new(SCREEN_WIDTH - 1.0, 100.0));
        body.vel.x = 5.0;
        body.integrate(Vec2::ZERO, &params());
        assert_eq!(body.pos.x, 0.0);
    }

    #[test]
    fn test_wrap_left_to_right() {
        let mut body = KinematicBody::at(Vec2::new(1.0, 100.0));
        body.vel.x = -5.0;
        body.integrate(Vec2::ZERO, &params());
        assert_eq!(body.pos.x, SCREEN_WIDTH);
    }

    proptest! {
        #[test]
        fn prop_integration_is_deterministic(
            x in 0.0f32..SCREEN_WIDTH,
            y in 0.0f32..SCREEN_HEIGHT,
            accels in prop::collection::vec((-1.0f32..1.0, 0.0f32..1.0), 1..64),
        ) {
            let mut a = KinematicBody::at(Vec2::new(x, y));
            let mut b = a;
            for (ax, ay) in accels {
                a.integrate(Vec2::new(ax, ay), &params());
                b.integrate(Vec2::new(ax, ay), &params());
                prop_assert_eq!(a.pos.x.to_bits(), b.pos.x.to_bits());
                prop_assert_eq!(a.pos.y.to_bits(), b.pos.y.to_bits());
                prop_assert_eq!(a.vel.x.to_bits(), b.vel.x.to_bits());
                prop_assert_eq!(a.vel.y.to_bits(), b.vel.y.to_bits());
            }
        }

        #[test]
        fn prop_friction_decays_without_reversal(v0 in prop_oneof![-20.0f32..-0.1, 0.1f32..20.0]) {
            let mut body = KinematicBody::at(Vec2::new(800.0, 100.0));
            body.vel.x = v0;
            let mut prev = v0;
            for _ in 0..200 {
                body.integrate(Vec2::ZERO, &params());
                prop_assert!(body.vel.x.abs() < prev.abs());
                prop_assert_eq!(body.vel.x.signum(), v0.signum());
                prev = body.vel.x;
            }
            prop_assert!(body.vel.x.abs() < 1e-6);
        }
    }
}
