//! Control policies: what an actor wants to do this frame
//!
//! The player reads sampled input; enemies run a timer-driven patrol with
//! no sensing of the player. Both produce an `Intent` that the tick feeds
//! into the shared integrate/collide/animate pipeline.

use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::settings::Tuning;

/// Facts about the actor a policy may consult
#[derive(Debug, Clone, Copy)]
pub struct Senses {
    pub grounded: bool,
    pub ready_to_fire: bool,
}

/// A policy's decisions for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Horizontal acceleration before drag (px/frame²)
    pub accel_x: f32,
    pub jump: bool,
    pub shoot: bool,
}

pub trait ControlPolicy {
    fn decide_acceleration(&self, input: &TickInput, tuning: &Tuning) -> f32;
    fn decide_jump(&self, senses: &Senses, input: &TickInput, tuning: &Tuning) -> bool;
    fn decide_shoot(&self, senses: &Senses, input: &TickInput) -> bool;

    /// Advance internal timers once the frame's decisions are made
    fn advance(&mut self, _tuning: &Tuning) {}

    fn decide(&mut self, senses: &Senses, input: &TickInput, tuning: &Tuning) -> Intent {
        let intent = Intent {
            accel_x: self.decide_acceleration(input, tuning),
            jump: self.decide_jump(senses, input, tuning),
            shoot: self.decide_shoot(senses, input),
        };
        self.advance(tuning);
        intent
    }
}

/// Input-driven control
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPolicy;

impl ControlPolicy for PlayerPolicy {
    fn decide_acceleration(&self, input: &TickInput, tuning: &Tuning) -> f32 {
        match (input.left, input.right) {
            (true, false) => -tuning.player_accel,
            (false, true) => tuning.player_accel,
            _ => 0.0,
        }
    }

    /// Edge-triggered, only from a platform
    fn decide_jump(&self, senses: &Senses, input: &TickInput, _tuning: &Tuning) -> bool {
        input.jump && senses.grounded
    }

    /// Level-triggered while fire is held
    fn decide_shoot(&self, senses: &Senses, input: &TickInput) -> bool {
        input.fire && senses.ready_to_fire
    }
}

/// Oscillating patrol with periodic hops and autonomous fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PatrolPolicy {
    /// Position in the patrol cycle, in frames
    pub walk_cooldown: u32,
}

impl PatrolPolicy {
    pub fn new(walk_phase: u32) -> Self {
        Self {
            walk_cooldown: walk_phase,
        }
    }
}

impl ControlPolicy for PatrolPolicy {
    /// Right for the first half of the cycle, left for the rest
    fn decide_acceleration(&self, _input: &TickInput, tuning: &Tuning) -> f32 {
        let phase = self.walk_cooldown % tuning.patrol_period;
        if phase < tuning.patrol_period / 2 {
            tuning.enemy_accel
        } else {
            -tuning.enemy_accel
        }
    }

    fn decide_jump(&self, senses: &Senses, _input: &TickInput, tuning: &Tuning) -> bool {
        senses.grounded && self.walk_cooldown % tuning.patrol_jump_every == 0
    }

    fn decide_shoot(&self, senses: &Senses, _input: &TickInput) -> bool {
        senses.ready_to_fire
    }

    fn advance(&mut self, tuning: &Tuning) {
        self.walk_cooldown = (self.walk_cooldown + 1) % tuning.patrol_period;
    }
}

/// The policy an actor carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Player(PlayerPolicy),
    Patrol(PatrolPolicy),
}

impl ControlPolicy for Behavior {
    fn decide_acceleration(&self, input: &TickInput, tuning: &Tuning) -> f32 {
        match self {
            Behavior::Player(p) => p.decide_acceleration(input, tuning),
            Behavior::Patrol(p) => p.decide_acceleration(input, tuning),
        }
    }

    fn decide_jump(&self, senses: &Senses, input: &TickInput, tuning: &Tuning) -> bool {
        match self {
            Behavior::Player(p) => p.decide_jump(senses, input, tuning),
            Behavior::Patrol(p) => p.decide_jump(senses, input, tuning),
        }
    }

    fn decide_shoot(&self, senses: &Senses, input: &TickInput) -> bool {
        match self {
            Behavior::Player(p) => p.decide_shoot(senses, input),
            Behavior::Patrol(p) => p.decide_shoot(senses, input),
        }
    }

    fn advance(&mut self, tuning: &Tuning) {
        match self {
            Behavior::Player(p) => p.advance(tuning),
            Behavior::Patrol(p) => p.advance(tuning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUNDED: Senses = Senses {
        grounded: true,
        ready_to_fire: true,
    };
    const AIRBORNE: Senses = Senses {
        grounded: false,
        ready_to_fire: false,
    };

    #[test]
    fn test_player_movement() {
        let t = Tuning::default();
        let p = PlayerPolicy;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };

        assert_eq!(p.decide_acceleration(&left, &t), -t.player_accel);
        assert_eq!(p.decide_acceleration(&right, &t), t.player_accel);
        assert_eq!(p.decide_acceleration(&both, &t), 0.0);
        assert_eq!(p.decide_acceleration(&TickInput::default(), &t), 0.0);
    }

    #[test]
    fn test_player_jump_needs_ground() {
        let t = Tuning::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert!(PlayerPolicy.decide_jump(&GROUNDED, &jump, &t));
        assert!(!PlayerPolicy.decide_jump(&AIRBORNE, &jump, &t));
        assert!(!PlayerPolicy.decide_jump(&GROUNDED, &TickInput::default(), &t));
    }

    #[test]
    fn test_player_fire_needs_cooldown() {
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        assert!(PlayerPolicy.decide_shoot(&GROUNDED, &fire));
        assert!(!PlayerPolicy.decide_shoot(&AIRBORNE, &fire));
        assert!(!PlayerPolicy.decide_shoot(&GROUNDED, &TickInput::default()));
    }

    #[test]
    fn test_patrol_oscillates() {
        let t = Tuning::default();
        let mut patrol = PatrolPolicy::new(0);
        let input = TickInput::default();

        let mut rightward = 0;
        let mut leftward = 0;
        for _ in 0..t.patrol_period {
            let intent = patrol.decide(&AIRBORNE, &input, &t);
            if intent.accel_x > 0.0 {
                rightward += 1;
            } else {
                leftward += 1;
            }
        }
        assert_eq!(rightward, t.patrol_period / 2);
        assert_eq!(leftward, t.patrol_period / 2);
        // Wrapped back to the start of the cycle
        assert_eq!(patrol.walk_cooldown, 0);
    }

    #[test]
    fn test_patrol_jumps_on_phase() {
        let t = Tuning::default();
        let input = TickInput::default();

        assert!(PatrolPolicy::new(200).decide_jump(&GROUNDED, &input, &t));
        assert!(!PatrolPolicy::new(201).decide_jump(&GROUNDED, &input, &t));
        assert!(!PatrolPolicy::new(200).decide_jump(&AIRBORNE, &input, &t));
    }

    #[test]
    fn test_patrol_ignores_input() {
        let t = Tuning::default();
        let patrol = PatrolPolicy::new(10);
        let mashing = TickInput {
            left: true,
            fire: true,
            jump: true,
            ..Default::default()
        };
        assert!(patrol.decide_acceleration(&mashing, &t) > 0.0);
        assert!(!patrol.decide_shoot(&AIRBORNE, &mashing));
        assert!(patrol.decide_shoot(&GROUNDED, &TickInput::default()));
    }
}
