//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame:
//! behaviors -> integrate -> ground contact -> bullets -> actor state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, Facing};
use super::body::IntegrationParams;
use super::bullet::{Bullet, BulletState};
use super::collision::{Hit, resolve_bullet_hit, resolve_ground_contact};
use super::platform::Platform;
use super::policy::{ControlPolicy, Senses};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::ENEMY_SIZE;
use crate::settings::Tuning;

/// Input sampled once per frame (deterministic, replayable)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump key went down this frame
    pub jump: bool,
    /// Fire (held)
    pub fire: bool,
    /// Confirm key went down this frame
    pub confirm: bool,
    /// Window close / quit signal
    pub quit: bool,
}

/// A shot an actor decided to take this frame
struct ShotRequest {
    muzzle: Vec2,
    facing: Facing,
    owner: ActorKind,
}

/// Advance the game state by one fixed timestep (`dt` in seconds)
///
/// `dt` only feeds animation clocks; physics is per-frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Events raised while building the session surface on the first tick
    if state.time_ticks > 0 {
        state.events.clear();
    }

    // Snapshots carry their own tuning
    state.tuning = state.tuning.validate();

    // New wave once the last one is cleared
    if state.phase == GamePhase::Playing && state.enemies.is_empty() {
        start_next_round(state);
    }

    state.time_ticks += 1;

    let tuning = state.tuning;
    let params = IntegrationParams {
        friction: tuning.friction,
        max_fall_speed: tuning.max_fall_speed,
        wrap_width: tuning.screen_width,
    };

    // Behaviors, integration and ground contact
    let mut shots = Vec::new();
    shots.extend(step_actor(
        &mut state.player,
        input,
        &tuning,
        &params,
        &state.platforms,
    ));
    let no_input = TickInput::default();
    for enemy in &mut state.enemies {
        shots.extend(step_actor(
            enemy,
            &no_input,
            &tuning,
            &params,
            &state.platforms,
        ));
    }

    // Move bullets, expire off-screen ones, apply hits
    // Each hit remembers whether the player was alive when it landed
    let mut hits: Vec<(Hit, bool)> = Vec::new();
    for bullet in &mut state.bullets {
        bullet.advance();
        if bullet.is_off_screen(tuning.screen_width) {
            bullet.state = BulletState::Expired;
            continue;
        }
        let targets = std::iter::once(&mut state.player).chain(state.enemies.iter_mut());
        if let Some(hit) = resolve_bullet_hit(bullet, targets) {
            hits.push((hit, state.player.alive));
        }
    }
    state.bullets.retain(|b| b.is_active());

    for shot in shots {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::fired_from(
            id,
            shot.muzzle,
            shot.facing,
            shot.owner,
            tuning.bullet_speed,
        ));
        state.events.push(GameEvent::BulletFired {
            bullet_id: id,
            owner: shot.owner,
        });
    }

    for (hit, player_alive) in hits {
        apply_hit(state, hit, player_alive);
    }

    // Animation and cooldowns
    let dt_ms = dt * 1000.0;
    state.player.update_state(dt_ms, &tuning);
    for enemy in &mut state.enemies {
        enemy.update_state(dt_ms, &tuning);
    }

    // Dead enemies leave the live set the frame they die
    state.enemies.retain(|e| e.alive);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Decide, move and land one actor; returns the shot it wants to take
fn step_actor(
    actor: &mut Actor,
    input: &TickInput,
    tuning: &Tuning,
    params: &IntegrationParams,
    platforms: &[Platform],
) -> Option<ShotRequest> {
    if !actor.alive {
        return None;
    }

    let senses = Senses {
        grounded: actor.grounded(),
        ready_to_fire: actor.ready_to_fire(),
    };
    let intent = actor.behavior.decide(&senses, input, tuning);

    actor.move_intent = intent.accel_x;
    if intent.accel_x < 0.0 {
        actor.facing = Facing::Left;
    } else if intent.accel_x > 0.0 {
        actor.facing = Facing::Right;
    }

    if intent.jump {
        actor.body.vel.y = tuning.jump_impulse;
        actor.jumping = true;
    }

    actor
        .body
        .integrate(Vec2::new(intent.accel_x, tuning.gravity), params);
    resolve_ground_contact(actor, platforms);

    if intent.shoot {
        actor.rearm(tuning);
        return Some(ShotRequest {
            muzzle: actor.muzzle(),
            facing: actor.facing,
            owner: actor.kind,
        });
    }
    None
}

/// Record a hit and handle the deaths it caused
///
/// `player_alive` is the player's state at the moment the hit landed.
fn apply_hit(state: &mut GameState, hit: Hit, player_alive: bool) {
    state.events.push(GameEvent::ActorHit {
        target_id: hit.target_id,
        kind: hit.target_kind,
        health: hit.health,
    });

    if !hit.killed {
        return;
    }

    match hit.target_kind {
        ActorKind::Enemy => {
            // No score once the player is gone
            let reward = if player_alive {
                state.tuning.kill_reward
            } else {
                0
            };
            state.score += reward;
            state.events.push(GameEvent::EnemyKilled {
                enemy_id: hit.target_id,
                reward,
            });
            log::debug!("Enemy {} down, score {}", hit.target_id, state.score);
        }
        ActorKind::Player => {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlayerKilled);
            log::info!(
                "Game over: round {}, score {}",
                state.round,
                state.score
            );
        }
    }
}

/// Begin the next round: reset player health, drop stale bullets and spawn
/// a fresh batch of enemies at random positions and patrol phases
pub fn start_next_round(state: &mut GameState) {
    let tuning = state.tuning;
    let mut rng = state.rng_state.next_rng();

    state.round += 1;
    if state.player.alive {
        state.player.health = tuning.player_max_health;
    }
    state.bullets.clear();

    let count = rng.random_range(tuning.enemy_batch_min..=tuning.enemy_batch_max);
    let max_y = (tuning.screen_height / 2.0).max(ENEMY_SIZE.y + 1.0);
    for _ in 0..count {
        let pos = Vec2::new(
            rng.random_range(0.0..tuning.screen_width),
            rng.random_range(ENEMY_SIZE.y..max_y),
        );
        let walk_phase = rng.random_range(0..tuning.patrol_period);
        let id = state.next_entity_id();
        state.enemies.push(Actor::enemy(id, pos, walk_phase, &tuning));
    }

    state.events.push(GameEvent::RoundStarted {
        round: state.round,
        enemies: count,
    });
    log::info!("Round {} begins with {} enemies", state.round, count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::actor::Action;
    use proptest::prelude::*;

    /// A session with one enemy parked out of the way that never fires
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.enemies.clear();
        let id = state.next_entity_id();
        let perch = state.platforms[3].top();
        let mut enemy = Actor::enemy(id, Vec2::new(1300.0, perch), 1, &state.tuning);
        enemy.jumping = false;
        enemy.shoot_cooldown = 100_000;
        state.enemies.push(enemy);
        state.events.clear();
        state
    }

    fn enemy_bullet_at(state: &mut GameState, pos: Vec2, speed: f32) {
        let id = state.next_entity_id();
        state
            .bullets
            .push(Bullet::new(id, pos, Facing::Left, ActorKind::Enemy, speed));
    }

    fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_player_rests_on_ground() {
        let mut state = quiet_state();
        let ground = state.platforms[0].top();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.player.body.pos.y, ground);
            assert_eq!(state.player.body.vel.y, 0.0);
            assert!(state.player.grounded());
        }
        assert_eq!(state.player.animation.action, Action::Idle);
    }

    #[test]
    fn test_walk_right() {
        let mut state = quiet_state();
        let x0 = state.player.body.pos.x;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &right, SIM_DT);
        }
        assert!(state.player.body.pos.x > x0);
        assert_eq!(state.player.facing, Facing::Right);
        assert!(state.player.flip_x());
        assert_eq!(state.player.animation.action, Action::Walking);

        // Friction brings the player back to rest once input stops
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.body.vel.x.abs() < 1e-3);
        assert_eq!(state.player.animation.action, Action::Idle);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = quiet_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.body.vel.y, JUMP_IMPULSE + GRAVITY);
        assert!(state.player.jumping);
        assert_eq!(state.player.animation.action, Action::Jumping);

        // Mid-air jump is ignored
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.body.vel.y, JUMP_IMPULSE + 2.0 * GRAVITY);

        // Eventually lands again
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.player.grounded());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        let mut fired = 0;
        for _ in 0..(PLAYER_SHOOT_COOLDOWN * 3) {
            tick(&mut state, &fire, SIM_DT);
            fired += count_events(&state, |e| {
                matches!(
                    e,
                    GameEvent::BulletFired {
                        owner: ActorKind::Player,
                        ..
                    }
                )
            });
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_bullet_spawns_at_muzzle() {
        let mut state = quiet_state();
        state.player.facing = Facing::Right;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        let bullet = &state.bullets[0];
        assert_eq!(bullet.owner, ActorKind::Player);
        assert_eq!(bullet.facing, Facing::Right);
        assert!(bullet.rect().left() > state.player.rect().right());
    }

    /// Player on the ground takes one enemy bullet
    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = quiet_state();
        assert_eq!(state.player.health, 5);
        enemy_bullet_at(&mut state, Vec2::new(805.0, 800.0), BULLET_SPEED);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.player.health, 4);
        assert!(state.player.alive);
        assert!(state.bullets.is_empty());
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::ActorHit { .. })),
            1
        );
    }

    /// Cumulative hits kill the player exactly once
    #[test]
    fn test_player_death_is_terminal() {
        let mut state = quiet_state();
        let mut deaths = 0;

        for _ in 0..8 {
            enemy_bullet_at(&mut state, Vec2::new(805.0, 800.0), BULLET_SPEED);
            let was_alive = state.player.alive;
            tick(&mut state, &TickInput::default(), SIM_DT);
            deaths += count_events(&state, |e| matches!(e, GameEvent::PlayerKilled));

            if was_alive && !state.player.alive {
                assert_eq!(state.player.health, 0);
                assert_eq!(state.phase, GamePhase::GameOver);
            }
        }

        assert_eq!(deaths, 1);
        assert!(!state.player.alive);
        assert_eq!(state.player.health, 0);
    }

    /// Clearing the wave starts the next round on the following frame
    #[test]
    fn test_round_advances_when_cleared() {
        let mut state = quiet_state();
        state.player.health = 2;
        let round = state.round;
        state.enemies.clear();

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.round, round + 1);
        let n = state.enemies.len() as u32;
        assert!((ENEMY_BATCH_MIN..=ENEMY_BATCH_MAX).contains(&n));
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::RoundStarted { .. })),
            1
        );
    }

    #[test]
    fn test_first_round_start_is_observable() {
        let mut state = GameState::new(5);
        tick(&mut state, &TickInput::default(), SIM_DT);
        let enemies = state.enemies.len() as u32;
        assert!(state.events.contains(&GameEvent::RoundStarted { round: 1, enemies }));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::RoundStarted { .. })),
            0
        );
    }

    #[test]
    fn test_round_phases_are_staggered() {
        let mut state = quiet_state();
        state.enemies.clear();
        tick(&mut state, &TickInput::default(), SIM_DT);

        let phases: Vec<_> = state.enemies.iter().map(|e| e.behavior).collect();
        assert!(phases.windows(2).any(|w| w[0] != w[1]));
    }

    /// Off-screen bullet despawns after ceil(distance / speed) frames
    #[test]
    fn test_bullet_leaves_screen() {
        let mut state = quiet_state();
        let id = state.next_entity_id();
        state.bullets.push(Bullet::new(
            id,
            Vec2::new(1500.0, 10.0),
            Facing::Right,
            ActorKind::Player,
            BULLET_SPEED,
        ));
        let enemy_health = state.enemies[0].health;

        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.bullets.len(), 1);
        }
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies[0].health, enemy_health);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    /// Airborne with no input always reads as jumping
    #[test]
    fn test_airborne_reports_jumping() {
        let mut state = quiet_state();
        state.player.body.pos = Vec2::new(800.0, 300.0);
        state.player.jumping = true;
        state.player.move_intent = PLAYER_ACCEL;
        state.player.animation.set_action(Action::Walking);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.player.jumping);
        assert_eq!(state.player.animation.action, Action::Jumping);
        assert_eq!(state.player.animation.frame_index, 0);
    }

    #[test]
    fn test_stationary_bullet_hits_once() {
        let mut state = quiet_state();
        enemy_bullet_at(&mut state, Vec2::new(795.0, 800.0), 0.0);

        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 1);
    }

    #[test]
    fn test_kill_scores_and_removes_enemy() {
        let mut state = quiet_state();
        state.enemies[0].health = 1;
        let target = state.enemies[0].rect().center();
        let id = state.next_entity_id();
        // Park the bullet on the enemy's path so it hits next frame
        state.bullets.push(Bullet::fired_from(
            id,
            target,
            Facing::Right,
            ActorKind::Player,
            0.0,
        ));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.score, KILL_REWARD);
        assert!(state.enemies.is_empty());
        assert_eq!(
            count_events(&state, |e| matches!(e, GameEvent::EnemyKilled { .. })),
            1
        );

        let round = state.round;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.round, round + 1);
    }

    /// Enemy and player both die in one frame; bullet order decides the reward
    fn trade_kills(player_bullet_first: bool) -> (GameState, u32) {
        let mut state = quiet_state();
        state.enemies[0].health = 1;
        state.player.health = 1;
        let enemy_id = state.enemies[0].id;
        let target = state.enemies[0].rect().center();

        let player_shot = |state: &mut GameState| {
            let id = state.next_entity_id();
            state.bullets.push(Bullet::fired_from(
                id,
                target,
                Facing::Right,
                ActorKind::Player,
                0.0,
            ));
        };
        if player_bullet_first {
            player_shot(&mut state);
            enemy_bullet_at(&mut state, Vec2::new(805.0, 800.0), BULLET_SPEED);
        } else {
            enemy_bullet_at(&mut state, Vec2::new(805.0, 800.0), BULLET_SPEED);
            player_shot(&mut state);
        }

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.player.alive);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemies.is_empty());
        (state, enemy_id)
    }

    #[test]
    fn test_enemy_killed_before_player_scores() {
        let (state, enemy_id) = trade_kills(true);
        assert_eq!(state.score, KILL_REWARD);
        assert!(state.events.contains(&GameEvent::EnemyKilled {
            enemy_id,
            reward: KILL_REWARD,
        }));
    }

    #[test]
    fn test_enemy_killed_after_player_scores_nothing() {
        let (state, enemy_id) = trade_kills(false);
        assert_eq!(state.score, 0);
        assert!(
            state
                .events
                .contains(&GameEvent::EnemyKilled { enemy_id, reward: 0 })
        );
    }

    #[test]
    fn test_no_score_after_game_over() {
        let mut state = quiet_state();
        state.player.take_damage(PLAYER_MAX_HEALTH);
        state.phase = GamePhase::GameOver;
        state.enemies[0].health = 1;
        let target = state.enemies[0].rect().center();
        let id = state.next_entity_id();
        state.bullets.push(Bullet::fired_from(
            id,
            target,
            Facing::Right,
            ActorKind::Player,
            0.0,
        ));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty());

        // No new wave once the game is over
        let round = state.round;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.round, round);
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut state = quiet_state();
        state.player.take_damage(PLAYER_MAX_HEALTH);
        let pos = state.player.body.pos;
        let mash = TickInput {
            right: true,
            jump: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &mash, SIM_DT);
        }
        assert_eq!(state.player.body.pos, pos);
        assert!(!state.bullets.iter().any(|b| b.owner == ActorKind::Player));
    }

    #[test]
    fn test_enemies_fire_on_their_own() {
        let mut state = GameState::new(777);
        let mut enemy_shots = 0;
        for _ in 0..ENEMY_SHOOT_COOLDOWN {
            tick(&mut state, &TickInput::default(), SIM_DT);
            enemy_shots += count_events(&state, |e| {
                matches!(
                    e,
                    GameEvent::BulletFired {
                        owner: ActorKind::Enemy,
                        ..
                    }
                )
            });
        }
        assert!(enemy_shots > 0);
    }

    #[test]
    fn test_determinism() {
        let script: Vec<TickInput> = (0..600)
            .map(|i| TickInput {
                left: i % 90 < 30,
                right: (45..80).contains(&(i % 90)),
                jump: i % 70 == 0,
                fire: i % 3 == 0,
                ..Default::default()
            })
            .collect();

        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        for input in &script {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }

        assert_eq!(a.time_ticks, 600);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_bullet_never_double_hits(speed in 0.0f32..4.0, frames in 1usize..20) {
            let mut state = quiet_state();
            enemy_bullet_at(&mut state, Vec2::new(790.0, 800.0), speed);
            for _ in 0..frames {
                tick(&mut state, &TickInput::default(), SIM_DT);
            }
            prop_assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 1);
        }
    }
}
