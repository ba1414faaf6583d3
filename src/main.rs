//! Arena Shooter entry point
//!
//! Usage: `arena-shooter [settings.json] [replay.json]`
//!
//! Without a replay the player stands still and the session runs headless
//! until the frame cap (or until the enemies win).

use std::time::{SystemTime, UNIX_EPOCH};

use arena_shooter::consts::FPS;
use arena_shooter::platform::{LogPresenter, ScriptedInput};
use arena_shooter::runner::Game;
use arena_shooter::sim::GameState;
use arena_shooter::{HighScores, Settings};

const DEFAULT_SETTINGS_PATH: &str = "arena_settings.json";
/// Cap for unattended runs: five minutes of game time
const DEFAULT_MAX_FRAMES: u64 = 5 * 60 * FPS as u64;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Arena Shooter starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .or_else(|| std::env::var("ARENA_SETTINGS").ok())
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);

    let input = match args.next() {
        Some(path) => ScriptedInput::load_or_empty(path),
        None => ScriptedInput::default(),
    };

    let seed = settings.seed.unwrap_or_else(now_millis);
    log::info!("Seed: {}", seed);

    let state = GameState::with_tuning(seed, settings.tuning);
    let mut game = Game::new(state, input, LogPresenter::new());

    let frames = if settings.realtime {
        game.run_realtime(settings.max_frames)
    } else {
        game.run_headless(settings.max_frames.or(Some(DEFAULT_MAX_FRAMES)))
    };

    let state = &game.state;
    log::info!(
        "Session ended after {} frames: score {} on round {}",
        frames,
        state.score,
        state.round
    );

    if let Some(path) = settings.highscores_path.as_deref() {
        let mut scores = HighScores::load(path);
        if let Some(rank) = scores.add_score(state.score, state.round, now_millis()) {
            log::info!("New high score! Rank #{}", rank);
            if let Err(e) = scores.save(path) {
                log::warn!("{}", e);
            }
        }
    }
}
