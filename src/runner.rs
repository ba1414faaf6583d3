//! Game loop
//!
//! Samples input, advances the simulation on a fixed timestep and hands
//! each frame to the presenter. The wall-clock gate is presentation only:
//! `run_headless` steps as fast as it can and produces the same session.

use std::time::{Duration, Instant};

use crate::consts::*;
use crate::platform::{InputSource, Presenter};
use crate::sim::{GameState, TickInput, tick};
use crate::view::FrameView;

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Quit always exits; confirm exits once the game is over
pub fn should_exit(input: &TickInput, state: &GameState) -> bool {
    input.quit || (input.confirm && state.is_game_over())
}

/// Game instance holding all state
pub struct Game<I: InputSource, P: Presenter> {
    pub state: GameState,
    input: I,
    presenter: P,
    accumulator: f32,
    exited: bool,
}

impl<I: InputSource, P: Presenter> Game<I, P> {
    pub fn new(state: GameState, input: I, presenter: P) -> Self {
        Self {
            state,
            input,
            presenter,
            accumulator: 0.0,
            exited: false,
        }
    }

    pub fn exited(&self) -> bool {
        self.exited
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// One fixed step: sample, simulate, present
    pub fn step(&mut self) -> Flow {
        if self.exited {
            return Flow::Exit;
        }

        let input = self.input.sample();
        if should_exit(&input, &self.state) {
            log::info!("Exit requested at tick {}", self.state.time_ticks);
            self.exited = true;
            return Flow::Exit;
        }

        tick(&mut self.state, &input, SIM_DT);
        self.presenter.present(&FrameView::capture(&self.state));
        Flow::Continue
    }

    /// Run as many fixed steps as `dt` seconds of wall time cover
    ///
    /// Returns the number of steps taken.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if self.step() == Flow::Exit {
                break;
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Step without any clock until exit or `max_frames`
    pub fn run_headless(&mut self, max_frames: Option<u64>) -> u64 {
        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            if self.step() == Flow::Exit {
                break;
            }
            frames += 1;
        }
        frames
    }

    /// Step at a steady 60 Hz against the wall clock
    pub fn run_realtime(&mut self, max_frames: Option<u64>) -> u64 {
        let frame = Duration::from_secs_f32(SIM_DT);
        let mut last = Instant::now();
        let mut frames = 0;

        while !self.exited && max_frames.is_none_or(|max| frames < max) {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            frames += u64::from(self.update(dt));

            let spent = now.elapsed();
            if spent < frame {
                std::thread::sleep(frame - spent);
            }
        }
        frames
    }
}
