//! Input sources
//!
//! Device details stop here. The core only ever sees `TickInput`.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::TickInput;

/// Anything that can produce one frame of input
pub trait InputSource {
    fn sample(&mut self) -> TickInput;
}

/// Raw held state of the fixed key set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
    pub confirm: bool,
}

/// Turns held keys into per-frame input, making jump and confirm
/// fire only on the frame the key goes down
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    prev: HeldKeys,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, keys: HeldKeys, quit: bool) -> TickInput {
        let input = TickInput {
            left: keys.left,
            right: keys.right,
            jump: keys.jump && !self.prev.jump,
            fire: keys.fire,
            confirm: keys.confirm && !self.prev.confirm,
            quit,
        };
        self.prev = keys;
        input
    }
}

/// Replays a fixed input sequence
///
/// After the script runs out it keeps returning empty input, or a quit
/// signal when built with `quit_when_done`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            quit_when_done: false,
        }
    }

    /// Load a replay saved as a JSON array of inputs
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let frames: Vec<TickInput> = persistence::read_json(path)?;
        log::info!("Loaded replay with {} frames", frames.len());
        Ok(Self::new(frames))
    }

    /// Load a replay, or fall back to an empty script if it can't be read
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(replay) => replay.quit_when_done(),
            Err(e) => {
                log::warn!("{}, running without a replay", e);
                Self::default()
            }
        }
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> TickInput {
        self.frames.pop_front().unwrap_or_else(|| TickInput {
            quit: self.quit_when_done,
            ..Default::default()
        })
    }
}
