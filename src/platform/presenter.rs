//! Presenters
//!
//! Real drawing (windows, sprites, fonts) is someone else's job; this crate
//! ships a headless presenter that reports HUD changes through the log.

use crate::view::{FrameView, Hud};

/// Receives one frame per simulation step
pub trait Presenter {
    fn present(&mut self, frame: &FrameView);
}

/// Logs the HUD whenever it changes, and the banner once
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_hud: Option<Hud>,
    banner_shown: bool,
    frames: u64,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameView) {
        self.frames += 1;

        if self.last_hud != Some(frame.hud) {
            log::info!(
                "[tick {}] score {} | round {} | health {}",
                frame.tick,
                frame.hud.score,
                frame.hud.round,
                frame.hud.health
            );
            self.last_hud = Some(frame.hud);
        }

        if frame.game_over && !self.banner_shown {
            log::info!("*** GAME OVER *** final score {}", frame.hud.score);
            self.banner_shown = true;
        }

        log::trace!("[tick {}] {} sprites", frame.tick, frame.sprites.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_counts_frames() {
        let state = GameState::new(3);
        let frame = FrameView::capture(&state);
        let mut presenter = LogPresenter::new();
        presenter.present(&frame);
        presenter.present(&frame);
        assert_eq!(presenter.frames_presented(), 2);
        assert_eq!(presenter.last_hud, Some(frame.hud));
    }
}
