//! Platform abstraction layer
//!
//! The simulation talks to the outside world through two narrow seams:
//! - `InputSource`: sampled key state, once per frame
//! - `Presenter`: receives a `FrameView` to draw, once per frame

pub mod input;
pub mod presenter;

pub use input::{EdgeDetector, HeldKeys, InputSource, ScriptedInput};
pub use presenter::{LogPresenter, Presenter};
