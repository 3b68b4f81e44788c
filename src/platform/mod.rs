//! Platform abstraction layer
//!
//! Handles the host-side collaborators of a session:
//! - Presentation (scene drawing, end-of-round dialog, backdrop)
//! - Time (fixed-step accumulation of host frame deltas)

pub mod clock;

pub use clock::FixedStep;

use crate::sim::GameState;

/// Everything the session shows to the player goes through here.
///
/// The session never reads anything back. The end dialog is answered by the
/// host calling [`Session::respond`](crate::Session::respond).
pub trait Presenter {
    /// Draw the current scene
    fn render_scene(&mut self, state: &GameState);

    /// Show the end-of-round message with "Play Again" and "Quit" choices
    fn show_end_message(&mut self, message: &str);

    /// Advance purely decorative background animation
    fn animate_backdrop(&mut self, _dt: f32) {}
}

/// Presenter that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_scene(&mut self, _state: &GameState) {}

    fn show_end_message(&mut self, _message: &str) {}
}
