/// Session collaborator: the world simulation a screen drives.
///
/// Screens only see the `Session` trait. `Game` is the real arena;
/// tests substitute a lightweight mock.

pub mod entity;
pub mod game;
pub mod tile;

use crate::input::InputState;
use crate::ui::Canvas;

/// What the status HUD shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub score: u32,
    /// `None` for attract-mode sessions without a player.
    pub lives: Option<i32>,
}

pub trait Session {
    /// Attract-mode session with no player.
    fn idle() -> Self
    where
        Self: Sized;

    /// Fresh session with a newly constructed player.
    fn with_player() -> Self
    where
        Self: Sized;

    fn update(&mut self, input: &InputState);

    /// Render the world. Must not mutate the session.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Queue a named sound effect for the audio layer.
    fn play_sound(&mut self, name: &'static str);

    /// Take every sound queued since the last call.
    fn drain_sounds(&mut self) -> Vec<&'static str>;

    fn player_lives(&self) -> Option<i32>;

    /// Elapsed frames; increases by one per `update`.
    fn timer(&self) -> u64;

    fn status(&self) -> Status;
}
