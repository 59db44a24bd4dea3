/// Presentation and device layer: terminal renderer, sprites, keyboard,
/// gamepad and sound.

pub mod gamepad;
pub mod keyboard;
pub mod renderer;
pub mod sound;
pub mod sprites;

use crate::sim::Status;

/// Drawing surface used by screens and sessions.
///
/// Coordinates are terminal cells relative to the play field's top-left
/// corner. Drawing never fails from the caller's point of view; anything
/// outside the surface is clipped.
pub trait Canvas {
    /// Draw the named sprite with its top-left corner at `pos`.
    fn blit(&mut self, image: &str, pos: (i32, i32));

    /// Draw a line of text centred horizontally on row `y`.
    fn draw_text(&mut self, text: &str, y: i32);

    /// Draw the status HUD (score, lives).
    fn draw_status(&mut self, status: &Status);
}
