use crate::input::InputState;
use crate::screens::{PlayScreen, Screen, Step};
use crate::sim::Session;
use crate::ui::Canvas;

const PAUSED_ROW: i32 = 8;
const HINT_ROW: i32 = 10;

/// Suspended gameplay. Owns the Play screen it interrupted and never
/// updates it, so the simulation is frozen simply by not being driven.
pub struct PauseScreen<S> {
    pub(super) play: PlayScreen<S>,
}

impl<S: Session> PauseScreen<S> {
    pub fn new(play: PlayScreen<S>) -> Self {
        PauseScreen { play }
    }

    pub fn update(self, input: &InputState) -> Step<S> {
        if input.pause_pressed {
            return Step::Change(Screen::Play(self.play));
        }
        Step::Stay(Screen::Pause(self))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.play.draw(canvas);
        canvas.draw_text("PAUSED", PAUSED_ROW);
        canvas.draw_text("PRESS P TO RESUME", HINT_ROW);
    }
}
