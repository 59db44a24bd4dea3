use crate::input::InputState;
use crate::screens::{PlayScreen, Screen, Step};
use crate::sim::Session;
use crate::ui::sprites::SPACE_FRAMES;
use crate::ui::Canvas;

const TITLE_POS: (i32, i32) = (3, 4);
const SPACE_POS: (i32, i32) = (22, 13);

/// Title screen over an attract-mode session (no player).
pub struct MenuScreen<S> {
    pub(super) game: S,
}

/// "press space" frame for a given session timer: ten frames of four ticks
/// each, then the last frame holds for the rest of a 160-tick cycle.
pub fn space_frame(timer: u64) -> u64 {
    (((timer + 40) % 160) / 4).min(SPACE_FRAMES as u64 - 1)
}

impl<S: Session> MenuScreen<S> {
    pub fn new() -> Self {
        MenuScreen { game: S::idle() }
    }

    pub fn update(mut self, input: &InputState) -> Step<S> {
        if input.fire_pressed {
            return Step::Change(Screen::Play(PlayScreen::new(S::with_player())));
        }
        self.game.update(&InputState::neutral());
        Step::Stay(Screen::Menu(self))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.game.draw(canvas);
        canvas.blit("title", TITLE_POS);
        let frame = space_frame(self.game.timer());
        canvas.blit(&format!("space{frame}"), SPACE_POS);
    }
}
