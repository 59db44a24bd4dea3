use crate::input::InputState;
use crate::screens::{MenuScreen, Screen, Step};
use crate::sim::Session;
use crate::ui::Canvas;

const OVER_POS: (i32, i32) = (10, 5);

/// Finished session. The world keeps running underneath (debris still
/// falls) until fire returns to a fresh menu.
pub struct GameOverScreen<S> {
    pub(super) game: S,
}

impl<S: Session> GameOverScreen<S> {
    pub fn new(game: S) -> Self {
        GameOverScreen { game }
    }

    pub fn update(mut self, input: &InputState) -> Step<S> {
        if input.fire_pressed {
            return Step::Change(Screen::Menu(MenuScreen::new()));
        }
        self.game.update(input);
        Step::Stay(Screen::GameOver(self))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.game.draw(canvas);
        canvas.draw_status(&self.game.status());
        canvas.blit("over", OVER_POS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{MockSession, RecordingCanvas};
    use crate::screens::ScreenKind;

    fn finished() -> GameOverScreen<MockSession> {
        let mut session = MockSession::with_player();
        session.lives = Some(-1);
        GameOverScreen::new(session)
    }

    #[test]
    fn session_keeps_running_until_fire() {
        let mut screen = Screen::GameOver(finished());
        let held = InputState { fire_held: true, left: true, ..InputState::default() };
        let mut last = screen.session().timer();
        for _ in 0..5 {
            screen = match screen.update(&held) {
                Step::Stay(s) => s,
                Step::Change(_) => panic!("no fire press yet"),
            };
            assert!(screen.session().timer() > last);
            last = screen.session().timer();
        }
    }

    #[test]
    fn fire_returns_to_fresh_menu() {
        let over = finished();
        let id = over.game.id;
        let press = InputState { fire_pressed: true, fire_held: true, ..InputState::default() };
        let Step::Change(next) = over.update(&press) else {
            panic!("fire should leave game over");
        };
        assert_eq!(next.kind(), ScreenKind::Menu);
        assert_ne!(next.session().id, id);
        assert_eq!(next.session().player_lives(), None);
    }

    #[test]
    fn draw_is_session_hud_then_banner() {
        let mut canvas = RecordingCanvas::default();
        finished().draw(&mut canvas);
        assert_eq!(canvas.ops.len(), 3);
        assert!(canvas.ops[0].starts_with("session"));
        assert!(canvas.ops[1].starts_with("status"));
        assert_eq!(canvas.ops[2], format!("blit over {:?}", OVER_POS));
    }
}
