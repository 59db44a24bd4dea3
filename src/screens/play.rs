use crate::input::InputState;
use crate::screens::{GameOverScreen, PauseScreen, Screen, Step};
use crate::sim::Session;
use crate::ui::Canvas;

/// Live gameplay.
pub struct PlayScreen<S> {
    pub(super) game: S,
}

impl<S: Session> PlayScreen<S> {
    pub fn new(game: S) -> Self {
        PlayScreen { game }
    }

    /// Priority: pause, then death, then simulate.
    pub fn update(mut self, input: &InputState) -> Step<S> {
        if input.pause_pressed {
            // The session is not advanced on the frame that pauses.
            return Step::Change(Screen::Pause(PauseScreen::new(self)));
        }

        if self.game.player_lives().is_some_and(|lives| lives < 0) {
            self.game.play_sound("over");
            return Step::Change(Screen::GameOver(GameOverScreen::new(self.game)));
        }

        self.game.update(input);
        Step::Stay(Screen::Play(self))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.game.draw(canvas);
        canvas.draw_status(&self.game.status());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{MockSession, RecordingCanvas};
    use crate::screens::ScreenKind;

    fn pause() -> InputState {
        InputState { pause_pressed: true, ..InputState::default() }
    }

    #[test]
    fn live_player_advances_session() {
        let play = PlayScreen::new(MockSession::with_player());
        let input = InputState { right: true, jump_pressed: true, ..InputState::default() };
        let Step::Stay(screen) = play.update(&input) else {
            panic!("play should stay while alive");
        };
        assert_eq!(screen.session().inputs, vec![input]);
    }

    #[test]
    fn pause_wins_and_freezes_session() {
        let mut session = MockSession::with_player();
        session.lives = Some(-1); // pause beats death on the same frame
        let id = session.id;
        let Step::Change(screen) = PlayScreen::new(session).update(&pause()) else {
            panic!("pause_pressed should leave play");
        };
        assert_eq!(screen.kind(), ScreenKind::Pause);
        assert_eq!(screen.session().id, id);
        assert_eq!(screen.session().timer(), 0);
        assert!(screen.session().played.is_empty());
    }

    #[test]
    fn death_goes_to_game_over_with_sound() {
        let mut session = MockSession::with_player();
        session.lives = Some(-1);
        let id = session.id;
        let Step::Change(screen) = PlayScreen::new(session).update(&InputState::neutral()) else {
            panic!("dead player should leave play");
        };
        assert_eq!(screen.kind(), ScreenKind::GameOver);
        assert_eq!(screen.session().id, id);
        assert_eq!(screen.session().played, vec!["over"]);
        assert_eq!(screen.session().timer(), 0);
    }

    #[test]
    fn zero_lives_is_still_alive() {
        let mut session = MockSession::with_player();
        session.lives = Some(0);
        let step = PlayScreen::new(session).update(&InputState::neutral());
        assert!(matches!(step, Step::Stay(Screen::Play(_))));
    }

    #[test]
    fn draw_is_session_then_hud() {
        let play = PlayScreen::new(MockSession::with_player());
        let mut canvas = RecordingCanvas::default();
        play.draw(&mut canvas);
        assert_eq!(canvas.ops.len(), 2);
        assert!(canvas.ops[0].starts_with("session"));
        assert!(canvas.ops[1].starts_with("status"));
    }
}
