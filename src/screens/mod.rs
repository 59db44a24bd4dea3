/// Screen state machine.
///
/// Exactly one screen is active at a time. Each frame `App` hands the
/// active screen to `update` by value; the screen returns itself
/// (`Step::Stay`) or its successor (`Step::Change`). Ownership moves with
/// the transition, so a session is never reachable from two screens:
///
///   Menu → Play → Pause → Play (same instance)
///                Play → GameOver → Menu
///
/// Pause takes the suspended Play screen by value and hands the very same
/// value back on resume.

mod game_over;
mod menu;
mod pause;
mod play;

#[cfg(test)]
pub(crate) mod testing;

pub use game_over::GameOverScreen;
pub use menu::MenuScreen;
pub use pause::PauseScreen;
pub use play::PlayScreen;

use crate::input::InputState;
use crate::sim::Session;
use crate::ui::Canvas;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScreenKind {
    Menu,
    Play,
    Pause,
    GameOver,
}

pub enum Screen<S> {
    Menu(MenuScreen<S>),
    Play(PlayScreen<S>),
    Pause(PauseScreen<S>),
    GameOver(GameOverScreen<S>),
}

/// Result of one screen update.
pub enum Step<S> {
    Stay(Screen<S>),
    Change(Screen<S>),
}

impl<S: Session> Screen<S> {
    pub fn update(self, input: &InputState) -> Step<S> {
        match self {
            Screen::Menu(s) => s.update(input),
            Screen::Play(s) => s.update(input),
            Screen::Pause(s) => s.update(input),
            Screen::GameOver(s) => s.update(input),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Screen::Menu(s) => s.draw(canvas),
            Screen::Play(s) => s.draw(canvas),
            Screen::Pause(s) => s.draw(canvas),
            Screen::GameOver(s) => s.draw(canvas),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu(_) => ScreenKind::Menu,
            Screen::Play(_) => ScreenKind::Play,
            Screen::Pause(_) => ScreenKind::Pause,
            Screen::GameOver(_) => ScreenKind::GameOver,
        }
    }

    /// The session this screen drives (Pause reaches through to its Play screen).
    pub fn session(&self) -> &S {
        match self {
            Screen::Menu(s) => &s.game,
            Screen::Play(s) => &s.game,
            Screen::Pause(s) => &s.play.game,
            Screen::GameOver(s) => &s.game,
        }
    }

    pub fn session_mut(&mut self) -> &mut S {
        match self {
            Screen::Menu(s) => &mut s.game,
            Screen::Play(s) => &mut s.game,
            Screen::Pause(s) => &mut s.play.game,
            Screen::GameOver(s) => &mut s.game,
        }
    }
}
