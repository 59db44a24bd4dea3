/// App: owns the active screen and the input manager, and is the only
/// place the active screen is replaced.
///
/// One frame is exactly one `update` followed by one `draw`. A transition
/// requested during `update` is visible to the same frame's `draw`.

use crate::input::{InputManager, RawInput};
use crate::screens::{Screen, Step};
use crate::sim::Session;
use crate::ui::Canvas;

pub struct App<S> {
    screen: Option<Screen<S>>,
    input: InputManager,
}

impl<S: Session> App<S> {
    pub fn new() -> Self {
        App { screen: None, input: InputManager::new() }
    }

    pub fn with_screen(screen: Screen<S>) -> Self {
        let mut app = App::new();
        app.change_screen(screen);
        app
    }

    /// Replace the active screen. The old one is dropped.
    pub fn change_screen(&mut self, screen: Screen<S>) {
        match &self.screen {
            Some(old) => log::debug!("screen {:?} -> {:?}", old.kind(), screen.kind()),
            None => log::debug!("screen -> {:?}", screen.kind()),
        }
        self.screen = Some(screen);
    }

    pub fn screen(&self) -> Option<&Screen<S>> {
        self.screen.as_ref()
    }

    /// Run one frame of logic. Must be called exactly once per frame.
    pub fn update(&mut self, raw: &impl RawInput) {
        // Edge state advances every frame, screen or not.
        let input = self.input.build(raw);

        let Some(screen) = self.screen.take() else { return };
        let from = screen.kind();
        match screen.update(&input) {
            Step::Stay(screen) => self.screen = Some(screen),
            Step::Change(next) => {
                log::info!("{:?} -> {:?}", from, next.kind());
                self.screen = Some(next);
            }
        }
    }

    /// Render the active screen. Has no effect on state.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(screen) = &self.screen {
            screen.draw(canvas);
        }
    }

    /// Sounds the active session queued this frame.
    pub fn drain_sounds(&mut self) -> Vec<&'static str> {
        self.screen
            .as_mut()
            .map(|s| s.session_mut().drain_sounds())
            .unwrap_or_default()
    }
}
