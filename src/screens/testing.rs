//! Test doubles for the state machine: a session that records what it was
//! asked to do, and a canvas that records draw calls as strings.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::input::InputState;
use crate::sim::{Session, Status};
use crate::ui::Canvas;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct MockSession {
    /// Unique per constructed session.
    pub id: u64,
    pub lives: Option<i32>,
    pub timer: u64,
    /// Every input passed to `update`, in order.
    pub inputs: Vec<InputState>,
    /// Every sound ever requested, never drained.
    pub played: Vec<&'static str>,
    queued: Vec<&'static str>,
}

impl MockSession {
    fn new(lives: Option<i32>) -> Self {
        MockSession {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            lives,
            timer: 0,
            inputs: Vec::new(),
            played: Vec::new(),
            queued: Vec::new(),
        }
    }
}

impl Session for MockSession {
    fn idle() -> Self {
        MockSession::new(None)
    }

    fn with_player() -> Self {
        MockSession::new(Some(2))
    }

    fn update(&mut self, input: &InputState) {
        self.timer += 1;
        self.inputs.push(*input);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.blit(&format!("session {}", self.id), (0, self.timer as i32));
    }

    fn play_sound(&mut self, name: &'static str) {
        self.played.push(name);
        self.queued.push(name);
    }

    fn drain_sounds(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.queued)
    }

    fn player_lives(&self) -> Option<i32> {
        self.lives
    }

    fn timer(&self) -> u64 {
        self.timer
    }

    fn status(&self) -> Status {
        Status { score: 0, lives: self.lives }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RecordingCanvas {
    pub ops: Vec<String>,
}

impl Canvas for RecordingCanvas {
    fn blit(&mut self, image: &str, pos: (i32, i32)) {
        if image.starts_with("session") {
            self.ops.push(image.to_string());
        } else {
            self.ops.push(format!("blit {image} {pos:?}"));
        }
    }

    fn draw_text(&mut self, text: &str, y: i32) {
        self.ops.push(format!("text {text} {y}"));
    }

    fn draw_status(&mut self, status: &Status) {
        self.ops.push(format!("status {status:?}"));
    }
}
