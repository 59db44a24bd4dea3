/// Edge-triggered input layer.
///
/// Raw device state is continuous: a key is either down or up. Gameplay
/// wants one-shot actions (jump, fire, pause) that trigger once per
/// physical press. `InputManager` turns one raw sample per frame into an
/// `InputState` by remembering the previous frame's raw values.
///
/// Contract: call `build` exactly once per frame, before the active screen
/// updates. Skipping a frame or calling twice misfires edges.

/// Continuous control signals, polled once per frame.
pub trait RawInput {
    fn left(&self) -> bool;
    fn right(&self) -> bool;
    fn up(&self) -> bool;
    fn fire(&self) -> bool;
    fn pause(&self) -> bool;
}

/// One raw sample as plain booleans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub fire: bool,
    pub pause: bool,
}

impl RawKeys {
    /// Combine two devices: a signal is down if either reports it down.
    pub fn merge(self, other: RawKeys) -> RawKeys {
        RawKeys {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            fire: self.fire || other.fire,
            pause: self.pause || other.pause,
        }
    }
}

impl RawInput for RawKeys {
    fn left(&self) -> bool { self.left }
    fn right(&self) -> bool { self.right }
    fn up(&self) -> bool { self.up }
    fn fire(&self) -> bool { self.fire }
    fn pause(&self) -> bool { self.pause }
}

/// Per-frame snapshot handed to screens and sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub fire_pressed: bool,
    pub pause_pressed: bool,
    pub fire_held: bool,
}

impl InputState {
    /// No controls active. Drives attract-mode sessions.
    pub fn neutral() -> Self {
        InputState::default()
    }
}

/// Previous-frame memory for the edge-tracked signals.
#[derive(Debug, Default)]
pub struct InputManager {
    prev_up: bool,
    prev_fire: bool,
    prev_pause: bool,
}

impl InputManager {
    pub fn new() -> Self {
        InputManager::default()
    }

    pub fn build(&mut self, raw: &impl RawInput) -> InputState {
        let up = raw.up();
        let fire = raw.fire();
        let pause = raw.pause();

        let state = InputState {
            left: raw.left(),
            right: raw.right(),
            jump_pressed: up && !self.prev_up,
            fire_pressed: fire && !self.prev_fire,
            pause_pressed: pause && !self.prev_pause,
            fire_held: fire,
        };

        self.prev_up = up;
        self.prev_fire = fire;
        self.prev_pause = pause;

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(down: bool) -> RawKeys {
        RawKeys { fire: down, ..RawKeys::default() }
    }

    #[test]
    fn fire_press_hold_release() {
        let mut im = InputManager::new();

        let s1 = im.build(&fire(true));
        assert!(s1.fire_pressed);
        assert!(s1.fire_held);

        let s2 = im.build(&fire(true));
        assert!(!s2.fire_pressed);
        assert!(s2.fire_held);

        let s3 = im.build(&fire(false));
        assert!(!s3.fire_pressed);
        assert!(!s3.fire_held);
    }

    #[test]
    fn held_signal_edges_only_once_then_retriggers() {
        let mut im = InputManager::new();
        let up = RawKeys { up: true, ..RawKeys::default() };

        assert!(im.build(&up).jump_pressed);
        for _ in 0..10 {
            assert!(!im.build(&up).jump_pressed);
        }
        assert!(!im.build(&RawKeys::default()).jump_pressed);
        assert!(im.build(&up).jump_pressed);
    }

    #[test]
    fn edges_match_raw_sequence() {
        // frame-by-frame (up, fire, pause)
        let seq = [
            (true, false, false),
            (true, true, false),
            (false, true, true),
            (true, false, true),
            (false, false, false),
            (false, true, true),
        ];
        let mut im = InputManager::new();
        let mut prev = (false, false, false);
        for &(up, fire, pause) in &seq {
            let raw = RawKeys { up, fire, pause, ..RawKeys::default() };
            let s = im.build(&raw);
            assert_eq!(s.jump_pressed, up && !prev.0);
            assert_eq!(s.fire_pressed, fire && !prev.1);
            assert_eq!(s.pause_pressed, pause && !prev.2);
            assert_eq!(s.fire_held, fire);
            prev = (up, fire, pause);
        }
    }

    #[test]
    fn left_right_pass_through() {
        let mut im = InputManager::new();
        let raw = RawKeys { left: true, right: true, ..RawKeys::default() };
        for _ in 0..3 {
            let s = im.build(&raw);
            assert!(s.left && s.right);
        }
    }

    #[test]
    fn merge_is_logical_or() {
        let a = RawKeys { left: true, fire: true, ..RawKeys::default() };
        let b = RawKeys { up: true, fire: true, ..RawKeys::default() };
        let m = a.merge(b);
        assert!(m.left && m.up && m.fire);
        assert!(!m.right && !m.pause);
    }
}
