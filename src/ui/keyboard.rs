/// Keyboard tracker: terminal key events → one `RawKeys` sample per frame.
///
/// Terminals report presses (and auto-repeats) but often no releases.
/// When the keyboard enhancement protocol is available, Release events are
/// honored; otherwise a key counts as held until `HOLD_TIMEOUT` passes
/// without a Press/Repeat.
///
/// Events are drained every loop iteration but sampled once per frame.
/// A key tapped and released between two samples is latched so the frame
/// still sees it down once.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use crate::config::KeyConfig;
use crate::input::RawKeys;

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

/// Parse a key name from config: `Left`, `Space`, `Enter`, `F1`..`F12`, or a single character.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        lower => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Letters match regardless of shift state.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Resolved key bindings for each raw signal.
#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    left: Vec<KeyCode>,
    right: Vec<KeyCode>,
    up: Vec<KeyCode>,
    fire: Vec<KeyCode>,
    pause: Vec<KeyCode>,
}

impl KeyBindings {
    /// Unknown names are skipped with a warning; an empty list keeps the default.
    pub fn from_config(cfg: &KeyConfig) -> Self {
        let defaults = KeyConfig::default();
        let resolve = |names: &[String], fallback: &[String]| -> Vec<KeyCode> {
            let parsed: Vec<KeyCode> = names
                .iter()
                .filter_map(|n| {
                    let code = parse_key(n);
                    if code.is_none() {
                        log::warn!("unknown key name '{n}' in [keys]");
                    }
                    code
                })
                .collect();
            if parsed.is_empty() {
                fallback.iter().filter_map(|n| parse_key(n)).collect()
            } else {
                parsed
            }
        };
        KeyBindings {
            left: resolve(&cfg.left, &defaults.left),
            right: resolve(&cfg.right, &defaults.right),
            up: resolve(&cfg.up, &defaults.up),
            fire: resolve(&cfg.fire, &defaults.fire),
            pause: resolve(&cfg.pause, &defaults.pause),
        }
    }
}

pub struct Keyboard {
    bindings: KeyBindings,

    /// Timestamp of last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,

    /// Keys pressed since the last `sample()`.
    latched: HashSet<KeyCode>,

    /// Raw key events from the most recent drain, for quit detection.
    raw_events: Vec<KeyEvent>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    honor_release: bool,
}

impl Keyboard {
    pub fn new(bindings: KeyBindings) -> Self {
        Keyboard {
            bindings,
            last_active: HashMap::with_capacity(16),
            latched: HashSet::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            honor_release: false,
        }
    }

    /// Ask the terminal for Release events. Falls back to timeouts when unsupported.
    pub fn enable_release_events(&mut self) {
        let supported = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if supported {
            let flags = KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            self.honor_release =
                execute!(std::io::stdout(), PushKeyboardEnhancementFlags(flags)).is_ok();
        }
        log::info!("key release events: {}", if self.honor_release { "on" } else { "timeout fallback" });
    }

    pub fn disable_release_events(&mut self) {
        if self.honor_release {
            if let Err(e) = execute!(std::io::stdout(), PopKeyboardEnhancementFlags) {
                log::warn!("could not restore keyboard flags: {e}");
            }
            self.honor_release = false;
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call every loop iteration; never blocks.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.raw_events.push(key);
                self.apply(key, Instant::now());
            }
        }

        self.expire(Instant::now());
    }

    fn apply(&mut self, key: KeyEvent, now: Instant) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.last_active.remove(&code);
            }
            // Without enhancement, releases are unreliable; rely on timeout.
            KeyEventKind::Release => {}
            _ => {
                self.last_active.insert(code, now);
                self.latched.insert(code);
            }
        }
    }

    /// Expire keys that have timed out (fallback for terminals without Release)
    fn expire(&mut self, now: Instant) {
        if !self.honor_release {
            self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
        }
    }

    fn is_down(&self, code: KeyCode) -> bool {
        self.last_active.contains_key(&code) || self.latched.contains(&code)
    }

    fn any_down(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_down(*c))
    }

    /// Current raw signals. Call once per frame; clears the tap latch.
    pub fn sample(&mut self) -> RawKeys {
        let b = &self.bindings;
        let raw = RawKeys {
            left: self.any_down(&b.left),
            right: self.any_down(&b.right),
            up: self.any_down(&b.up),
            fire: self.any_down(&b.fire),
            pause: self.any_down(&b.pause),
        };
        self.latched.clear();
        raw
    }

    /// Ctrl+C or Esc in the most recent drain.
    pub fn quit_requested(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.kind != KeyEventKind::Release
                && (k.code == KeyCode::Esc
                    || (k.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn keyboard() -> Keyboard {
        Keyboard::new(KeyBindings::from_config(&KeyConfig::default()))
    }

    #[test]
    fn disabling_release_events_falls_back_to_timeouts() {
        let mut kb = keyboard();
        kb.honor_release = true;
        kb.disable_release_events();
        assert!(!kb.honor_release);
        kb.disable_release_events();
        assert!(!kb.honor_release);
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("LEFT"), Some(KeyCode::Left));
        assert_eq!(parse_key("F1"), Some(KeyCode::F(1)));
        assert_eq!(parse_key("f12"), Some(KeyCode::F(12)));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key("P"), Some(KeyCode::Char('p')));
        assert_eq!(parse_key("f"), Some(KeyCode::Char('f')));
        assert_eq!(parse_key("banana"), None);
    }

    #[test]
    fn bindings_fall_back_when_all_names_are_bad() {
        let cfg = KeyConfig { fire: vec!["nope".into()], ..KeyConfig::default() };
        let b = KeyBindings::from_config(&cfg);
        assert_eq!(b.fire, vec![KeyCode::Char(' ')]);
    }

    #[test]
    fn held_key_reports_down_until_release() {
        let mut kb = keyboard();
        kb.honor_release = true;
        let now = Instant::now();
        kb.apply(press(KeyCode::Left), now);
        assert!(kb.sample().left);
        assert!(kb.sample().left);
        kb.apply(release(KeyCode::Left), now);
        assert!(!kb.sample().left);
    }

    #[test]
    fn tap_between_samples_is_latched_once() {
        let mut kb = keyboard();
        kb.honor_release = true;
        let now = Instant::now();
        kb.apply(press(KeyCode::Char(' ')), now);
        kb.apply(release(KeyCode::Char(' ')), now);
        assert!(kb.sample().fire);
        assert!(!kb.sample().fire);
    }

    #[test]
    fn timeout_releases_without_release_events() {
        let mut kb = keyboard();
        let t0 = Instant::now();
        kb.apply(press(KeyCode::Up), t0);
        kb.expire(t0 + Duration::from_millis(50));
        assert!(kb.sample().up);
        kb.expire(t0 + HOLD_TIMEOUT + Duration::from_millis(1));
        assert!(!kb.sample().up);
    }

    #[test]
    fn shifted_letters_match_bindings() {
        let mut kb = keyboard();
        kb.apply(press(KeyCode::Char('P')), Instant::now());
        assert!(kb.sample().pause);
    }

    #[test]
    fn quit_on_esc_or_ctrl_c() {
        let mut kb = keyboard();
        kb.raw_events.push(press(KeyCode::Esc));
        assert!(kb.quit_requested());

        kb.raw_events.clear();
        kb.raw_events.push(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(kb.quit_requested());

        kb.raw_events.clear();
        kb.raw_events.push(press(KeyCode::Char('c')));
        assert!(!kb.quit_requested());
    }
}
