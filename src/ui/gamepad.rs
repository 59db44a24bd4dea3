/// Gamepad input tracker using gilrs.
///
/// Contributes one `RawKeys` sample per frame, merged with the keyboard's.
/// Button mapping comes from `[gamepad]` in config.toml.
/// Default mapping:
///   D-pad / Left Stick    →  left / right / up
///   A                     →  jump
///   X / B                 →  fire
///   Start                 →  pause

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::input::RawKeys;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    L2,
    R2,
    Start,
    Select,
    Up,
    Down,
    Left,
    Right,
}

const BTN_COUNT: usize = 14;

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" => Some(Btn::L1),
            "R1" | "RB" => Some(Btn::R1),
            "L2" | "LT" => Some(Btn::L2),
            "R2" | "RT" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2 => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            Button::DPadUp => Some(Btn::Up),
            Button::DPadDown => Some(Btn::Down),
            Button::DPadLeft => Some(Btn::Left),
            Button::DPadRight => Some(Btn::Right),
            _ => None,
        }
    }
}

/// Per-button state: held, plus a latch for taps shorter than a frame.
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    tapped: bool,
}

impl BtnState {
    fn down(self) -> bool {
        self.held || self.tapped
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Debug)]
struct ActionMap {
    jump: Vec<Btn>,
    fire: Vec<Btn>,
    pause: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap::from_config(&GamepadConfig::default())
    }
}

impl ActionMap {
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names
                .iter()
                .filter_map(|s| {
                    let btn = Btn::from_name(s);
                    if btn.is_none() {
                        log::warn!("unknown gamepad button '{s}' in [gamepad]");
                    }
                    btn
                })
                .collect()
        }
        ActionMap {
            jump: parse_list(&cfg.jump),
            fire: parse_list(&cfg.fire),
            pause: parse_list(&cfg.pause),
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    buttons: [BtnState; BTN_COUNT],
    stick_x: f32,
    stick_y: f32,
    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::info!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); BTN_COUNT],
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Empty lists keep the default mapping.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        let parsed = ActionMap::from_config(cfg);
        let map = &mut self.action_map;
        if !parsed.jump.is_empty() { map.jump = parsed.jump; }
        if !parsed.fire.is_empty() { map.fire = parsed.fire; }
        if !parsed.pause.is_empty() { map.pause = parsed.pause; }
    }

    /// Drain pending gamepad events. Call every loop iteration.
    pub fn poll(&mut self) {
        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    if let Some(b) = Btn::from_gilrs(btn) {
                        self.set_button(b, true);
                    }
                }
                EventType::ButtonReleased(btn, _) => {
                    if let Some(b) = Btn::from_gilrs(btn) {
                        self.set_button(b, false);
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }
    }

    fn set_button(&mut self, btn: Btn, held: bool) {
        let state = &mut self.buttons[btn as usize];
        state.held = held;
        if held {
            state.tapped = true;
        }
    }

    fn any_down(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.buttons[b as usize].down())
    }

    /// Current raw signals. Call once per frame; clears tap latches.
    pub fn sample(&mut self) -> RawKeys {
        let raw = RawKeys {
            left: self.buttons[Btn::Left as usize].down() || self.stick_x < -STICK_DEADZONE,
            right: self.buttons[Btn::Right as usize].down() || self.stick_x > STICK_DEADZONE,
            up: self.buttons[Btn::Up as usize].down()
                || self.stick_y > STICK_DEADZONE
                || self.any_down(&self.action_map.jump),
            fire: self.any_down(&self.action_map.fire),
            pause: self.any_down(&self.action_map.pause),
        };
        for b in &mut self.buttons {
            b.tapped = false;
        }
        raw
    }

    fn release_all(&mut self) {
        for b in &mut self.buttons {
            *b = BtnState::default();
        }
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
