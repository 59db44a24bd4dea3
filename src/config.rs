/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Missing file or missing keys fall back to defaults.
///
/// ```toml
/// [general]
/// tick_rate_ms = 33
/// sound = true
///
/// [keys]
/// left = ["Left", "a"]
/// fire = ["Space"]
///
/// [gamepad]
/// jump = ["A"]
/// pause = ["Start"]
/// ```

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub general: GeneralConfig,
    pub keys: KeyConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Length of one frame. Each frame runs exactly one update and one draw.
    pub tick_rate_ms: u64,
    pub sound: bool,
}

/// Keyboard bindings as key names (see `ui::keyboard::parse_key`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub up: Vec<String>,
    pub fire: Vec<String>,
    pub pause: Vec<String>,
}

/// Gamepad bindings as button names (see `ui::gamepad::Btn::from_name`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
    pub fire: Vec<String>,
    pub pause: Vec<String>,
}

// ── Defaults ──

const MIN_TICK_MS: u64 = 5;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig { tick_rate_ms: 33, sound: true }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            left: names(&["Left", "a"]),
            right: names(&["Right", "d"]),
            up: names(&["Up", "w"]),
            fire: names(&["Space"]),
            pause: names(&["p", "F1"]),
        }
    }
}

impl Default for GamepadConfig {
    fn default() -> Self {
        GamepadConfig {
            jump: names(&["A"]),
            fire: names(&["X", "B"]),
            pause: names(&["Start"]),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => match GameConfig::from_toml_str(&text) {
                    Ok(cfg) => {
                        log::info!("loaded {}", path.display());
                        return cfg;
                    }
                    Err(e) => {
                        log::warn!("{}: parse error, using defaults: {e}", path.display());
                        return GameConfig::default();
                    }
                },
                Err(e) => log::warn!("could not read {}: {e}", path.display()),
            }
        }
        GameConfig::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: GameConfig = toml::from_str(text)?;
        if cfg.general.tick_rate_ms < MIN_TICK_MS {
            log::warn!(
                "tick_rate_ms = {} is too fast, clamping to {MIN_TICK_MS}",
                cfg.general.tick_rate_ms
            );
            cfg.general.tick_rate_ms = MIN_TICK_MS;
        }
        Ok(cfg)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
