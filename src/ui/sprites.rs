/// Sprite table: every image id a screen or session may blit.
///
/// Sprites are rows of characters; a space is transparent. Arena sprites
/// are `CELL_W` columns wide so one arena cell maps to one sprite.

use crossterm::style::Color;

#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub rows: &'static [&'static str],
    pub fg: Color,
}

impl Sprite {
    #[cfg(test)]
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }
}

const TITLE: &[&str] = &[
    " ██████  █████  ██    ██ ███████ ██████  ███    ██",
    "██      ██   ██ ██    ██ ██      ██   ██ ████   ██",
    "██      ███████ ██    ██ █████   ██████  ██ ██  ██",
    "██      ██   ██  ██  ██  ██      ██   ██ ██  ██ ██",
    " ██████ ██   ██   ████   ███████ ██   ██ ██   ████",
];

const OVER: &[&str] = &[
    " ██████   █████  ███    ███ ███████",
    "██       ██   ██ ████  ████ ██     ",
    "██   ███ ███████ ██ ████ ██ █████  ",
    "██    ██ ██   ██ ██  ██  ██ ██     ",
    " ██████  ██   ██ ██      ██ ███████",
    "",
    " ██████  ██    ██ ███████ ██████   ",
    "██    ██ ██    ██ ██      ██   ██  ",
    "██    ██ ██    ██ █████   ██████   ",
    "██    ██  ██  ██  ██      ██   ██  ",
    " ██████    ████   ███████ ██   ██  ",
];

const PRESS_SPACE: &[&str] = &["PRESS SPACE"];

/// Fade-in ramp for the ten "press space" frames.
const SPACE_RAMP: [Color; 10] = [
    Color::Rgb { r: 30, g: 30, b: 45 },
    Color::Rgb { r: 50, g: 50, b: 70 },
    Color::Rgb { r: 75, g: 75, b: 100 },
    Color::Rgb { r: 100, g: 100, b: 130 },
    Color::Rgb { r: 130, g: 130, b: 160 },
    Color::Rgb { r: 160, g: 160, b: 190 },
    Color::Rgb { r: 190, g: 190, b: 215 },
    Color::Rgb { r: 220, g: 220, b: 235 },
    Color::Rgb { r: 245, g: 240, b: 200 },
    Color::Rgb { r: 255, g: 220, b: 90 },
];

pub const SPACE_FRAMES: usize = SPACE_RAMP.len();

pub fn lookup(id: &str) -> Option<Sprite> {
    let sprite = match id {
        "title" => Sprite { rows: TITLE, fg: Color::Rgb { r: 90, g: 200, b: 255 } },
        "over" => Sprite { rows: OVER, fg: Color::Rgb { r: 230, g: 60, b: 60 } },
        "wall" => Sprite { rows: &["▓▓"], fg: Color::Rgb { r: 140, g: 100, b: 60 } },
        "ledge" => Sprite { rows: &["=="], fg: Color::Rgb { r: 190, g: 150, b: 90 } },
        "player_r" => Sprite { rows: &["@>"], fg: Color::Rgb { r: 120, g: 255, b: 120 } },
        "player_l" => Sprite { rows: &["<@"], fg: Color::Rgb { r: 120, g: 255, b: 120 } },
        "player_hurt" => Sprite { rows: &["@@"], fg: Color::Rgb { r: 255, g: 80, b: 80 } },
        "debris" => Sprite { rows: &["()"], fg: Color::Grey },
        "bolt" => Sprite { rows: &["~~"], fg: Color::Cyan },
        _ => return space_frame(id),
    };
    Some(sprite)
}

/// `space0` .. `space9`.
fn space_frame(id: &str) -> Option<Sprite> {
    let n: usize = id.strip_prefix("space")?.parse().ok()?;
    let fg = *SPACE_RAMP.get(n)?;
    Some(Sprite { rows: PRESS_SPACE, fg })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::{ARENA_W, CELL_W};

    #[test]
    fn every_space_frame_exists() {
        for n in 0..SPACE_FRAMES {
            assert!(lookup(&format!("space{n}")).is_some(), "space{n}");
        }
        assert!(lookup("space10").is_none());
        assert!(lookup("spacex").is_none());
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(lookup("dragon").is_none());
    }

    #[test]
    fn arena_sprites_fill_one_cell() {
        for id in ["wall", "ledge", "player_r", "player_l", "player_hurt", "debris", "bolt"] {
            let s = lookup(id).unwrap();
            assert_eq!(s.width(), CELL_W as usize, "{id}");
        }
    }

    #[test]
    fn banners_fit_the_field() {
        let field_w = ARENA_W * CELL_W as usize;
        assert!(lookup("title").unwrap().width() <= field_w);
        assert!(lookup("over").unwrap().width() <= field_w);
    }
}
