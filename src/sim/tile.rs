/// Arena tiles and the fixed cavern layout.

pub const ARENA_W: usize = 28;
pub const ARENA_H: usize = 18;

/// Terminal columns per arena cell.
pub const CELL_W: i32 = 2;
/// Canvas row of the arena's top edge (rows above it belong to the HUD).
pub const FIELD_TOP: i32 = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Wall,
    Ledge,
}

impl Tile {
    fn from_char(ch: char) -> Tile {
        match ch {
            '#' => Tile::Wall,
            '=' => Tile::Ledge,
            _ => Tile::Empty,
        }
    }

    pub fn is_solid(self) -> bool {
        !matches!(self, Tile::Empty)
    }

    pub fn sprite(self) -> Option<&'static str> {
        match self {
            Tile::Empty => None,
            Tile::Wall => Some("wall"),
            Tile::Ledge => Some("ledge"),
        }
    }
}

const LAYOUT: [&str; ARENA_H] = [
    "############################",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#.........========.........#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#===......................=#",
    "#.......=====....=====.....#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#.....========..=======....#",
    "#..........................#",
    "############################",
];

/// Tile at (x, y); everything outside the arena counts as wall.
pub fn tile_at(x: i32, y: i32) -> Tile {
    if x < 0 || y < 0 || x >= ARENA_W as i32 || y >= ARENA_H as i32 {
        return Tile::Wall;
    }
    LAYOUT[y as usize]
        .chars()
        .nth(x as usize)
        .map(Tile::from_char)
        .unwrap_or(Tile::Wall)
}

pub fn is_solid(x: i32, y: i32) -> bool {
    tile_at(x, y).is_solid()
}

/// Canvas position of the arena cell (x, y).
pub fn to_canvas(x: i32, y: i32) -> (i32, i32) {
    (x * CELL_W, FIELD_TOP + y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rows_are_arena_width() {
        for row in LAYOUT.iter() {
            assert_eq!(row.chars().count(), ARENA_W);
        }
    }

    #[test]
    fn border_is_solid_interior_open() {
        assert!(is_solid(0, 5));
        assert!(is_solid(ARENA_W as i32 - 1, 5));
        assert!(is_solid(5, ARENA_H as i32 - 1));
        assert!(!is_solid(5, 3));
        assert!(is_solid(-1, 3));
        assert!(is_solid(3, 99));
    }

    #[test]
    fn ledges_are_solid() {
        assert_eq!(tile_at(10, 6), Tile::Ledge);
        assert!(is_solid(10, 6));
    }
}
