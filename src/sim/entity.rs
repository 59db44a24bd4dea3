/// Entities: Player, Bolt (the player's shot), Debris (falling rock).

use crate::sim::tile::{self, Tile};

pub const START_LIVES: i32 = 2;
const START_X: i32 = 3;
const START_Y: i32 = 16;

/// Frames between horizontal steps.
const MOVE_RATE: u32 = 2;
/// Frames between vertical steps (rising or falling).
const VERT_RATE: u32 = 2;
/// Cells gained by a jump.
const JUMP_HEIGHT: u32 = 4;
/// Blink/invulnerability window after a hit.
pub const HURT_TICKS: u32 = 45;

pub const BOLT_MIN_RANGE: u32 = 6;
pub const BOLT_MAX_RANGE: u32 = 14;

const DEBRIS_FALL_RATE: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn dx(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

/// Two movers collide when they end a frame on the same cell or trade cells.
pub fn crossed(a: (i32, i32), a_prev: (i32, i32), b: (i32, i32), b_prev: (i32, i32)) -> bool {
    a == b || (a == b_prev && a_prev == b)
}

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: i32,
    pub facing: Facing,
    pub hurt_timer: u32,
    rise: u32,
    move_cooldown: u32,
    vert_cooldown: u32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: START_X,
            y: START_Y,
            lives: START_LIVES,
            facing: Facing::Right,
            hurt_timer: 0,
            rise: 0,
            move_cooldown: 0,
            vert_cooldown: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.lives < 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.hurt_timer > 0
    }

    /// Ledges are one-way: they carry a falling player but never block one going up.
    pub fn on_ground(&self) -> bool {
        self.rise == 0 && tile::is_solid(self.x, self.y + 1)
    }

    /// Step horizontally toward `dir`, honoring the move rate.
    pub fn walk(&mut self, dir: Facing) {
        self.facing = dir;
        if self.move_cooldown > 0 {
            return;
        }
        let nx = self.x + dir.dx();
        if tile::tile_at(nx, self.y) != Tile::Wall {
            self.x = nx;
        }
        self.move_cooldown = MOVE_RATE;
    }

    /// Start a jump. Returns false when airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground() {
            return false;
        }
        self.rise = JUMP_HEIGHT;
        self.vert_cooldown = 0;
        true
    }

    /// Advance cooldowns, rising and gravity by one frame.
    pub fn tick(&mut self) {
        self.move_cooldown = self.move_cooldown.saturating_sub(1);
        self.hurt_timer = self.hurt_timer.saturating_sub(1);

        if self.vert_cooldown > 0 {
            self.vert_cooldown -= 1;
            return;
        }
        if self.rise > 0 {
            if tile::tile_at(self.x, self.y - 1) == Tile::Wall {
                self.rise = 0;
            } else {
                self.y -= 1;
                self.rise -= 1;
            }
            self.vert_cooldown = VERT_RATE;
        } else if !tile::is_solid(self.x, self.y + 1) {
            self.y += 1;
            self.vert_cooldown = VERT_RATE;
        }
    }

    /// Take a hit: one life lost, then a short invulnerable window.
    pub fn hurt(&mut self) {
        self.lives -= 1;
        self.hurt_timer = HURT_TICKS;
        self.rise = 0;
    }
}

#[derive(Clone, Debug)]
pub struct Bolt {
    pub x: i32,
    pub y: i32,
    pub dir: Facing,
    /// Cell occupied before the last `tick`.
    pub prev: (i32, i32),
    range: u32,
    travelled: u32,
    charging: bool,
}

impl Bolt {
    pub fn new(x: i32, y: i32, dir: Facing) -> Self {
        Bolt { x, y, dir, prev: (x, y), range: BOLT_MIN_RANGE, travelled: 0, charging: true }
    }

    /// Move one cell. Holding fire keeps extending the range of a fresh bolt.
    /// Returns false once the bolt is spent.
    pub fn tick(&mut self, fire_held: bool) -> bool {
        if self.charging && fire_held {
            self.range = (self.range + 1).min(BOLT_MAX_RANGE);
        } else {
            self.charging = false;
        }
        self.prev = (self.x, self.y);
        self.x += self.dir.dx();
        self.travelled += 1;
        self.travelled <= self.range && tile::tile_at(self.x, self.y) != Tile::Wall
    }

    #[cfg(test)]
    pub fn range(&self) -> u32 {
        self.range
    }
}

#[derive(Clone, Debug)]
pub struct Debris {
    pub x: i32,
    pub y: i32,
    pub prev: (i32, i32),
    fall_cooldown: u32,
}

impl Debris {
    pub fn new(x: i32, y: i32) -> Self {
        Debris { x, y, prev: (x, y), fall_cooldown: DEBRIS_FALL_RATE }
    }

    /// Fall one step when due. Returns false once it shatters on a surface.
    pub fn tick(&mut self) -> bool {
        self.prev = (self.x, self.y);
        if self.fall_cooldown > 0 {
            self.fall_cooldown -= 1;
            return true;
        }
        self.fall_cooldown = DEBRIS_FALL_RATE;
        if tile::is_solid(self.x, self.y + 1) {
            return false;
        }
        self.y += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_starts_on_floor_and_alive() {
        let p = Player::new();
        assert!(p.on_ground());
        assert!(!p.is_dead());
        assert_eq!(p.lives, START_LIVES);
    }

    #[test]
    fn jump_rises_then_lands() {
        let mut p = Player::new();
        assert!(p.jump());
        assert!(!p.jump()); // already airborne
        let start_y = p.y;
        let mut peak = p.y;
        for _ in 0..60 {
            p.tick();
            peak = peak.min(p.y);
        }
        assert_eq!(peak, start_y - JUMP_HEIGHT as i32);
        assert_eq!(p.y, start_y);
        assert!(p.on_ground());
    }

    #[test]
    fn walk_respects_move_rate_and_walls() {
        let mut p = Player::new();
        p.walk(Facing::Left);
        assert_eq!(p.x, START_X - 1);
        p.walk(Facing::Left); // still cooling down
        assert_eq!(p.x, START_X - 1);
        for _ in 0..20 {
            p.tick();
            p.walk(Facing::Left);
        }
        assert_eq!(p.x, 1); // stopped by the left wall
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn hurt_below_zero_is_dead() {
        let mut p = Player::new();
        for _ in 0..=START_LIVES {
            p.hurt();
        }
        assert_eq!(p.lives, -1);
        assert!(p.is_dead());
        assert!(p.is_invulnerable());
    }

    #[test]
    fn bolt_range_extends_while_held() {
        let mut short = Bolt::new(5, 3, Facing::Right);
        let mut steps = 0;
        while short.tick(false) {
            steps += 1;
        }
        assert_eq!(steps, BOLT_MIN_RANGE);

        let mut long = Bolt::new(2, 3, Facing::Right);
        while long.tick(true) {}
        assert_eq!(long.range(), BOLT_MAX_RANGE);
    }

    #[test]
    fn bolt_stops_at_wall() {
        let mut b = Bolt::new(25, 3, Facing::Right);
        assert!(b.tick(false)); // x = 26
        assert!(!b.tick(false)); // x = 27 is the wall
    }

    #[test]
    fn crossing_counts_shared_and_swapped_cells() {
        assert!(crossed((3, 5), (3, 5), (3, 5), (3, 4)));
        assert!(crossed((3, 15), (3, 16), (3, 16), (3, 15)));
        assert!(!crossed((3, 15), (3, 16), (3, 17), (3, 16)));
        assert!(!crossed((4, 5), (3, 5), (3, 6), (3, 5)));
    }

    #[test]
    fn ticks_remember_the_previous_cell() {
        let mut b = Bolt::new(5, 3, Facing::Left);
        b.tick(false);
        assert_eq!((b.prev, b.x), ((5, 3), 4));

        let mut d = Debris::new(2, 4);
        d.tick();
        assert_eq!(d.prev, (2, 4));
        while d.y == 4 {
            d.tick();
        }
        assert_eq!(d.prev, (2, 4));
    }

    #[test]
    fn debris_falls_and_shatters_on_floor() {
        let mut d = Debris::new(2, 14);
        let mut frames = 0;
        while d.tick() {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(d.y, 16);
    }
}
