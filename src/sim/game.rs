/// Game: one cavern session.
///
/// Debris drops from the ceiling on a shrinking interval. The player (when
/// present) dodges it or shoots it down. Without a player the session runs
/// as an attract-mode backdrop for the menu.
///
/// Per-frame order inside `update`:
///   1. timer
///   2. player control + movement
///   3. bolts
///   4. debris
///   5. collisions
///   6. spawning

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::input::InputState;
use crate::sim::entity::{self, Bolt, Debris, Facing, Player};
use crate::sim::tile::{self, ARENA_H, ARENA_W};
use crate::sim::{Session, Status};
use crate::ui::Canvas;

const MAX_BOLTS: usize = 3;
const DEBRIS_POINTS: u32 = 10;
const FIRST_DROP: u32 = 20;
const DROP_MIN: u32 = 10;
const DROP_MAX: u32 = 40;
/// Frames per one-frame reduction of the drop interval.
const DROP_RAMP: u64 = 600;

pub struct Game {
    pub player: Option<Player>,
    pub timer: u64,
    pub score: u32,
    pub debris: Vec<Debris>,
    pub bolts: Vec<Bolt>,
    next_drop: u32,
    sounds: Vec<&'static str>,
    rng: StdRng,
}

impl Game {
    pub fn new(player: Option<Player>, rng: StdRng) -> Self {
        Game {
            player,
            timer: 0,
            score: 0,
            debris: Vec::new(),
            bolts: Vec::new(),
            next_drop: FIRST_DROP,
            sounds: Vec::new(),
            rng,
        }
    }

    #[cfg(test)]
    pub fn seeded(player: Option<Player>, seed: u64) -> Self {
        Game::new(player, StdRng::seed_from_u64(seed))
    }

    fn update_player(&mut self, input: &InputState) {
        let Some(player) = self.player.as_mut() else { return };
        if player.is_dead() {
            return;
        }

        if input.left && !input.right {
            player.walk(Facing::Left);
        } else if input.right && !input.left {
            player.walk(Facing::Right);
        }

        if input.jump_pressed && player.jump() {
            self.sounds.push("jump");
        }

        if input.fire_pressed && self.bolts.len() < MAX_BOLTS {
            let dir = player.facing;
            self.bolts.push(Bolt::new(player.x, player.y, dir));
            self.sounds.push("fire");
        }

        player.tick();
    }

    /// `player_prev` is the player's cell at the start of the frame.
    fn resolve_hits(&mut self, player_prev: Option<(i32, i32)>) {
        // bolt vs debris
        let mut popped = 0;
        self.bolts.retain(|b| {
            let hit = self
                .debris
                .iter()
                .position(|d| entity::crossed((b.x, b.y), b.prev, (d.x, d.y), d.prev));
            match hit {
                Some(i) => {
                    self.debris.swap_remove(i);
                    popped += 1;
                    false
                }
                None => true,
            }
        });
        for _ in 0..popped {
            self.score += DEBRIS_POINTS;
            self.sounds.push("pop");
        }

        // debris vs player
        let Some(player) = self.player.as_mut() else { return };
        if player.is_dead() || player.is_invulnerable() {
            return;
        }
        let now = (player.x, player.y);
        let prev = player_prev.unwrap_or(now);
        if let Some(i) = self
            .debris
            .iter()
            .position(|d| entity::crossed(now, prev, (d.x, d.y), d.prev))
        {
            self.debris.swap_remove(i);
            player.hurt();
            self.sounds.push("hurt");
        }
    }

    fn spawn_debris(&mut self) {
        if self.next_drop > 0 {
            self.next_drop -= 1;
            return;
        }
        let x = self.rng.gen_range(1..ARENA_W as i32 - 1);
        self.debris.push(Debris::new(x, 1));
        let max = self.drop_max();
        self.next_drop = self.rng.gen_range(DROP_MIN..=max);
    }

    fn drop_max(&self) -> u32 {
        let ramp = (self.timer / DROP_RAMP).min(u32::MAX as u64) as u32;
        DROP_MAX.saturating_sub(ramp).max(DROP_MIN)
    }
}

impl Session for Game {
    fn idle() -> Self {
        Game::new(None, StdRng::from_entropy())
    }

    fn with_player() -> Self {
        Game::new(Some(Player::new()), StdRng::from_entropy())
    }

    fn update(&mut self, input: &InputState) {
        self.timer += 1;
        let player_prev = self.player.as_ref().map(|p| (p.x, p.y));
        self.update_player(input);

        let held = input.fire_held;
        self.bolts.retain_mut(|b| b.tick(held));
        self.debris.retain_mut(|d| d.tick());

        self.resolve_hits(player_prev);
        self.spawn_debris();
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for y in 0..ARENA_H as i32 {
            for x in 0..ARENA_W as i32 {
                if let Some(sprite) = tile::tile_at(x, y).sprite() {
                    canvas.blit(sprite, tile::to_canvas(x, y));
                }
            }
        }
        for d in &self.debris {
            canvas.blit("debris", tile::to_canvas(d.x, d.y));
        }
        for b in &self.bolts {
            canvas.blit("bolt", tile::to_canvas(b.x, b.y));
        }
        if let Some(p) = &self.player {
            let blink = p.is_invulnerable() && (p.hurt_timer / 3) % 2 == 0;
            let sprite = match (blink, p.facing) {
                (true, _) => "player_hurt",
                (false, Facing::Left) => "player_l",
                (false, Facing::Right) => "player_r",
            };
            canvas.blit(sprite, tile::to_canvas(p.x, p.y));
        }
    }

    fn play_sound(&mut self, name: &'static str) {
        self.sounds.push(name);
    }

    fn drain_sounds(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.sounds)
    }

    fn player_lives(&self) -> Option<i32> {
        self.player.as_ref().map(|p| p.lives)
    }

    fn timer(&self) -> u64 {
        self.timer
    }

    fn status(&self) -> Status {
        Status {
            score: self.score,
            lives: self.player_lives(),
        }
    }
}
