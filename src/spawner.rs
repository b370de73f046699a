//! Initial alien layout, bullet factories and the alien fire-selection policy.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{
    Alien, Bullet, BulletOwner, Player, ALIEN_BULLET_SPEED, ALIEN_HEIGHT, ALIEN_WIDTH,
    BULLET_HEIGHT, BULLET_WIDTH, PLAYER_BULLET_SPEED,
};

// ── Grid layout ───────────────────────────────────────────────────────────────

pub const ALIEN_ROWS: usize = 4;
pub const ALIEN_COLS: usize = 8;
pub const ALIEN_COUNT: usize = ALIEN_ROWS * ALIEN_COLS;

const GRID_ORIGIN_X: f32 = 80.0;
const GRID_ORIGIN_Y: f32 = 50.0;
const GRID_SPACING_X: f32 = 60.0;
const GRID_SPACING_Y: f32 = 40.0;

/// Chance per tick that some living alien fires.
pub const ALIEN_FIRE_CHANCE: f64 = 0.01;

/// Right edge of the rightmost grid column.
pub fn grid_right() -> f32 {
    GRID_ORIGIN_X + (ALIEN_COLS - 1) as f32 * GRID_SPACING_X + ALIEN_WIDTH
}

/// Bottom edge of the lowest grid row.
pub fn grid_bottom() -> f32 {
    GRID_ORIGIN_Y + (ALIEN_ROWS - 1) as f32 * GRID_SPACING_Y + ALIEN_HEIGHT
}

/// Build the full 4×8 grid, row-major, every alien alive.
pub fn spawn_alien_grid() -> Vec<Alien> {
    (0..ALIEN_ROWS)
        .flat_map(|row| {
            (0..ALIEN_COLS).map(move |col| Alien {
                x: GRID_ORIGIN_X + col as f32 * GRID_SPACING_X,
                y: GRID_ORIGIN_Y + row as f32 * GRID_SPACING_Y,
                width: ALIEN_WIDTH,
                height: ALIEN_HEIGHT,
                alive: true,
            })
        })
        .collect()
}

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Upward bullet centred on the player's midpoint, starting at its top edge.
pub fn spawn_player_bullet(player: &Player) -> Bullet {
    Bullet {
        x: player.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
        y: player.y,
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
        speed: PLAYER_BULLET_SPEED,
        owner: BulletOwner::Player,
    }
}

/// Downward bullet centred on the alien's midpoint, starting at its bottom edge.
pub fn spawn_alien_bullet(alien: &Alien) -> Bullet {
    Bullet {
        x: alien.x + alien.width / 2.0 - BULLET_WIDTH / 2.0,
        y: alien.y + alien.height,
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
        speed: ALIEN_BULLET_SPEED,
        owner: BulletOwner::Alien,
    }
}

// ── Fire selection ────────────────────────────────────────────────────────────

/// Pick one living alien uniformly at random. Dead aliens are never eligible.
pub fn choose_shooter<'a>(aliens: &'a [Alien], rng: &mut impl Rng) -> Option<&'a Alien> {
    let alive: Vec<&Alien> = aliens.iter().filter(|a| a.alive).collect();
    alive.choose(rng).copied()
}

/// Roll the per-tick fire chance and, on success, return a bullet from a
/// randomly chosen living alien.
pub fn maybe_alien_fire(aliens: &[Alien], rng: &mut impl Rng) -> Option<Bullet> {
    if !rng.gen_bool(ALIEN_FIRE_CHANCE) {
        return None;
    }
    choose_shooter(aliens, rng).map(spawn_alien_bullet)
}
