//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `World` (and, where needed, an RNG handle) and returns a brand-new
//! `World`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::config::FieldConfig;
use crate::entities::{
    Bullet, BulletOwner, GameStatus, Intents, Player, World, SCORE_PER_ALIEN, STARTING_LIVES,
};
use crate::geometry::overlaps;
use crate::spawner::{maybe_alien_fire, spawn_alien_grid, spawn_player_bullet};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh, running world for the given field.
pub fn init_state(field: FieldConfig) -> World {
    World {
        player: Player::spawn(&field),
        aliens: spawn_alien_grid(),
        bullets: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        status: GameStatus::Running,
        frame: 0,
        field,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire one bullet from the player's current position.
pub fn fire(state: &World) -> World {
    let mut bullets = state.bullets.clone();
    bullets.push(spawn_player_bullet(&state.player));
    World {
        bullets,
        ..state.clone()
    }
}

/// Apply movement intents.  Only one direction moves per tick and right wins
/// when both are held.
fn move_player(player: &Player, intents: Intents, field: &FieldConfig) -> Player {
    let mut player = player.clone();
    if intents.move_right && player.x < field.width() - player.width {
        player.x += player.speed;
    } else if intents.move_left && player.x > 0.0 {
        player.x -= player.speed;
    }
    player
}

/// Move every bullet along its direction and drop the ones that left the field.
fn move_bullets(bullets: &[Bullet], field: &FieldConfig) -> Vec<Bullet> {
    bullets
        .iter()
        .filter_map(|b| {
            let (y, inside) = match b.owner {
                BulletOwner::Player => {
                    let y = b.y - b.speed;
                    (y, y > 0.0)
                }
                BulletOwner::Alien => {
                    let y = b.y + b.speed;
                    (y, y < field.height())
                }
            };
            inside.then(|| Bullet { y, ..b.clone() })
        })
        .collect()
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A world that has already reached a terminal status is returned unchanged.
pub fn advance(state: &World, intents: Intents, rng: &mut impl Rng) -> World {
    if state.status.is_terminal() {
        return state.clone();
    }

    let frame = state.frame + 1;

    // ── 1. Player movement ───────────────────────────────────────────────────
    let mut player = move_player(&state.player, intents, &state.field);

    // ── 2 & 3. Move bullets, discarding those that exit the field ────────────
    let bullets = move_bullets(&state.bullets, &state.field);

    // ── 4. Collision: player bullets ↔ aliens ────────────────────────────────
    // Each bullet takes at most one alien; bullets are removed after the scan.
    let mut aliens = state.aliens.clone();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        if bullet.owner != BulletOwner::Player {
            continue;
        }
        let rect = bullet.rect();
        if let Some(alien) = aliens
            .iter_mut()
            .find(|a| a.alive && overlaps(&rect, &a.rect()))
        {
            alien.alive = false;
            used_bullets.push(bi);
            log::debug!("frame {frame}: alien at ({}, {}) destroyed", alien.x, alien.y);
        }
    }

    let score = state.score + used_bullets.len() as u32 * SCORE_PER_ALIEN;

    // ── 5. Collision: alien bullets ↔ player ─────────────────────────────────
    // Every overlapping bullet costs a life.  Alien bullets are not consumed by
    // a hit; they keep falling until they leave the field.
    let mut hit_bullets: Vec<usize> = Vec::new();

    if player.alive {
        let player_rect = player.rect();
        for (bi, bullet) in bullets.iter().enumerate() {
            if bullet.owner == BulletOwner::Alien && overlaps(&bullet.rect(), &player_rect) {
                hit_bullets.push(bi);
            }
        }
    }

    let lives = state.lives.saturating_sub(hit_bullets.len() as u32);
    if !hit_bullets.is_empty() {
        log::debug!(
            "frame {frame}: player hit by {} bullet(s), {lives} lives left",
            hit_bullets.len()
        );
    }

    let mut bullets: Vec<Bullet> = bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b)
        .collect();

    // ── 6. Terminal conditions ───────────────────────────────────────────────
    // The win check runs after the loss check, so clearing the grid on the
    // same tick the last life goes still ends in a win.
    if lives == 0 {
        player.alive = false;
    }
    let status = if aliens.iter().all(|a| !a.alive) {
        GameStatus::Won
    } else if lives == 0 {
        GameStatus::Lost
    } else {
        GameStatus::Running
    };

    // ── 7. Aliens randomly shoot ─────────────────────────────────────────────
    if status == GameStatus::Running {
        if let Some(bullet) = maybe_alien_fire(&aliens, rng) {
            log::debug!("frame {frame}: alien fires from ({}, {})", bullet.x, bullet.y);
            bullets.push(bullet);
        }
    }

    World {
        player,
        aliens,
        bullets,
        score,
        lives,
        status,
        frame,
        field: state.field,
    }
}
