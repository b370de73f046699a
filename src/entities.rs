//! All game entity types — pure data, no logic beyond their bounding boxes.

use crate::config::FieldConfig;
use crate::geometry::Rect;

// ── Fixed dimensions ──────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 7.0;
/// Distance from the bottom of the field to the player's top edge.
pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

pub const ALIEN_WIDTH: f32 = 40.0;
pub const ALIEN_HEIGHT: f32 = 25.0;

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 10.0;
pub const PLAYER_BULLET_SPEED: f32 = 7.0;
/// Deliberately slower than player fire.
pub const ALIEN_BULLET_SPEED: f32 = 3.0;

pub const STARTING_LIVES: u32 = 3;
pub const SCORE_PER_ALIEN: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    /// Travels up the field.
    Player,
    /// Travels down the field.
    Alien,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units per tick, always positive; direction comes from `owner`.
    pub speed: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Player & aliens ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Player {
    /// A live player horizontally centred near the bottom of `field`.
    pub fn spawn(field: &FieldConfig) -> Self {
        Player {
            x: field.width() / 2.0 - PLAYER_WIDTH / 2.0,
            y: field.height() - PLAYER_BOTTOM_OFFSET,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Dead aliens stay in the grid as inert records.
    pub alive: bool,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Sustained movement input for one tick. Fire is a separate, discrete event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    /// Always the full grid; only the `alive` flags change.
    pub aliens: Vec<Alien>,
    /// Bullets from both sides, told apart by `owner`.
    pub bullets: Vec<Bullet>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Number of ticks advanced so far.
    pub frame: u64,
    pub field: FieldConfig,
}

impl World {
    pub fn alive_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    pub fn bullets_of(&self, owner: BulletOwner) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(move |b| b.owner == owner)
    }
}
