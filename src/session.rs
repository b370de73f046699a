//! Game session controller.
//!
//! A `Session` exclusively owns the world and the RNG.  The host calls
//! [`Session::tick`] at whatever cadence it likes; once the world reaches a
//! terminal status further ticks are refused until [`Session::reset`].

use rand::Rng;

use crate::compute::{advance, fire, init_state};
use crate::config::FieldConfig;
use crate::entities::{BulletOwner, GameStatus, Intents, World};
use crate::error::GameError;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Won,
    Lost,
}

impl SessionPhase {
    /// Text a renderer shows once the game is over.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SessionPhase::Won => Some("You Win!"),
            SessionPhase::Lost => Some("Game Over!"),
            SessionPhase::Idle | SessionPhase::Running => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Won | SessionPhase::Lost)
    }
}

// ── Render view ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Player,
    Alien,
    PlayerBullet,
    AlienBullet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rect: Rect,
    pub alive: bool,
}

/// Read-only picture of a session, everything a renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub field: FieldConfig,
    pub shapes: Vec<Shape>,
    pub score: u32,
    pub lives: u32,
    pub phase: SessionPhase,
}

impl Snapshot {
    fn of(world: &World, phase: SessionPhase) -> Self {
        let player = Shape {
            kind: ShapeKind::Player,
            rect: world.player.rect(),
            alive: world.player.alive,
        };
        let aliens = world.aliens.iter().map(|a| Shape {
            kind: ShapeKind::Alien,
            rect: a.rect(),
            alive: a.alive,
        });
        let bullets = world.bullets.iter().map(|b| Shape {
            kind: match b.owner {
                BulletOwner::Player => ShapeKind::PlayerBullet,
                BulletOwner::Alien => ShapeKind::AlienBullet,
            },
            rect: b.rect(),
            alive: true,
        });

        Snapshot {
            field: world.field,
            shapes: std::iter::once(player).chain(aliens).chain(bullets).collect(),
            score: world.score,
            lives: world.lives,
            phase,
        }
    }

    pub fn shapes_of(&self, kind: ShapeKind) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |s| s.kind == kind)
    }
}

// ── Controller ───────────────────────────────────────────────────────────────

pub struct Session<R: Rng> {
    world: World,
    phase: SessionPhase,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// An idle session.  The world is laid out but nothing advances until
    /// [`Session::start`].
    pub fn new(field: FieldConfig, rng: R) -> Self {
        Session {
            world: init_state(field),
            phase: SessionPhase::Idle,
            rng,
        }
    }

    /// Lay out a fresh world and begin play.  Calling this on a session that
    /// has already started behaves like [`Session::reset`].
    pub fn start(&mut self) {
        self.world = init_state(self.world.field);
        self.phase = SessionPhase::Running;
        log::info!("session started");
    }

    /// Discard the current world and start over from any phase.
    pub fn reset(&mut self) {
        let previous = self.phase;
        self.start();
        log::info!("session reset from {previous:?}");
    }

    /// Spawn one player bullet right away.
    pub fn fire(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        self.world = fire(&self.world);
        Ok(())
    }

    /// Apply the fire request (if any), then advance the world by one tick.
    pub fn tick(&mut self, intents: Intents, fire_requested: bool) -> Result<Snapshot, GameError> {
        self.ensure_running()?;

        let world = if fire_requested {
            fire(&self.world)
        } else {
            self.world.clone()
        };
        self.world = advance(&world, intents, &mut self.rng);

        self.phase = match self.world.status {
            GameStatus::Running => SessionPhase::Running,
            GameStatus::Won => {
                log::info!("all aliens destroyed, final score {}", self.world.score);
                SessionPhase::Won
            }
            GameStatus::Lost => {
                log::info!("player out of lives, final score {}", self.world.score);
                SessionPhase::Lost
            }
        };

        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.world, self.phase)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.phase == SessionPhase::Running {
            Ok(())
        } else {
            log::warn!("rejected input while {:?}", self.phase);
            Err(GameError::InvalidState { phase: self.phase })
        }
    }
}
