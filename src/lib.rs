//! Alien Defense: a small fixed-grid shooter.
//!
//! The library holds the whole simulation and knows nothing about
//! terminals; the binary in `main.rs` supplies input and rendering.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod session;
pub mod spawner;

pub use config::FieldConfig;
pub use entities::{GameStatus, Intents, World};
pub use error::GameError;
pub use session::{Session, SessionPhase, Shape, ShapeKind, Snapshot};
