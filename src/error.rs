//! Errors surfaced to the caller. Both kinds are recoverable: an invalid
//! field is rejected before a session exists, and a session that refuses a
//! tick can always be reset.

use thiserror::Error;

use crate::session::SessionPhase;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GameError {
    /// `tick` or `fire` was called while the session was not running.
    #[error("session is not running (phase: {phase:?})")]
    InvalidState { phase: SessionPhase },

    #[error("invalid field configuration: {reason}")]
    Configuration { reason: String },
}
