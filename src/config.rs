//! Play-field dimensions, validated once at construction.

use crate::entities::{PLAYER_BOTTOM_OFFSET, PLAYER_WIDTH};
use crate::error::GameError;
use crate::spawner::{grid_bottom, grid_right};

pub const DEFAULT_FIELD_WIDTH: f32 = 600.0;
pub const DEFAULT_FIELD_HEIGHT: f32 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    width: f32,
    height: f32,
}

impl FieldConfig {
    /// Reject fields that are degenerate or too small to hold the alien grid
    /// with the player's row underneath it.
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(GameError::Configuration {
                reason: format!("dimensions must be positive, got {width}x{height}"),
            });
        }

        let min_width = grid_right().max(PLAYER_WIDTH);
        if width < min_width {
            return Err(GameError::Configuration {
                reason: format!("width {width} is narrower than the alien grid ({min_width})"),
            });
        }

        let min_height = grid_bottom() + PLAYER_BOTTOM_OFFSET;
        if height < min_height {
            return Err(GameError::Configuration {
                reason: format!(
                    "height {height} leaves no room for the player below the alien grid \
                     (need at least {min_height})"
                ),
            });
        }

        Ok(FieldConfig { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
        }
    }
}
