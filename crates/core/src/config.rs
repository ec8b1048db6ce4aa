//! Session configuration
//!
//! A `GameConfig` is built once, validated, and handed to the session by value.
//! Nothing inside the engine mutates it afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::PieceCatalog;
use crate::types::{
    PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FALL_REDUCTION_MS, INITIAL_FALL_MS, MIN_FALL_MS,
    SPAWN_X, SPAWN_Y, SPEEDUP_STEP_MS,
};

/// Gravity progression parameters (all milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallConfig {
    pub initial_ms: u64,
    pub min_ms: u64,
    pub reduction_ms: u64,
    pub step_ms: u64,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self {
            initial_ms: INITIAL_FALL_MS,
            min_ms: MIN_FALL_MS,
            reduction_ms: FALL_REDUCTION_MS,
            step_ms: SPEEDUP_STEP_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Column of the spawned piece's bounding box
    pub spawn_x: i8,
    /// Row of the spawned piece's bounding box
    pub spawn_y: i8,
    pub fall: FallConfig,
    /// Seed for the random piece source
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            fall: FallConfig::default(),
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum fall interval must be positive")]
    ZeroMinInterval,
    #[error("minimum fall interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    MinAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("speed-up step must be positive")]
    ZeroSpeedupStep,
    #[error("spawning {kind:?} at ({x}, {y}) puts cells outside the grid")]
    SpawnOutOfBounds { kind: PieceKind, x: i8, y: i8 },
    #[error("starting grid already has a full row at {0}")]
    FullRowInGrid(usize),
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fall = &self.fall;
        if fall.min_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if fall.min_ms > fall.initial_ms {
            return Err(ConfigError::MinAboveInitial {
                min_ms: fall.min_ms,
                initial_ms: fall.initial_ms,
            });
        }
        if fall.step_ms == 0 {
            return Err(ConfigError::ZeroSpeedupStep);
        }
        self.validate_spawn()
    }

    /// Every template must land inside the columns and above the floor.
    ///
    /// Rows above the ceiling are allowed; such a spawn ends the game.
    fn validate_spawn(&self) -> Result<(), ConfigError> {
        for piece in PieceCatalog::all() {
            let out = piece.shape.cells().any(|(dx, dy)| {
                let x = i16::from(self.spawn_x) + i16::from(dx);
                let y = i16::from(self.spawn_y) + i16::from(dy);
                !(0..BOARD_WIDTH as i16).contains(&x) || y >= BOARD_HEIGHT as i16
            });
            if out {
                return Err(ConfigError::SpawnOutOfBounds {
                    kind: piece.kind,
                    x: self.spawn_x,
                    y: self.spawn_y,
                });
            }
        }
        Ok(())
    }
}
