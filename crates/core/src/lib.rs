//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the board lives here: the grid,
//! piece templates, movement and rotation, gravity timing, scoring, and the
//! session state machine that ties them together. The crate does no I/O. It
//! never reads the clock either; callers pass millisecond timestamps in.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 occupancy matrix with row clearing
//! - [`catalog`]: the seven tetromino templates and uniform random selection
//! - [`piece`]: the active piece, collision and the rotation kick search
//! - [`ghost`]: landing projection of the active piece
//! - [`fall`]: gravity interval and periodic speed-up
//! - [`scoring`]: line-clear points
//! - [`session`]: [`GameSession`], driven by `tick` and `apply_command`
//! - [`snapshot`]: render read model
//! - [`sound`]: playback requests derived from session events
//! - [`config`]: validated session parameters
//! - [`rng`]: seeded generator and piece sources
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameSession};
//! use blockfall_core::types::{Command, GameEvent};
//!
//! let mut session = GameSession::new(GameConfig::default().with_seed(7), 0).unwrap();
//! assert!(matches!(session.poll_event(), Some(GameEvent::PieceSpawned(_))));
//!
//! session.apply_command(Command::MoveLeft);
//! session.apply_command(Command::HardDrop);
//! session.tick(16);
//!
//! assert_eq!(session.grid().occupied_count(), 4);
//! assert_eq!(session.score(), 0);
//! ```

pub mod catalog;
pub mod config;
pub mod fall;
pub mod ghost;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod sound;

pub use blockfall_types as types;

pub use catalog::{Piece, PieceCatalog, Shape};
pub use config::{ConfigError, FallConfig, GameConfig};
pub use fall::FallScheduler;
pub use ghost::GhostPiece;
pub use grid::{Grid, GridMatrix};
pub use piece::ActivePiece;
pub use rng::{PieceSource, RandomSource, SequenceSource, SimpleRng};
pub use scoring::{line_clear_points, ScoreTracker};
pub use session::GameSession;
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use sound::{PlaybackRequest, SoundEffect, SoundQueue};
