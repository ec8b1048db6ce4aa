//! Game session - the per-tick state machine
//!
//! A session owns one grid, the active piece, a one-piece lookahead, the score
//! and the fall scheduler. It is driven from outside by two entry points that
//! are never called concurrently:
//!
//! - [`GameSession::tick`] with a caller-supplied millisecond timestamp
//! - [`GameSession::apply_command`] with one discrete player command
//!
//! Whenever the active piece ends up resting on the floor or the stack, it is
//! locked: frozen into the grid, full rows are cleared and scored, and the
//! lookahead piece is spawned. If that spawn overlaps the stack (or sits above
//! the ceiling) the session moves to `GameOver` and ignores all further input.

use std::collections::VecDeque;

use crate::catalog::PieceCatalog;
use crate::config::{ConfigError, GameConfig};
use crate::fall::FallScheduler;
use crate::ghost::{self, GhostPiece};
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, RandomSource};
use crate::scoring::ScoreTracker;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Command, GameEvent, PieceKind, SessionState, BOARD_HEIGHT};

#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSource = RandomSource> {
    config: GameConfig,
    grid: Grid,
    active: ActivePiece,
    ghost: GhostPiece,
    next: PieceKind,
    source: S,
    score: ScoreTracker,
    fall: FallScheduler,
    state: SessionState,
    /// Pending events, oldest first (drained by collaborators).
    events: VecDeque<GameEvent>,
    pieces_spawned: u32,
}

impl GameSession<RandomSource> {
    /// Start a session on an empty grid with uniformly random pieces seeded from `config.seed`.
    pub fn new(config: GameConfig, now_ms: u64) -> Result<Self, ConfigError> {
        let source = RandomSource::new(config.seed);
        Self::with_source(config, source, now_ms)
    }
}

impl<S: PieceSource> GameSession<S> {
    /// Start a session on an empty grid with pieces from `source`.
    pub fn with_source(config: GameConfig, source: S, now_ms: u64) -> Result<Self, ConfigError> {
        Self::with_grid(config, Grid::new(), source, now_ms)
    }

    /// Start a session on a pre-filled grid.
    ///
    /// The first piece is spawned immediately and goes through the same
    /// overlap check as every later spawn, so a blocked spawn area yields a
    /// session that is already over. A grid with a row that is already full
    /// is rejected: one lock clears at most four rows.
    pub fn with_grid(
        config: GameConfig,
        grid: Grid,
        mut source: S,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(row) = (0..BOARD_HEIGHT as usize).find(|&y| grid.is_row_full(y)) {
            return Err(ConfigError::FullRowInGrid(row));
        }

        let first = source.next_piece();
        let next = source.next_piece();
        let template = PieceCatalog::template(first);
        let active = ActivePiece::spawn(template, config.spawn_x, config.spawn_y);
        let ghost = ghost::project(&grid, &active);

        let mut session = Self {
            config,
            grid,
            active,
            ghost,
            next,
            source,
            score: ScoreTracker::new(),
            fall: FallScheduler::new(config.fall, now_ms),
            state: SessionState::Active,
            events: VecDeque::new(),
            pieces_spawned: 0,
        };
        session.on_spawn();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn fall_interval_ms(&self) -> u64 {
        self.fall.interval_ms()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn ghost(&self) -> &GhostPiece {
        &self.ghost
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    /// Advance one frame.
    ///
    /// Applies gravity when the fall interval has elapsed (locking the piece if
    /// it is now resting), then lets the scheduler speed up, then refreshes the
    /// ghost. Returns true if gravity fired. A no-op once the game is over.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.is_game_over() {
            return false;
        }

        let stepped = self.fall.should_step(now_ms);
        if stepped {
            self.active.move_delta(&self.grid, 0, 1);
            if self.active.is_at_bottom(&self.grid) {
                self.lock();
                if self.is_game_over() {
                    return true;
                }
            }
        }

        if self.fall.maybe_speed_up(now_ms) {
            log::debug!("fall interval now {}ms", self.fall.interval_ms());
        }
        self.refresh_ghost();
        stepped
    }

    /// Apply one player command and return whether it was accepted.
    ///
    /// Rejected moves and rotations leave the piece untouched. After any
    /// command, a piece that rests on the floor or the stack is locked.
    pub fn apply_command(&mut self, command: Command) -> bool {
        if self.is_game_over() {
            return false;
        }

        let accepted = match command {
            Command::MoveLeft => self.active.move_delta(&self.grid, -1, 0),
            Command::MoveRight => self.active.move_delta(&self.grid, 1, 0),
            Command::SoftDrop => self.active.move_delta(&self.grid, 0, 1),
            Command::Rotate => self.active.rotate_cw(&self.grid),
            Command::HardDrop => {
                while self.active.move_delta(&self.grid, 0, 1) {}
                self.lock();
                return true;
            }
        };

        if self.active.is_at_bottom(&self.grid) {
            self.lock();
        } else {
            self.refresh_ghost();
        }
        accepted
    }

    /// Pop the oldest pending event.
    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Write the read model into an existing snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_matrix(&mut out.grid);
        out.active = PieceSnapshot::from(self.active);
        out.ghost = PieceSnapshot::ghost_of(self.active.kind, self.ghost);
        out.next = self.next;
        out.score = self.score.score();
        out.lines = self.score.lines();
        out.fall_interval_ms = self.fall.interval_ms();
        out.pieces_spawned = self.pieces_spawned;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Freeze the active piece, clear and score full rows, then spawn the next piece.
    fn lock(&mut self) {
        let piece = self.active;
        self.grid.freeze(&piece.shape, piece.kind, piece.x, piece.y);
        log::debug!("locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);

        let cleared = self.grid.clear_full_rows().len();
        if cleared > 0 {
            self.score.register_clear(cleared);
            self.events.push_back(GameEvent::LinesCleared(cleared as u8));
            self.events.push_back(GameEvent::ScoreChanged(self.score.score()));
            log::info!("cleared {} line(s), score {}", cleared, self.score.score());
        }

        let kind = std::mem::replace(&mut self.next, self.source.next_piece());
        self.active = ActivePiece::spawn(
            PieceCatalog::template(kind),
            self.config.spawn_x,
            self.config.spawn_y,
        );
        self.on_spawn();
    }

    /// Announce the freshly spawned active piece and run the game-over check.
    fn on_spawn(&mut self) {
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.events.push_back(GameEvent::PieceSpawned(self.active.kind));

        if self.active.is_blocked_at_spawn(&self.grid) {
            self.state = SessionState::GameOver;
            self.events.push_back(GameEvent::GameOver(self.score.score()));
            log::info!("game over, final score {}", self.score.score());
        }
        self.refresh_ghost();
    }

    fn refresh_ghost(&mut self) {
        self.ghost = ghost::project(&self.grid, &self.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    fn session_of(kinds: &[PieceKind]) -> GameSession<SequenceSource> {
        GameSession::with_source(GameConfig::default(), SequenceSource::new(kinds.to_vec()), 0)
            .unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::default(), 0).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.pieces_spawned(), 1);
        assert_eq!((session.active().x, session.active().y), (3, 0));
        assert_eq!(session.fall_interval_ms(), 800);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.fall.step_ms = 0;
        assert!(GameSession::new(config, 0).is_err());
    }

    #[test]
    fn test_first_spawn_emits_event() {
        let mut session = session_of(&[PieceKind::T, PieceKind::O]);
        assert_eq!(session.poll_event(), Some(GameEvent::PieceSpawned(PieceKind::T)));
        assert_eq!(session.poll_event(), None);
        assert_eq!(session.next(), PieceKind::O);
    }

    #[test]
    fn test_tick_before_interval_does_nothing() {
        let mut session = session_of(&[PieceKind::O]);
        assert!(!session.tick(799));
        assert_eq!(session.active().y, 0);
        assert!(session.tick(800));
        assert_eq!(session.active().y, 1);
    }

    #[test]
    fn test_gravity_locks_on_landing() {
        let mut session = session_of(&[PieceKind::O, PieceKind::T]);
        session.drain_events().for_each(drop);

        // O spawns at y = 0 and rests at y = 18 after 18 steps.
        let mut now = 0;
        for _ in 0..18 {
            now += 800;
            session.tick(now);
        }
        assert_eq!(session.active().kind, PieceKind::T);
        assert!(session.grid().is_occupied(3, 19));
        assert!(session.grid().is_occupied(4, 18));
        assert_eq!(
            session.drain_events().collect::<Vec<_>>(),
            vec![GameEvent::PieceSpawned(PieceKind::T)]
        );
    }

    #[test]
    fn test_next_piece_is_promoted() {
        let mut session = session_of(&[PieceKind::I, PieceKind::S, PieceKind::Z]);
        assert_eq!(session.next(), PieceKind::S);
        session.apply_command(Command::HardDrop);
        assert_eq!(session.active().kind, PieceKind::S);
        assert_eq!(session.next(), PieceKind::Z);
    }

    #[test]
    fn test_ghost_tracks_moves() {
        let mut session = session_of(&[PieceKind::O]);
        assert_eq!(session.ghost().y, 18);
        session.apply_command(Command::MoveRight);
        assert_eq!(session.ghost().x, 4);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = session_of(&[PieceKind::O]);
        for _ in 0..3 {
            assert!(session.apply_command(Command::MoveLeft));
        }
        session.drain_events().for_each(drop);
        let before = session.snapshot();
        assert!(!session.apply_command(Command::MoveLeft));
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.poll_event(), None);
    }

    #[test]
    fn test_soft_drop_locks_when_landing() {
        let mut session = session_of(&[PieceKind::O, PieceKind::I]);
        for _ in 0..17 {
            assert!(session.apply_command(Command::SoftDrop));
            assert_eq!(session.active().kind, PieceKind::O);
        }
        // Reaching y = 18 puts the piece on the floor and locks it.
        assert!(session.apply_command(Command::SoftDrop));
        assert_eq!(session.active().kind, PieceKind::I);
        assert_eq!(session.grid().occupied_count(), 4);
    }

    #[test]
    fn test_speed_up_during_ticks() {
        let mut session = session_of(&[PieceKind::O]);
        session.tick(15_000);
        assert_eq!(session.fall_interval_ms(), 700);
    }

    #[test]
    fn test_blocked_first_spawn_is_game_over() {
        let grid = Grid::from_rows(&[
            "...OO.....", ".........I", ".........I", ".........I", ".........I", ".........I",
            ".........I", ".........I", ".........I", ".........I", ".........I", ".........I",
            ".........I", ".........I", ".........I", ".........I", ".........I", ".........I",
            ".........I", ".........I",
        ]);
        let session = GameSession::with_grid(
            GameConfig::default(),
            grid,
            SequenceSource::repeat(PieceKind::O),
            0,
        )
        .unwrap();
        assert!(session.is_game_over());
    }

    #[test]
    fn test_grid_with_full_row_is_rejected() {
        let grid = Grid::from_rows(&["IIIIIIIIII", "IIIIIIIII."]);
        let err = GameSession::with_grid(
            GameConfig::default(),
            grid,
            SequenceSource::repeat(PieceKind::I),
            0,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::FullRowInGrid(18));
    }
}
