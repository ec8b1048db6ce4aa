//! Scoring module - line-clear points
//!
//! One clear event awards a fixed amount by the number of rows it removed:
//! 1 → 100, 2 → 200, 3 → 400, 4 → 800. There are no drop points, levels,
//! combos or back-to-back bonuses, and the score never decreases.

use crate::types::LINE_SCORES;

/// Points for a single clear event of `lines` rows (0 outside 1..=4).
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Running score and line total for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    lines: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this session.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Add the points for one clear event and return the delta.
    pub fn register_clear(&mut self, lines: usize) -> u32 {
        let delta = line_clear_points(lines);
        if delta > 0 {
            self.score = self.score.saturating_add(delta);
            self.lines = self.lines.saturating_add(lines as u32);
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 200);
        assert_eq!(line_clear_points(3), 400);
        assert_eq!(line_clear_points(4), 800);
        assert_eq!(line_clear_points(5), 0);
    }

    #[test]
    fn test_register_clear_accumulates() {
        let mut tracker = ScoreTracker::new();
        assert_eq!(tracker.register_clear(1), 100);
        assert_eq!(tracker.register_clear(4), 800);
        assert_eq!(tracker.score(), 900);
        assert_eq!(tracker.lines(), 5);
    }

    #[test]
    fn test_register_zero_is_noop() {
        let mut tracker = ScoreTracker::new();
        tracker.register_clear(2);
        let before = tracker;
        assert_eq!(tracker.register_clear(0), 0);
        assert_eq!(tracker, before);
    }

    #[test]
    fn test_score_is_non_decreasing() {
        let mut tracker = ScoreTracker::new();
        let mut last = tracker.score();
        for lines in [0, 3, 0, 1, 2, 4, 0, 1] {
            tracker.register_clear(lines);
            assert!(tracker.score() >= last);
            last = tracker.score();
        }
        assert_eq!(last, 400 + 100 + 200 + 800 + 100);
    }
}
