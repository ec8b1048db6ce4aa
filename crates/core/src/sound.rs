//! Sound queue - ordered playback requests derived from session events
//!
//! The core never plays audio. An audio collaborator feeds every drained
//! [`GameEvent`] into a [`SoundQueue`] and then pops requests one at a time,
//! finishing each playback before starting the next. A clear of N rows turns
//! into N back-to-back `ClearLine` requests.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEffect {
    ClearLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackRequest {
    pub effect: SoundEffect,
}

#[derive(Debug, Clone, Default)]
pub struct SoundQueue {
    pending: VecDeque<PlaybackRequest>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue the playback requests an event calls for (possibly none).
    pub fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::LinesCleared(count) = *event {
            for _ in 0..count {
                self.pending.push_back(PlaybackRequest {
                    effect: SoundEffect::ClearLine,
                });
            }
        }
    }

    /// Next request in arrival order.
    pub fn next_request(&mut self) -> Option<PlaybackRequest> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn one_request_per_cleared_line() {
        let mut queue = SoundQueue::new();
        queue.on_event(&GameEvent::LinesCleared(3));
        assert_eq!(queue.len(), 3);
        while let Some(req) = queue.next_request() {
            assert_eq!(req.effect, SoundEffect::ClearLine);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn other_events_are_silent() {
        let mut queue = SoundQueue::new();
        queue.on_event(&GameEvent::PieceSpawned(PieceKind::T));
        queue.on_event(&GameEvent::ScoreChanged(100));
        queue.on_event(&GameEvent::GameOver(100));
        assert!(queue.is_empty());
    }

    #[test]
    fn clears_queue_in_arrival_order() {
        let mut queue = SoundQueue::new();
        queue.on_event(&GameEvent::LinesCleared(1));
        queue.on_event(&GameEvent::LinesCleared(2));
        assert_eq!(queue.len(), 3);
        assert!(queue.next_request().is_some());
        assert_eq!(queue.len(), 2);
    }
}
