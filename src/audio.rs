//! Sound effects through rodio.
//!
//! Session events go through a [`SoundQueue`]; every resulting request is
//! appended to one [`Sink`], which plays its sources back to back. A clear of
//! N rows therefore sounds N clips in sequence, each finishing before the next.

use std::time::Duration;

use anyhow::{Context, Result};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::core::{PlaybackRequest, SoundEffect, SoundQueue};
use crate::types::GameEvent;

/// Length of one clear-line clip.
const CLEAR_LINE_CLIP: Duration = Duration::from_millis(120);
const CLEAR_LINE_HZ: f32 = 880.0;
const VOLUME: f32 = 0.2;

/// Open output. The stream must outlive the sink or playback stops.
struct Output {
    _stream: OutputStream,
    sink: Sink,
}

pub struct AudioPlayer {
    queue: SoundQueue,
    output: Option<Output>,
}

impl AudioPlayer {
    /// Open the default output device.
    ///
    /// A muted player, or one without a usable device, accepts events and
    /// plays nothing.
    pub fn open(muted: bool) -> Self {
        let output = if muted {
            None
        } else {
            match open_output() {
                Ok(output) => Some(output),
                Err(err) => {
                    log::warn!("audio disabled: {err:#}");
                    None
                }
            }
        };
        Self {
            queue: SoundQueue::new(),
            output,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.output.is_none()
    }

    /// Feed one session event; any resulting clips are queued on the sink in order.
    pub fn on_event(&mut self, event: &GameEvent) {
        self.queue.on_event(event);
        while let Some(req) = self.queue.next_request() {
            if let Some(output) = &self.output {
                output.sink.append(clip(req));
            }
        }
    }

    /// Clips appended but not yet finished.
    pub fn pending(&self) -> usize {
        self.output.as_ref().map_or(0, |o| o.sink.len())
    }
}

fn open_output() -> Result<Output> {
    let (stream, handle) = OutputStream::try_default().context("open audio output")?;
    let sink = Sink::try_new(&handle).context("create audio sink")?;
    Ok(Output {
        _stream: stream,
        sink,
    })
}

/// Synthesized clip for one request.
fn clip(req: PlaybackRequest) -> impl Source<Item = f32> + Send + 'static {
    match req.effect {
        SoundEffect::ClearLine => SineWave::new(CLEAR_LINE_HZ)
            .take_duration(CLEAR_LINE_CLIP)
            .amplify(VOLUME),
    }
}
