//! JSON-lines journal of session events.
//!
//! Diagnostic output only: the journal is append-only and nothing reads it
//! back. Sessions cannot be replayed from it.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    /// Session-relative timestamp.
    t_ms: u64,
    session: u32,
    event: &'a GameEvent,
}

pub struct EventLog {
    out: BufWriter<File>,
    buf: Vec<u8>,
}

impl EventLog {
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            buf: Vec::with_capacity(256),
        })
    }

    /// Append one event as a single JSON line.
    pub fn record(&mut self, session: u32, t_ms: u64, event: &GameEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(
            &mut self.buf,
            &EventRecord {
                t_ms,
                session,
                event,
            },
        )?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
