// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Trace line destinations.
//!
//! A sink is the narrowest thing the proxy can write to: a single append-text
//! operation, never read back. The default is the process standard-error
//! stream; tests and embedders typically hand the proxy a [`MemorySink`] and
//! inspect its contents afterwards.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Append-only text destination for rendered trace lines.
///
/// The proxy writes whole lines (newline included) through `append` and never
/// performs any other operation on the sink.
pub trait TraceSink {
    fn append(&mut self, text: &str) -> io::Result<()>;
}

/// The default sink: process standard error.
#[derive(Debug, Default)]
pub struct StderrSink;

impl TraceSink for StderrSink {
    fn append(&mut self, text: &str) -> io::Result<()> {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        handle.write_all(text.as_bytes())?;
        handle.flush()
    }
}

/// Sink writing to process standard output (`stream: stdout`).
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn append(&mut self, text: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
        handle.flush()
    }
}

/// Adapter turning any [`io::Write`] into a sink.
#[derive(Debug)]
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> TraceSink for WriterSink<W> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.0.write_all(text.as_bytes())?;
        self.0.flush()
    }
}

/// Shared in-memory sink.
///
/// Cheap to clone; every clone observes the same buffer, so one clone can be
/// handed to the proxy while another is kept around to read the captured
/// lines.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far.
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards the captured lines.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        // A poisoned lock only means another clone panicked mid-append; the
        // buffer itself is still a valid String.
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TraceSink for MemorySink {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.lock().push_str(text);
        Ok(())
    }
}
