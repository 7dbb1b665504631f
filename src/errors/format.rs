// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while rendering or writing a single trace line.
//!
//! These never escape the proxy. The offending line is skipped, a diagnostic
//! is emitted through `tracing`, and the traced operation proceeds untouched.

use thiserror::Error;

/// Error type for trace line rendering and sink writes.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The caller-supplied name accessor failed against the target.
    #[error("name accessor failed: {0}")]
    Name(String),

    /// Assembling the line text failed.
    #[error("trace line rendering failed: {0}")]
    Render(#[from] std::fmt::Error),

    /// The rendered line could not be appended to the sink.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}
