// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for proxy interception events.

use std::fmt::{Display, Formatter};

/// A trace line was skipped because rendering failed.
///
/// # Log Level
/// `debug!` - expected recovery path; the traced operation still ran
///
/// # Example
/// ```
/// use tracewrap::observability::messages::proxy::TraceLineSkipped;
/// use tracewrap::FormatError;
///
/// let error = FormatError::Name("accessor failed".into());
/// let msg = TraceLineSkipped {
///     op: "to_s",
///     error: &error,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct TraceLineSkipped<'a> {
    pub op: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TraceLineSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Trace line for operation '{}' skipped: {}",
            self.op, self.error
        )
    }
}

/// A rendered trace line could not be appended to the sink.
///
/// # Log Level
/// `warn!` - the sink is misbehaving but tracing continues
///
/// # Example
/// ```
/// use tracewrap::observability::messages::proxy::SinkWriteFailed;
/// use tracewrap::FormatError;
///
/// let error = FormatError::Sink(std::io::Error::new(
///     std::io::ErrorKind::BrokenPipe,
///     "stream closed",
/// ));
/// let msg = SinkWriteFailed {
///     op: "to_s",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct SinkWriteFailed<'a> {
    pub op: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SinkWriteFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Sink write for operation '{}' failed: {}",
            self.op, self.error
        )
    }
}
