// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod errors;  // error handling
pub mod format;  // trace line rendering
pub mod observability;
pub mod policy;  // overrides + resolved policy
pub mod proxy;   // interception core
pub mod sink;    // trace line destinations

pub use errors::{ConfigurationError, FormatError};
pub use policy::{NamedBy, StreamKind, TraceOptions, TracePolicy};
pub use proxy::TraceProxy;
pub use sink::{MemorySink, StderrSink, StdoutSink, TraceSink, WriterSink};
