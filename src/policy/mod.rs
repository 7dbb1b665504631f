// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Trace configuration: caller-supplied overrides and the resolved policy.
//!
//! Configuration flows one way. The caller hands [`TraceOptions`] (every field
//! optional) to the wrap call; [`TracePolicy::resolve`] merges them over fixed
//! defaults exactly once; the resulting policy is reused for every operation
//! on that proxy without re-resolution.
//!
//! Options can be built programmatically or loaded from a YAML document, where
//! unrecognized keys are rejected up front (see [`TraceOptions::from_yaml`]).
//! Two knobs cannot be expressed in text and are applied to the resolved
//! policy instead: a custom sink object and an accessor-based name strategy.
//!
//! # Example
//! ```yaml
//! as: request
//! caller: false
//! indent: false
//! stream: stdout
//! ```

use std::fmt;

use serde::Deserialize;

use crate::errors::{ConfigurationError, FormatError};
use crate::sink::{StderrSink, StdoutSink, TraceSink};

/// Zero-argument name accessor invoked against the target.
pub type NameFn<T> = Box<dyn Fn(&T) -> Result<String, FormatError>>;

/// How the traced target is rendered in a trace line.
pub enum NamedBy<T> {
    /// The target's short runtime type name. Default.
    TypeName,
    /// A zero-argument accessor invoked on the target; its result is the name
    /// segment. Accessor failures skip the line, never the operation.
    Accessor(NameFn<T>),
    /// A fixed string, verbatim (the `as` key).
    Literal(String),
}

impl<T> NamedBy<T> {
    /// Name strategy backed by an accessor closure.
    pub fn accessor(f: impl Fn(&T) -> Result<String, FormatError> + 'static) -> Self {
        NamedBy::Accessor(Box::new(f))
    }
}

/// Named standard stream for the `stream` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Stderr,
    Stdout,
}

/// Caller-supplied overrides, merged over the defaults at wrap time.
///
/// Recognized keys:
///
/// | key      | effect                                      | default  |
/// |----------|---------------------------------------------|----------|
/// | `as`     | literal name for the target in trace lines  | type name|
/// | `caller` | append the call-site suffix                 | `true`   |
/// | `step`   | block on stdin after each logged line       | `false`  |
/// | `indent` | indent lines by call-stack depth            | `true`   |
/// | `stream` | `stderr` or `stdout`                        | `stderr` |
///
/// A programmatic sink (set via [`TraceOptions::sink`]) wins over `stream`.
///
/// In text form `as` is always a literal; accessor-based naming cannot be
/// expressed in YAML and is set on the resolved policy with
/// [`NamedBy::accessor`] instead.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceOptions {
    #[serde(rename = "as")]
    pub name: Option<String>,
    pub caller: Option<bool>,
    pub step: Option<bool>,
    pub indent: Option<bool>,
    pub stream: Option<StreamKind>,
    #[serde(skip)]
    pub sink: Option<Box<dyn TraceSink>>,
}

impl TraceOptions {
    /// No overrides; resolving these yields the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an options document, rejecting unrecognized keys.
    ///
    /// # Errors
    /// [`ConfigurationError::UnknownKey`] for a key outside the recognized
    /// set, [`ConfigurationError::Parse`] for anything else serde refuses.
    pub fn from_yaml(doc: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(doc).map_err(classify)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn caller(mut self, on: bool) -> Self {
        self.caller = Some(on);
        self
    }

    pub fn step(mut self, on: bool) -> Self {
        self.step = Some(on);
        self
    }

    pub fn indent(mut self, on: bool) -> Self {
        self.indent = Some(on);
        self
    }

    pub fn stream(mut self, stream: StreamKind) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }
}

/// The sink object has no useful debug rendering; show whether one is set.
impl fmt::Debug for TraceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceOptions")
            .field("name", &self.name)
            .field("caller", &self.caller)
            .field("step", &self.step)
            .field("indent", &self.indent)
            .field("stream", &self.stream)
            .field("sink", &self.sink.as_ref().map(|_| "..."))
            .finish()
    }
}

/// serde reports a rejected key as "unknown field `key`, expected ..."; pull
/// the key back out so the error names it directly.
fn classify(err: serde_yaml::Error) -> ConfigurationError {
    let text = err.to_string();
    if let Some(start) = text.find("unknown field `") {
        let rest = &text[start + "unknown field `".len()..];
        if let Some(end) = rest.find('`') {
            return ConfigurationError::UnknownKey {
                key: rest[..end].to_string(),
            };
        }
    }
    ConfigurationError::Parse(err)
}

/// Resolved trace configuration.
///
/// Built once per wrap by [`TracePolicy::resolve`] and immutable for the
/// proxy's lifetime; the only mutation that ever reaches it afterwards is the
/// interior write each sink append performs.
pub struct TracePolicy<T> {
    pub named_by: NamedBy<T>,
    pub show_call_site: bool,
    pub step_mode: bool,
    pub indent: bool,
    pub(crate) sink: Box<dyn TraceSink>,
}

impl<T> Default for TracePolicy<T> {
    fn default() -> Self {
        Self {
            named_by: NamedBy::TypeName,
            show_call_site: true,
            step_mode: false,
            indent: true,
            sink: Box::new(StderrSink),
        }
    }
}

impl<T> TracePolicy<T> {
    /// Merges caller overrides onto the defaults. Pure value construction;
    /// called exactly once per wrap.
    pub fn resolve(options: TraceOptions) -> Self {
        let mut policy = Self::default();
        if let Some(name) = options.name {
            policy.named_by = NamedBy::Literal(name);
        }
        if let Some(caller) = options.caller {
            policy.show_call_site = caller;
        }
        if let Some(step) = options.step {
            policy.step_mode = step;
        }
        if let Some(indent) = options.indent {
            policy.indent = indent;
        }
        if let Some(stream) = options.stream {
            policy.sink = match stream {
                StreamKind::Stderr => Box::new(StderrSink),
                StreamKind::Stdout => Box::new(StdoutSink),
            };
        }
        if let Some(sink) = options.sink {
            policy.sink = sink;
        }
        policy
    }

    /// Replaces the name strategy. Pre-wrap setter for the accessor naming
    /// that text config cannot express.
    pub fn named_by(mut self, named_by: NamedBy<T>) -> Self {
        self.named_by = named_by;
        self
    }

    /// Replaces the sink.
    pub fn sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }
}
