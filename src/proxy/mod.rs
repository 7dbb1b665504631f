// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The interception core: a forwarding wrapper that observes every operation
//! routed through it.
//!
//! [`TraceProxy`] owns the wrapped target and stands in for it. Each
//! operation goes through [`TraceProxy::call`] (or [`TraceProxy::call_mut`])
//! with an operation name, its arguments as `Debug` values, and a closure
//! performing the real work against the target. The proxy consults its policy
//! and predicate, optionally emits one trace line, optionally pauses for
//! user input, and then always runs the closure and returns its result
//! verbatim. Logging can never fail, mask, or alter the forwarded operation.
//!
//! Tracing follows the proxy, not the value: [`TraceProxy::into_inner`] moves
//! the target back out, and operations on the returned value are no longer
//! observed.
//!
//! # Example
//! ```
//! use tracewrap::{trace_args, MemorySink, TraceOptions, TracePolicy, TraceProxy};
//!
//! let sink = MemorySink::new();
//! let options = TraceOptions::new().caller(false).indent(false).sink(sink.clone());
//! let mut count = TraceProxy::wrap(3i32, TracePolicy::resolve(options));
//!
//! let binary = count.call("to_s", trace_args!(2), |n| format!("{n:b}"));
//! assert_eq!(binary, "11");
//! assert_eq!(sink.contents(), "# i32.to_s(2)\n");
//! ```

use std::fmt;
use std::panic::Location;

use crate::errors::FormatError;
use crate::format;
use crate::observability::messages::proxy::{SinkWriteFailed, TraceLineSkipped};
use crate::policy::TracePolicy;


/// Filter deciding whether a given invocation is logged.
///
/// Receives the target, the operation name, and the argument list; returns a
/// real `bool` (there is no truthiness here). Supplied once at wrap time,
/// never replaced.
pub type Predicate<T> = Box<dyn Fn(&T, &str, &[&dyn fmt::Debug]) -> bool>;

/// Builds the argument list for [`TraceProxy::call`] from debuggable values.
///
/// ```
/// use tracewrap::trace_args;
///
/// let args: &[&dyn std::fmt::Debug] = trace_args!(1, "two");
/// assert_eq!(format!("{args:?}"), "[1, \"two\"]");
/// ```
#[macro_export]
macro_rules! trace_args {
    () => { &[] as &[&dyn ::std::fmt::Debug] };
    ($($arg:expr),+ $(,)?) => { &[$(&$arg as &dyn ::std::fmt::Debug),+] };
}

/// A forwarding wrapper observing the operations routed through it.
pub struct TraceProxy<T> {
    target: T,
    policy: TracePolicy<T>,
    predicate: Option<Predicate<T>>,
    enabled: bool,
}

impl<T> TraceProxy<T> {
    /// Wraps `target` behind a tracing proxy with the given policy.
    ///
    /// The proxy takes ownership of the target and starts enabled.
    pub fn wrap(target: T, policy: TracePolicy<T>) -> Self {
        Self {
            target,
            policy,
            predicate: None,
            enabled: true,
        }
    }

    /// Wraps `target` with a predicate filtering which invocations are
    /// logged. The predicate only gates logging; filtered operations are
    /// still forwarded.
    pub fn wrap_filtered(
        target: T,
        policy: TracePolicy<T>,
        predicate: impl Fn(&T, &str, &[&dyn fmt::Debug]) -> bool + 'static,
    ) -> Self {
        Self {
            target,
            policy,
            predicate: Some(Box::new(predicate)),
            enabled: true,
        }
    }

    /// Routes one read-only operation through the proxy.
    ///
    /// Logs per policy, then runs `invoke` against the target and returns its
    /// result verbatim. An `Err` or panic from `invoke` propagates exactly as
    /// if the target had been called directly.
    #[track_caller]
    pub fn call<R>(
        &mut self,
        op: &str,
        args: &[&dyn fmt::Debug],
        invoke: impl FnOnce(&T) -> R,
    ) -> R {
        self.observe(op, args, Location::caller());
        invoke(&self.target)
    }

    /// Routes one mutating operation through the proxy.
    #[track_caller]
    pub fn call_mut<R>(
        &mut self,
        op: &str,
        args: &[&dyn fmt::Debug],
        invoke: impl FnOnce(&mut T) -> R,
    ) -> R {
        self.observe(op, args, Location::caller());
        invoke(&mut self.target)
    }

    /// Re-enables logging. Idempotent, never logged itself.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disables logging without tearing down the proxy. Operations are still
    /// forwarded while disabled. Idempotent, never logged itself.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Shared access to the wrapped target, bypassing interception.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Unwraps the proxy. Tracing stops here: operations on the returned
    /// value are no longer observed.
    pub fn into_inner(self) -> T {
        self.target
    }

    /// The interception pipeline: gate on the enabled flag and predicate,
    /// render and append one line (failures swallowed), honor step mode,
    /// and let the caller forward regardless of any of it.
    fn observe(&mut self, op: &str, args: &[&dyn fmt::Debug], call_site: &Location<'_>) {
        if !self.enabled {
            return;
        }
        if let Some(predicate) = &self.predicate {
            if !predicate(&self.target, op, args) {
                return;
            }
        }

        let written = match format::render(&self.policy, &self.target, op, args, call_site) {
            Ok(line) => self.policy.sink.append(&line).map_err(FormatError::Sink),
            Err(error) => Err(error),
        };
        match written {
            Ok(()) => {}
            Err(error @ FormatError::Sink(_)) => {
                tracing::warn!("{}", SinkWriteFailed { op, error: &error });
            }
            Err(error) => {
                tracing::debug!("{}", TraceLineSkipped { op, error: &error });
            }
        }

        if self.policy.step_mode {
            wait_for_input();
        }
    }
}

impl<T: fmt::Debug> TraceProxy<T> {
    /// The target's own debug rendering, without generating a trace line.
    ///
    /// Kept off the interception path so describing a traced value cannot
    /// recurse into formatting.
    pub fn inspect(&self) -> String {
        format!("{:?}", self.target)
    }
}

/// Printing a proxy prints the target. Never traced.
impl<T: fmt::Debug> fmt::Debug for TraceProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.target.fmt(f)
    }
}

/// Equality compares the wrapped targets. Never traced.
impl<T: PartialEq> PartialEq for TraceProxy<T> {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

/// The single-step gate: blocks until the user sends a line on stdin. A read
/// failure (closed stdin) falls through rather than wedging the traced
/// program.
fn wait_for_input() {
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}
