// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Internal diagnostics for the tracer itself.
//!
//! The trace lines the proxy produces are its product and go to the
//! caller-chosen sink; everything the tracer has to say about its own
//! behavior (a swallowed formatting failure, a misbehaving sink) goes through
//! `tracing` instead, using struct-based message types with a `Display`
//! implementation so log text lives in one place.

pub mod messages;
