// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced while parsing trace options.
//!
//! Configuration problems are fatal to the call that produced them: a proxy is
//! never constructed from invalid options, so a typo in an override key fails
//! loudly at wrap time rather than silently changing what gets logged.

use thiserror::Error;

/// Error type for the trace options surface.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// An override key that is not part of the recognized option set
    /// (`as`, `caller`, `step`, `indent`, `stream`).
    #[error("unrecognized trace option '{key}'")]
    UnknownKey {
        /// The offending key, verbatim from the options document.
        key: String,
    },

    /// The options document could not be deserialized at all.
    #[error("invalid trace options: {0}")]
    Parse(#[from] serde_yaml::Error),
}
