// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod format;

pub use config::ConfigurationError;
pub use format::FormatError;
