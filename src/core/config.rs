// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Emulator configuration
//!
//! An optional TOML file (`rvx.toml` by default) carries settings that
//! would otherwise clutter the command line. Command-line arguments always
//! take precedence over file values; a missing file just yields the
//! defaults.
//!
//! ```toml
//! program = "demo.bin"
//!
//! [trace]
//! file = "trace.log"
//! limit = 10000
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{EmulatorError, Result};

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "rvx.toml";

/// Execution trace settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TraceConfig {
    /// Trace output file; tracing is off when absent
    pub file: Option<String>,

    /// Stop tracing after this many instructions (0 = unlimited)
    #[serde(default)]
    pub limit: u64,
}

/// Emulator configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Program image path (overridden by the positional CLI argument)
    pub program: Option<String>,

    /// Execution trace settings
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// `EmulatorError::Config` if the TOML is malformed or has unexpected
    /// value types.
    ///
    /// # Example
    ///
    /// ```
    /// use rvx::core::config::Config;
    ///
    /// let config = Config::parse("program = \"demo.bin\"").unwrap();
    /// assert_eq!(config.program.as_deref(), Some("demo.bin"));
    /// assert!(config.trace.file.is_none());
    /// ```
    pub fn parse(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| EmulatorError::Config(e.to_string()))
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// `EmulatorError::Config` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            EmulatorError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&data)
    }

    /// Load the default configuration file if it exists
    ///
    /// A missing `rvx.toml` yields the default configuration; a present but
    /// malformed one is still an error, so a typo does not silently turn
    /// settings off.
    ///
    /// # Errors
    ///
    /// `EmulatorError::Config` if the file exists but cannot be parsed.
    pub fn load_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }
}
