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

//! Program image loading
//!
//! The loader reads a memory image file as raw bytes and hands it to the
//! system, which copies it verbatim into RAM starting at offset 0. There is
//! no header, relocation, checksum, or interpretation of any kind: the file
//! is the initial RAM content. Images larger than RAM are rejected rather
//! than truncated.

use std::path::Path;

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Bus;

/// Default image path when the command line names none
pub const DEFAULT_IMAGE_PATH: &str = "program.txt";

/// A raw program image destined for RAM offset 0
///
/// # Example
///
/// ```no_run
/// use rvx::core::loader::ProgramImage;
///
/// let image = ProgramImage::from_file("program.txt").unwrap();
/// assert!(image.len() <= 0x800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramImage {
    data: Vec<u8>,
}

impl ProgramImage {
    /// Read an image file
    ///
    /// # Errors
    ///
    /// - `EmulatorError::Loader` if the file cannot be read
    /// - `EmulatorError::ImageTooLarge` if the file exceeds RAM capacity
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            EmulatorError::Loader(format!("cannot read {}: {}", path.display(), e))
        })?;

        log::info!(
            "Program image {} ({} bytes)",
            path.display(),
            data.len()
        );

        Self::from_bytes(data)
    }

    /// Wrap raw bytes as an image, validating the size
    ///
    /// # Errors
    ///
    /// `EmulatorError::ImageTooLarge` if the bytes exceed RAM capacity.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() > Bus::RAM_SIZE {
            return Err(EmulatorError::ImageTooLarge {
                capacity: Bus::RAM_SIZE,
                got: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Image contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Image size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
