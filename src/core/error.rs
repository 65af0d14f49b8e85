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

//! Emulator error types

use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Architectural exceptions raised by the hart
///
/// Every variant is fatal to the hart loop: there is no trap handler in this
/// machine. The offending address or instruction word is carried so the
/// failure can be reported.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    /// PC was not a multiple of 4 at instruction fetch
    #[error("instruction address misaligned: PC=0x{address:08X}")]
    InstructionAddressMisaligned {
        /// The misaligned fetch address
        address: u32,
    },

    /// Data load not aligned to its access width
    #[error("misaligned {}-bit load at address 0x{address:08X}", .size * 8)]
    LoadAddressMisaligned {
        /// The address that was accessed
        address: u32,
        /// The access width in bytes (2 or 4)
        size: u32,
    },

    /// Data store not aligned to its access width
    #[error("misaligned {}-bit store at address 0x{address:08X}", .size * 8)]
    StoreAddressMisaligned {
        /// The address that was accessed
        address: u32,
        /// The access width in bytes (2 or 4)
        size: u32,
    },

    /// Address maps to no region, or to a region that does not support the
    /// attempted operation (e.g. fetch from the UART)
    #[error("access fault at address 0x{address:08X}")]
    AccessFault {
        /// The faulting address
        address: u32,
    },

    /// Unknown opcode, or undefined funct3 within a known opcode
    #[error("illegal instruction 0x{instruction:08X}")]
    IllegalInstruction {
        /// The offending instruction word
        instruction: u32,
    },
}

/// Emulator error types
///
/// Host-level failures plus architectural exceptions, so a `?` chain from
/// the CPU core up through `System` and the binary needs no manual
/// conversion.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// The hart raised a fatal architectural exception
    #[error(transparent)]
    Exception(#[from] Exception),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Program image error
    #[error("program image error: {0}")]
    Loader(String),

    /// The program image does not fit in RAM
    #[error("program image too large: RAM holds {capacity} bytes, image is {got} bytes")]
    ImageTooLarge {
        /// RAM capacity in bytes
        capacity: usize,
        /// Actual image size in bytes
        got: usize,
    },

    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_display() {
        let e = Exception::AccessFault {
            address: 0xDEAD_0000,
        };
        assert_eq!(e.to_string(), "access fault at address 0xDEAD0000");

        let e = Exception::LoadAddressMisaligned {
            address: 0x0000_0001,
            size: 4,
        };
        assert_eq!(e.to_string(), "misaligned 32-bit load at address 0x00000001");
    }

    #[test]
    fn test_exception_converts_to_emulator_error() {
        fn fails() -> Result<()> {
            Err(Exception::IllegalInstruction {
                instruction: 0xFFFF_FFFF,
            })?;
            Ok(())
        }
        assert!(matches!(
            fails(),
            Err(EmulatorError::Exception(Exception::IllegalInstruction { .. }))
        ));
    }
}
