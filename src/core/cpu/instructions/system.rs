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

use super::super::decode;
use super::super::CPU;
use crate::core::error::Exception;

impl CPU {
    // === System Instructions ===

    /// FENCE / FENCE.I (MISC-MEM opcode)
    ///
    /// A single in-order hart with no caches has nothing to order, so both
    /// fences retire as no-ops. funct3 values above 001 are undefined.
    ///
    /// Format: fence pred, succ
    pub(super) fn op_fence(&mut self, instruction: u32) -> Result<(), Exception> {
        match decode::funct3(instruction) {
            0b000 | 0b001 => {
                log::trace!(
                    "FENCE 0x{:08X} at PC=0x{:08X} (no-op)",
                    instruction,
                    self.pc
                );
                self.pc = self.pc.wrapping_add(4);
                Ok(())
            }
            _ => Err(Exception::IllegalInstruction { instruction }),
        }
    }

    /// ECALL / EBREAK / CSR* (SYSTEM opcode)
    ///
    /// This machine implements no privileged architecture, so SYSTEM
    /// instructions retire as no-ops. funct3=100 is the one encoding the
    /// opcode leaves undefined.
    pub(super) fn op_system(&mut self, instruction: u32) -> Result<(), Exception> {
        match decode::funct3(instruction) {
            0b100 => Err(Exception::IllegalInstruction { instruction }),
            _ => {
                log::trace!(
                    "SYSTEM 0x{:08X} at PC=0x{:08X} (no-op)",
                    instruction,
                    self.pc
                );
                self.pc = self.pc.wrapping_add(4);
                Ok(())
            }
        }
    }
}
