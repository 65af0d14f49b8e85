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
use crate::core::memory::Bus;

impl CPU {
    // === Store Instructions ===

    /// Handle STORE instructions (SB, SH, SW)
    ///
    /// The effective address is rs1 plus the signed S-immediate. funct3
    /// selects how many of rs2's low bytes are written. A bus exception
    /// propagates before the PC advances.
    ///
    /// # Errors
    ///
    /// Alignment and access faults from the bus, and
    /// `Exception::IllegalInstruction` for undefined funct3 encodings.
    pub(super) fn execute_store(
        &mut self,
        instruction: u32,
        bus: &mut Bus,
    ) -> Result<(), Exception> {
        let addr = self
            .reg(decode::rs1(instruction))
            .wrapping_add(decode::imm_s(instruction));
        let value = self.reg(decode::rs2(instruction));

        match decode::funct3(instruction) {
            0b000 => bus.store(addr, 1, value)?, // SB
            0b001 => bus.store(addr, 2, value)?, // SH
            0b010 => bus.store(addr, 4, value)?, // SW
            _ => return Err(Exception::IllegalInstruction { instruction }),
        }

        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }
}
