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
    // === Load Instructions ===

    /// Handle LOAD instructions (LB, LH, LW, LBU, LHU)
    ///
    /// The effective address is rs1 plus the signed I-immediate. funct3
    /// selects the width and whether the value is sign- or zero-extended to
    /// 32 bits. A bus exception propagates before rd or the PC is touched.
    ///
    /// # Errors
    ///
    /// Alignment and access faults from the bus, and
    /// `Exception::IllegalInstruction` for the three undefined funct3
    /// encodings.
    pub(super) fn execute_load(
        &mut self,
        instruction: u32,
        bus: &mut Bus,
    ) -> Result<(), Exception> {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let addr = self.reg(rs1).wrapping_add(decode::imm_i(instruction));

        let value = match decode::funct3(instruction) {
            0b000 => bus.load(addr, 1, true)?,  // LB
            0b001 => bus.load(addr, 2, true)?,  // LH
            0b010 => bus.load(addr, 4, false)?, // LW
            0b100 => bus.load(addr, 1, false)?, // LBU
            0b101 => bus.load(addr, 2, false)?, // LHU
            _ => return Err(Exception::IllegalInstruction { instruction }),
        };

        self.set_reg(rd, value);
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }
}
