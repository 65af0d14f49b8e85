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
    // === Jump Instructions ===

    /// JAL: Jump And Link
    ///
    /// Saves the return address (PC + 4) in rd, then jumps PC-relative by
    /// the signed J-immediate. With rd=x0 this is a plain jump.
    ///
    /// Format: jal rd, offset
    /// Operation: rd = pc + 4; pc = pc + sign_extend(offset)
    pub(super) fn op_jal(&mut self, instruction: u32) -> Result<(), Exception> {
        let rd = decode::rd(instruction);
        self.set_reg(rd, self.pc.wrapping_add(4));
        self.pc = self.pc.wrapping_add(decode::imm_j(instruction));
        Ok(())
    }

    /// JALR: Jump And Link Register
    ///
    /// Saves the return address (PC + 4) in rd, then jumps to rs1 plus the
    /// signed I-immediate with the low bit cleared. The target register is
    /// read before the link write so `jalr rd, rd` behaves correctly.
    ///
    /// Format: jalr rd, offset(rs1)
    /// Operation: rd = pc + 4; pc = (rs1 + sign_extend(offset)) & !1
    pub(super) fn op_jalr(&mut self, instruction: u32) -> Result<(), Exception> {
        let rd = decode::rd(instruction);
        let rs1 = decode::rs1(instruction);
        let target = self.reg(rs1).wrapping_add(decode::imm_i(instruction)) & !1;
        self.set_reg(rd, self.pc.wrapping_add(4));
        self.pc = target;
        Ok(())
    }
}
