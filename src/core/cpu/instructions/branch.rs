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
    // === Branch Instructions ===

    /// Handle BRANCH instructions (BEQ, BNE, BLT, BGE, BLTU, BGEU)
    ///
    /// Compares rs1 and rs2 per funct3. A taken branch adds the signed
    /// B-immediate to the PC; a not-taken branch advances by 4. The target
    /// is not checked for alignment here: a misaligned target faults at the
    /// next fetch.
    ///
    /// # Errors
    ///
    /// `Exception::IllegalInstruction` for the two undefined funct3
    /// encodings (0b010 and 0b011).
    pub(super) fn execute_branch(&mut self, instruction: u32) -> Result<(), Exception> {
        let a = self.reg(decode::rs1(instruction));
        let b = self.reg(decode::rs2(instruction));

        let taken = match decode::funct3(instruction) {
            0b000 => a == b,                     // BEQ
            0b001 => a != b,                     // BNE
            0b100 => (a as i32) < (b as i32),    // BLT
            0b101 => (a as i32) >= (b as i32),   // BGE
            0b110 => a < b,                      // BLTU
            0b111 => a >= b,                     // BGEU
            _ => return Err(Exception::IllegalInstruction { instruction }),
        };

        if taken {
            self.pc = self.pc.wrapping_add(decode::imm_b(instruction));
        } else {
            self.pc = self.pc.wrapping_add(4);
        }
        Ok(())
    }
}
