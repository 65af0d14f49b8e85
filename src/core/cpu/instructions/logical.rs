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

impl CPU {
    // === Logical Instructions ===

    /// AND: Bitwise AND
    ///
    /// Format: and rd, rs1, rs2
    /// Operation: rd = rs1 & rs2
    pub(super) fn op_and(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let result = self.reg(rs1) & self.reg(rs2);
        self.set_reg(rd, result);
    }

    /// OR: Bitwise OR
    ///
    /// Format: or rd, rs1, rs2
    /// Operation: rd = rs1 | rs2
    pub(super) fn op_or(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let result = self.reg(rs1) | self.reg(rs2);
        self.set_reg(rd, result);
    }

    /// XOR: Bitwise Exclusive OR
    ///
    /// Format: xor rd, rs1, rs2
    /// Operation: rd = rs1 ^ rs2
    pub(super) fn op_xor(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let result = self.reg(rs1) ^ self.reg(rs2);
        self.set_reg(rd, result);
    }

    /// ANDI: Bitwise AND with Immediate
    ///
    /// The immediate is sign-extended, so the upper bits participate.
    ///
    /// Format: andi rd, rs1, imm
    /// Operation: rd = rs1 & sign_extend(imm)
    pub(super) fn op_andi(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let result = self.reg(rs1) & decode::imm_i(instruction);
        self.set_reg(rd, result);
    }

    /// ORI: Bitwise OR with Immediate
    ///
    /// Format: ori rd, rs1, imm
    /// Operation: rd = rs1 | sign_extend(imm)
    pub(super) fn op_ori(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let result = self.reg(rs1) | decode::imm_i(instruction);
        self.set_reg(rd, result);
    }

    /// XORI: Bitwise Exclusive OR with Immediate
    ///
    /// Format: xori rd, rs1, imm
    /// Operation: rd = rs1 ^ sign_extend(imm)
    pub(super) fn op_xori(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let result = self.reg(rs1) ^ decode::imm_i(instruction);
        self.set_reg(rd, result);
    }
}
