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
    // === Shift Instructions ===
    //
    // Every shift uses only the low 5 bits of its amount operand, whether
    // the amount comes from a register or the immediate.

    /// SLL: Shift Left Logical
    ///
    /// Shifts rs1 left by the amount in the lower 5 bits of rs2.
    ///
    /// Format: sll rd, rs1, rs2
    /// Operation: rd = rs1 << (rs2 & 0x1F)
    pub(super) fn op_sll(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let shamt = self.reg(rs2) & 0x1F;
        let result = self.reg(rs1) << shamt;
        self.set_reg(rd, result);
    }

    /// SRL: Shift Right Logical (zero-fill)
    ///
    /// Shifts rs1 right by the amount in the lower 5 bits of rs2, filling
    /// with zeros.
    ///
    /// Format: srl rd, rs1, rs2
    /// Operation: rd = rs1 >> (rs2 & 0x1F)
    pub(super) fn op_srl(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let shamt = self.reg(rs2) & 0x1F;
        let result = self.reg(rs1) >> shamt;
        self.set_reg(rd, result);
    }

    /// SRA: Shift Right Arithmetic (sign-extend)
    ///
    /// Shifts rs1 right by the amount in the lower 5 bits of rs2,
    /// replicating the sign bit. Encoded as OP funct3=101 with bit 30 set.
    ///
    /// Format: sra rd, rs1, rs2
    /// Operation: rd = rs1 >>s (rs2 & 0x1F)
    pub(super) fn op_sra(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let shamt = self.reg(rs2) & 0x1F;
        let result = ((self.reg(rs1) as i32) >> shamt) as u32;
        self.set_reg(rd, result);
    }

    /// SLLI: Shift Left Logical Immediate
    ///
    /// The shift amount is immediate bits [4:0].
    ///
    /// Format: slli rd, rs1, shamt
    /// Operation: rd = rs1 << shamt
    pub(super) fn op_slli(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let shamt = decode::imm_i(instruction) & 0x1F;
        let result = self.reg(rs1) << shamt;
        self.set_reg(rd, result);
    }

    /// SRLI: Shift Right Logical Immediate (zero-fill)
    ///
    /// Format: srli rd, rs1, shamt
    /// Operation: rd = rs1 >> shamt
    pub(super) fn op_srli(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let shamt = decode::imm_i(instruction) & 0x1F;
        let result = self.reg(rs1) >> shamt;
        self.set_reg(rd, result);
    }

    /// SRAI: Shift Right Arithmetic Immediate (sign-extend)
    ///
    /// Distinguished from SRLI by bit 30 of the instruction.
    ///
    /// Format: srai rd, rs1, shamt
    /// Operation: rd = rs1 >>s shamt
    pub(super) fn op_srai(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let shamt = decode::imm_i(instruction) & 0x1F;
        let result = ((self.reg(rs1) as i32) >> shamt) as u32;
        self.set_reg(rd, result);
    }
}
