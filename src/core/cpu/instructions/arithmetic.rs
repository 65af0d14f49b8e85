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
    // === Arithmetic Instructions ===

    /// ADD: Add
    ///
    /// Adds two registers. Overflow wraps around (modulo 2^32); RV32I has
    /// no overflow traps.
    ///
    /// Format: add rd, rs1, rs2
    /// Operation: rd = rs1 + rs2
    pub(super) fn op_add(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let result = self.reg(rs1).wrapping_add(self.reg(rs2));
        self.set_reg(rd, result);
    }

    /// SUB: Subtract
    ///
    /// Subtracts rs2 from rs1, wrapping modulo 2^32. Encoded as OP
    /// funct3=000 with bit 30 set.
    ///
    /// Format: sub rd, rs1, rs2
    /// Operation: rd = rs1 - rs2
    pub(super) fn op_sub(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let result = self.reg(rs1).wrapping_sub(self.reg(rs2));
        self.set_reg(rd, result);
    }

    /// ADDI: Add Immediate
    ///
    /// Adds the sign-extended I-immediate to rs1, wrapping modulo 2^32.
    /// Bit 30 has no meaning here: funct3=000 under OP-IMM is always ADDI.
    ///
    /// Format: addi rd, rs1, imm
    /// Operation: rd = rs1 + sign_extend(imm)
    pub(super) fn op_addi(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let imm = decode::imm_i(instruction);
        let result = self.reg(rs1).wrapping_add(imm);
        self.set_reg(rd, result);
    }

    /// SLT: Set on Less Than (signed)
    ///
    /// Compares two registers as signed integers.
    /// Sets rd to 1 if rs1 < rs2, otherwise 0.
    ///
    /// Format: slt rd, rs1, rs2
    /// Operation: rd = (rs1 <s rs2) ? 1 : 0
    pub(super) fn op_slt(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let a = self.reg(rs1) as i32;
        let b = self.reg(rs2) as i32;
        let result = if a < b { 1 } else { 0 };
        self.set_reg(rd, result);
    }

    /// SLTU: Set on Less Than Unsigned
    ///
    /// Compares two registers as unsigned integers.
    /// Sets rd to 1 if rs1 < rs2, otherwise 0.
    ///
    /// Format: sltu rd, rs1, rs2
    /// Operation: rd = (rs1 <u rs2) ? 1 : 0
    pub(super) fn op_sltu(&mut self, rs1: u8, rs2: u8, rd: u8) {
        let a = self.reg(rs1);
        let b = self.reg(rs2);
        let result = if a < b { 1 } else { 0 };
        self.set_reg(rd, result);
    }

    /// SLTI: Set on Less Than Immediate (signed)
    ///
    /// Compares rs1 with the sign-extended immediate as signed integers.
    ///
    /// Format: slti rd, rs1, imm
    /// Operation: rd = (rs1 <s sign_extend(imm)) ? 1 : 0
    pub(super) fn op_slti(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let imm = decode::imm_i(instruction) as i32;
        let a = self.reg(rs1) as i32;
        let result = if a < imm { 1 } else { 0 };
        self.set_reg(rd, result);
    }

    /// SLTIU: Set on Less Than Immediate Unsigned
    ///
    /// The immediate is sign-extended first, then both operands compare as
    /// unsigned integers.
    ///
    /// Format: sltiu rd, rs1, imm
    /// Operation: rd = (rs1 <u sign_extend(imm)) ? 1 : 0
    pub(super) fn op_sltiu(&mut self, instruction: u32) {
        let rs1 = decode::rs1(instruction);
        let rd = decode::rd(instruction);
        let imm = decode::imm_i(instruction);
        let a = self.reg(rs1);
        let result = if a < imm { 1 } else { 0 };
        self.set_reg(rd, result);
    }

    /// LUI: Load Upper Immediate
    ///
    /// Places the U-immediate (instruction bits [31:12], low 12 bits zero)
    /// in rd.
    ///
    /// Format: lui rd, imm
    /// Operation: rd = imm << 12
    pub(super) fn op_lui(&mut self, instruction: u32) -> Result<(), Exception> {
        let rd = decode::rd(instruction);
        self.set_reg(rd, decode::imm_u(instruction));
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// AUIPC: Add Upper Immediate to PC
    ///
    /// Adds the U-immediate to the address of this instruction, producing a
    /// PC-relative value.
    ///
    /// Format: auipc rd, imm
    /// Operation: rd = pc + (imm << 12)
    pub(super) fn op_auipc(&mut self, instruction: u32) -> Result<(), Exception> {
        let rd = decode::rd(instruction);
        let result = self.pc.wrapping_add(decode::imm_u(instruction));
        self.set_reg(rd, result);
        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }
}
