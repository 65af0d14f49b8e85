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

//! CPU instruction implementations
//!
//! This module contains all RV32I instruction implementations, organized by
//! instruction class for better maintainability.

use super::decode::{self, opcodes};
use super::CPU;
use crate::core::error::Exception;
use crate::core::memory::Bus;

// Instruction modules organized by class
mod arithmetic;
mod branch;
mod jump;
mod load;
mod logical;
mod shift;
mod store;
mod system;

impl CPU {
    /// Decode and execute the current instruction
    ///
    /// Dispatches on the opcode (bits [6:0]); the per-class handlers refine
    /// on funct3. Every handler either advances the PC itself or returns an
    /// exception before touching architectural state.
    ///
    /// # Errors
    ///
    /// `Exception::IllegalInstruction` for an unknown opcode, plus whatever
    /// the individual handlers raise.
    pub(super) fn execute_instruction(&mut self, bus: &mut Bus) -> Result<(), Exception> {
        let instruction = self.current_instruction;

        match decode::opcode(instruction) {
            opcodes::OP => self.execute_op(instruction),
            opcodes::OP_IMM => self.execute_op_imm(instruction),
            opcodes::LUI => self.op_lui(instruction),
            opcodes::AUIPC => self.op_auipc(instruction),
            opcodes::JAL => self.op_jal(instruction),
            opcodes::JALR => self.op_jalr(instruction),
            opcodes::BRANCH => self.execute_branch(instruction),
            opcodes::LOAD => self.execute_load(instruction, bus),
            opcodes::STORE => self.execute_store(instruction, bus),
            opcodes::MISC_MEM => self.op_fence(instruction),
            opcodes::SYSTEM => self.op_system(instruction),
            opcode => {
                log::error!(
                    "Illegal opcode 0b{:07b} at PC=0x{:08X}",
                    opcode,
                    self.pc
                );
                Err(Exception::IllegalInstruction { instruction })
            }
        }
    }

    /// Handle OP instructions (register-register ALU)
    ///
    /// funct3 selects the operation; bit 30 distinguishes ADD/SUB and
    /// SRL/SRA. All eight funct3 encodings are defined for OP.
    fn execute_op(&mut self, instruction: u32) -> Result<(), Exception> {
        let rs1 = decode::rs1(instruction);
        let rs2 = decode::rs2(instruction);
        let rd = decode::rd(instruction);
        let special = decode::special(instruction);

        match decode::funct3(instruction) {
            0b000 if special => self.op_sub(rs1, rs2, rd), // SUB
            0b000 => self.op_add(rs1, rs2, rd),            // ADD
            0b001 => self.op_sll(rs1, rs2, rd),            // SLL
            0b010 => self.op_slt(rs1, rs2, rd),            // SLT
            0b011 => self.op_sltu(rs1, rs2, rd),           // SLTU
            0b100 => self.op_xor(rs1, rs2, rd),            // XOR
            0b101 if special => self.op_sra(rs1, rs2, rd), // SRA
            0b101 => self.op_srl(rs1, rs2, rd),            // SRL
            0b110 => self.op_or(rs1, rs2, rd),             // OR
            0b111 => self.op_and(rs1, rs2, rd),            // AND
            _ => return Err(Exception::IllegalInstruction { instruction }),
        }

        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }

    /// Handle OP-IMM instructions (register-immediate ALU)
    ///
    /// Same operation table as OP with rs2 replaced by the I-immediate.
    /// funct3=000 is always ADDI regardless of bit 30 (SUB has no immediate
    /// form); for funct3=101 bit 30 selects SRAI over SRLI.
    fn execute_op_imm(&mut self, instruction: u32) -> Result<(), Exception> {
        let special = decode::special(instruction);

        match decode::funct3(instruction) {
            0b000 => self.op_addi(instruction),             // ADDI
            0b001 => self.op_slli(instruction),             // SLLI
            0b010 => self.op_slti(instruction),             // SLTI
            0b011 => self.op_sltiu(instruction),            // SLTIU
            0b100 => self.op_xori(instruction),             // XORI
            0b101 if special => self.op_srai(instruction),  // SRAI
            0b101 => self.op_srli(instruction),             // SRLI
            0b110 => self.op_ori(instruction),              // ORI
            0b111 => self.op_andi(instruction),             // ANDI
            _ => return Err(Exception::IllegalInstruction { instruction }),
        }

        self.pc = self.pc.wrapping_add(4);
        Ok(())
    }
}
