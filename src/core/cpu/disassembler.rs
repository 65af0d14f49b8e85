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

//! RV32I instruction disassembler for debugging
//!
//! Converts binary instruction encodings to human-readable assembly
//! mnemonics for the execution tracer.

use super::decode::{self, opcodes};

/// Instruction disassembler
///
/// # Example
/// ```
/// use rvx::core::cpu::Disassembler;
///
/// let instruction = 0x300005B7; // LUI x11, 0x30000
/// let disasm = Disassembler::disassemble(instruction, 0x10000000);
/// assert_eq!(disasm, "lui x11, 0x30000");
/// ```
pub struct Disassembler;

impl Disassembler {
    /// Disassemble a single instruction to human-readable format
    ///
    /// # Arguments
    ///
    /// * `instruction` - The 32-bit instruction to disassemble
    /// * `pc` - Address of the instruction (used for branch/jump targets)
    pub fn disassemble(instruction: u32, pc: u32) -> String {
        let rd = decode::rd(instruction);
        let rs1 = decode::rs1(instruction);
        let rs2 = decode::rs2(instruction);

        match decode::opcode(instruction) {
            opcodes::OP => Self::disasm_op(instruction, rd, rs1, rs2),
            opcodes::OP_IMM => Self::disasm_op_imm(instruction, rd, rs1),
            opcodes::LUI => {
                format!("lui x{}, 0x{:X}", rd, decode::imm_u(instruction) >> 12)
            }
            opcodes::AUIPC => {
                format!("auipc x{}, 0x{:X}", rd, decode::imm_u(instruction) >> 12)
            }
            opcodes::JAL => {
                let target = pc.wrapping_add(decode::imm_j(instruction));
                format!("jal x{}, 0x{:08X}", rd, target)
            }
            opcodes::JALR => {
                format!(
                    "jalr x{}, {}(x{})",
                    rd,
                    decode::imm_i(instruction) as i32,
                    rs1
                )
            }
            opcodes::BRANCH => {
                let target = pc.wrapping_add(decode::imm_b(instruction));
                let mnemonic = match decode::funct3(instruction) {
                    0b000 => "beq",
                    0b001 => "bne",
                    0b100 => "blt",
                    0b101 => "bge",
                    0b110 => "bltu",
                    0b111 => "bgeu",
                    _ => return format!("illegal 0x{:08X}", instruction),
                };
                format!("{} x{}, x{}, 0x{:08X}", mnemonic, rs1, rs2, target)
            }
            opcodes::LOAD => {
                let mnemonic = match decode::funct3(instruction) {
                    0b000 => "lb",
                    0b001 => "lh",
                    0b010 => "lw",
                    0b100 => "lbu",
                    0b101 => "lhu",
                    _ => return format!("illegal 0x{:08X}", instruction),
                };
                format!(
                    "{} x{}, {}(x{})",
                    mnemonic,
                    rd,
                    decode::imm_i(instruction) as i32,
                    rs1
                )
            }
            opcodes::STORE => {
                let mnemonic = match decode::funct3(instruction) {
                    0b000 => "sb",
                    0b001 => "sh",
                    0b010 => "sw",
                    _ => return format!("illegal 0x{:08X}", instruction),
                };
                format!(
                    "{} x{}, {}(x{})",
                    mnemonic,
                    rs2,
                    decode::imm_s(instruction) as i32,
                    rs1
                )
            }
            opcodes::MISC_MEM => "fence".to_string(),
            opcodes::SYSTEM => match instruction {
                0x0000_0073 => "ecall".to_string(),
                0x0010_0073 => "ebreak".to_string(),
                _ => "system".to_string(),
            },
            _ => format!("illegal 0x{:08X}", instruction),
        }
    }

    /// Disassemble register-register ALU instructions
    fn disasm_op(instruction: u32, rd: u8, rs1: u8, rs2: u8) -> String {
        let special = decode::special(instruction);
        let mnemonic = match decode::funct3(instruction) {
            0b000 if special => "sub",
            0b000 => "add",
            0b001 => "sll",
            0b010 => "slt",
            0b011 => "sltu",
            0b100 => "xor",
            0b101 if special => "sra",
            0b101 => "srl",
            0b110 => "or",
            0b111 => "and",
            _ => return format!("illegal 0x{:08X}", instruction),
        };
        format!("{} x{}, x{}, x{}", mnemonic, rd, rs1, rs2)
    }

    /// Disassemble register-immediate ALU instructions
    fn disasm_op_imm(instruction: u32, rd: u8, rs1: u8) -> String {
        let special = decode::special(instruction);
        match decode::funct3(instruction) {
            0b001 | 0b101 => {
                let mnemonic = match decode::funct3(instruction) {
                    0b001 => "slli",
                    _ if special => "srai",
                    _ => "srli",
                };
                let shamt = decode::imm_i(instruction) & 0x1F;
                format!("{} x{}, x{}, {}", mnemonic, rd, rs1, shamt)
            }
            funct3 => {
                let mnemonic = match funct3 {
                    0b000 => "addi",
                    0b010 => "slti",
                    0b011 => "sltiu",
                    0b100 => "xori",
                    0b110 => "ori",
                    0b111 => "andi",
                    _ => return format!("illegal 0x{:08X}", instruction),
                };
                format!(
                    "{} x{}, x{}, {}",
                    mnemonic,
                    rd,
                    rs1,
                    decode::imm_i(instruction) as i32
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_boot_rom_head() {
        assert_eq!(
            Disassembler::disassemble(0x300005B7, 0x1000_0000),
            "lui x11, 0x30000"
        );
        assert_eq!(
            Disassembler::disassemble(0x00000613, 0x1000_0004),
            "addi x12, x0, 0"
        );
        assert_eq!(
            Disassembler::disassemble(0x028000EF, 0x1000_0008),
            "jal x1, 0x10000030"
        );
    }

    #[test]
    fn test_disassemble_alu() {
        // add x3, x1, x2 / sub x3, x1, x2
        assert_eq!(
            Disassembler::disassemble(0x002081B3, 0),
            "add x3, x1, x2"
        );
        assert_eq!(
            Disassembler::disassemble(0x402081B3, 0),
            "sub x3, x1, x2"
        );
    }

    #[test]
    fn test_disassemble_shift_immediates() {
        // slli x10, x10, 8
        assert_eq!(
            Disassembler::disassemble(0x00851513, 0),
            "slli x10, x10, 8"
        );
        // srai x5, x5, 4
        assert_eq!(
            Disassembler::disassemble(0x4042D293, 0),
            "srai x5, x5, 4"
        );
    }

    #[test]
    fn test_disassemble_memory_ops() {
        // lbu x10, 1(x11)
        assert_eq!(
            Disassembler::disassemble(0x0015C503, 0),
            "lbu x10, 1(x11)"
        );
        // sb x10, 0(x12)
        assert_eq!(
            Disassembler::disassemble(0x00A60023, 0),
            "sb x10, 0(x12)"
        );
    }

    #[test]
    fn test_disassemble_branch_target() {
        // beq x10, x0, -4 at 0x10000034
        assert_eq!(
            Disassembler::disassemble(0xFE050EE3, 0x1000_0034),
            "beq x10, x0, 0x10000030"
        );
    }

    #[test]
    fn test_disassemble_illegal() {
        assert_eq!(
            Disassembler::disassemble(0xFFFF_FFFF, 0),
            "illegal 0xFFFFFFFF"
        );
    }
}
