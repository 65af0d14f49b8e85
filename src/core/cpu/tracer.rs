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

//! CPU execution tracer for debugging
//!
//! Logs one line per retired instruction to a file for analysis.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Disassembler, CPU};
use crate::core::error::Result;

/// CPU execution tracer
///
/// Each line in the trace file shows:
/// - Retired-instruction count
/// - Fetch address (the PC the instruction came from)
/// - Raw instruction encoding
/// - Disassembled instruction
/// - Result summary (destination register value, or the new PC for control
///   flow)
///
/// # Example
/// ```no_run
/// use rvx::core::cpu::{CpuTracer, CPU};
/// use rvx::core::memory::Bus;
///
/// let mut cpu = CPU::new();
/// let mut bus = Bus::new();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// let pc = cpu.pc();
/// cpu.step(&mut bus).unwrap();
/// tracer.trace(1, pc, &cpu).unwrap();
/// ```
pub struct CpuTracer {
    /// Enable/disable tracing
    enabled: bool,
    /// Buffered output file handle
    output: BufWriter<File>,
}

impl CpuTracer {
    /// Create a new CPU tracer
    ///
    /// Opens a file for writing trace output, truncating any previous
    /// contents.
    ///
    /// # Errors
    ///
    /// Propagates the I/O error if the file cannot be created.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        Ok(Self {
            enabled: true,
            output,
        })
    }

    /// Enable or disable tracing
    ///
    /// When disabled, `trace()` calls return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if tracing is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one retired instruction
    ///
    /// Called after the instruction has executed: `pc` is the fetch
    /// address, the CPU holds the latched instruction word and the
    /// post-execution state the summary is drawn from.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the trace file.
    pub fn trace(&mut self, retired: u64, pc: u32, cpu: &CPU) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let instruction = cpu.instruction();
        let disasm = Disassembler::disassemble(instruction, pc);

        writeln!(
            self.output,
            "{:>8} | 0x{:08X} | 0x{:08X} | {:<28} | {}",
            retired,
            pc,
            instruction,
            disasm,
            Self::summary(instruction, pc, cpu)
        )?;

        Ok(())
    }

    /// Record a fatal exception
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the trace file.
    pub fn trace_exception(
        &mut self,
        retired: u64,
        pc: u32,
        exception: &crate::core::error::Exception,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(
            self.output,
            "{:>8} | 0x{:08X} | {}",
            retired, pc, exception
        )?;
        Ok(())
    }

    /// Flush buffered trace output to disk
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the trace file.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// One-phrase result of an executed instruction
    fn summary(instruction: u32, pc: u32, cpu: &CPU) -> String {
        use super::decode::{self, opcodes};

        match decode::opcode(instruction) {
            opcodes::OP | opcodes::OP_IMM | opcodes::LUI | opcodes::AUIPC | opcodes::LOAD => {
                let rd = decode::rd(instruction);
                format!("x{} = 0x{:08X}", rd, cpu.reg(rd))
            }
            opcodes::JAL | opcodes::JALR | opcodes::BRANCH => {
                if cpu.pc() == pc.wrapping_add(4) {
                    "not taken".to_string()
                } else {
                    format!("pc = 0x{:08X}", cpu.pc())
                }
            }
            opcodes::STORE => "stored".to_string(),
            _ => String::new(),
        }
    }
}
