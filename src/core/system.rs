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

//! System integration module
//!
//! This module ties together the emulator components (CPU, memory bus,
//! devices) and provides the main emulation loop. The hart is strictly
//! sequential: fetch, decode, execute, retire, repeat, as fast as the host
//! sustains. The first fatal exception halts the machine for good:
//!
//! ```text
//! RESET ──init──► RUNNING ──fatal exception──► HALTED
//!                 RUNNING ──step──► RUNNING
//! ```

use super::cpu::{CpuTracer, CPU};
use super::error::{EmulatorError, Exception, Result};
use super::loader::ProgramImage;
use super::memory::Bus;

/// The emulated machine
///
/// Owns the CPU and bus, counts retired instructions, and drives the
/// fetch/decode/execute loop.
///
/// # Example
/// ```
/// use rvx::core::system::System;
///
/// let mut system = System::new();
/// system.step().unwrap(); // first boot ROM instruction
/// assert_eq!(system.retired(), 1);
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Retired-instruction counter
    retired: u64,
    /// Running state (false once halted)
    running: bool,
    /// Optional execution tracer
    tracer: Option<CpuTracer>,
    /// Stop tracing after this many instructions (0 = unlimited)
    trace_limit: u64,
}

impl System {
    /// Create a new System instance
    ///
    /// All components start in their reset state.
    pub fn new() -> Self {
        Self {
            cpu: CPU::new(),
            bus: Bus::new(),
            retired: 0,
            running: true,
            tracer: None,
            trace_limit: 0,
        }
    }

    /// Reset the system to initial state
    ///
    /// Resets the CPU and clears RAM as if the board was power-cycled.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.retired = 0;
        self.running = true;
    }

    /// Copy a program image into RAM at offset 0
    pub fn load_program(&mut self, image: &ProgramImage) {
        self.bus.load_ram(image.data());
        log::info!("Loaded {} bytes into RAM", image.len());
    }

    /// Attach an execution tracer
    ///
    /// # Arguments
    ///
    /// * `tracer` - Destination for per-instruction trace lines
    /// * `limit` - Stop tracing after this many instructions (0 = no limit)
    pub fn set_tracer(&mut self, tracer: CpuTracer, limit: u64) {
        self.tracer = Some(tracer);
        self.trace_limit = limit;
    }

    /// Spawn the UART host I/O threads
    ///
    /// Interactive runs need this; tests drive the UART through its host
    /// hooks instead.
    pub fn start_uart(&mut self) {
        self.bus.uart_mut().start();
    }

    /// Execute one instruction
    ///
    /// # Errors
    ///
    /// The architectural exception that halted the hart, wrapped in
    /// `EmulatorError`. The retired count is not incremented for a faulting
    /// instruction.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.cpu.pc();

        if let Err(exception) = self.cpu.step(&mut self.bus) {
            self.halt(pc, exception);
            return Err(EmulatorError::Exception(exception));
        }

        self.retired += 1;

        if let Some(ref mut tracer) = self.tracer {
            if self.trace_limit == 0 || self.retired <= self.trace_limit {
                if let Err(e) = tracer.trace(self.retired, pc, &self.cpu) {
                    log::warn!("Failed to write trace: {}", e);
                }
            } else if self.retired == self.trace_limit + 1 {
                log::info!(
                    "Trace limit reached ({} instructions), disabling tracer",
                    self.trace_limit
                );
                let _ = tracer.flush();
                tracer.set_enabled(false);
            }
        }

        Ok(())
    }

    /// Execute multiple instructions
    ///
    /// Executes exactly `n` instructions unless the hart halts first.
    ///
    /// # Errors
    ///
    /// Propagates the halting exception.
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Run until the hart halts
    ///
    /// The loop imposes no timing: instructions retire as fast as the host
    /// sustains. An architectural halt is a normal outcome and returns
    /// `Ok(())`; the exception has already been logged and traced.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Emulation started at PC=0x{:08X}", self.cpu.pc());

        while self.running {
            match self.step() {
                Ok(()) => {}
                Err(EmulatorError::Exception(_)) => break,
                Err(e) => return Err(e),
            }
        }

        log::info!("Emulation stopped after {} instructions", self.retired);
        Ok(())
    }

    /// Record a fatal exception and transition to HALTED
    fn halt(&mut self, pc: u32, exception: Exception) {
        log::error!(
            "Hart halted at PC=0x{:08X} after {} instructions: {}",
            pc,
            self.retired,
            exception
        );
        self.cpu.dump_registers();

        if let Some(ref mut tracer) = self.tracer {
            let _ = tracer.trace_exception(self.retired, pc, &exception);
            let _ = tracer.flush();
        }

        self.running = false;
    }

    /// Whether the hart is still running (RUNNING vs. HALTED)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get current PC value
    ///
    /// # Example
    ///
    /// ```
    /// use rvx::core::system::System;
    ///
    /// let system = System::new();
    /// assert_eq!(system.pc(), 0x10000000);
    /// ```
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Get the retired-instruction count
    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// Get reference to memory bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to memory bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_initialization() {
        let system = System::new();
        assert_eq!(system.retired(), 0);
        assert_eq!(system.pc(), 0x1000_0000);
        assert!(system.is_running());
    }

    #[test]
    fn test_system_step_retires_one_instruction() {
        let mut system = System::new();

        // First boot ROM word: lui x11, 0x30000
        system.step().unwrap();

        assert_eq!(system.pc(), 0x1000_0004);
        assert_eq!(system.retired(), 1);
        assert_eq!(system.cpu().reg(11), 0x3000_0000);
    }

    #[test]
    fn test_system_reset() {
        let mut system = System::new();
        system.step().unwrap();
        system.step().unwrap();
        assert!(system.retired() > 0);

        system.reset();
        assert_eq!(system.retired(), 0);
        assert_eq!(system.pc(), 0x1000_0000);
        assert!(system.is_running());
    }

    #[test]
    fn test_illegal_instruction_halts() {
        let mut system = System::new();

        // All-ones is not a valid RV32I instruction
        system.bus_mut().write32(0x0000_0000, 0xFFFF_FFFF).unwrap();
        system.cpu_mut().set_pc(0x0000_0000);

        let before = system.retired();
        let result = system.step();

        assert!(matches!(
            result,
            Err(EmulatorError::Exception(Exception::IllegalInstruction { .. }))
        ));
        // The faulting instruction did not retire
        assert_eq!(system.retired(), before);
        assert!(!system.is_running());
        // The PC still points at the faulting instruction
        assert_eq!(system.pc(), 0x0000_0000);
    }

    #[test]
    fn test_run_returns_ok_on_architectural_halt() {
        let mut system = System::new();

        // addi x1, x0, 5 then an illegal word
        system.bus_mut().write32(0x0000_0000, 0x00500093).unwrap();
        system.bus_mut().write32(0x0000_0004, 0xFFFF_FFFF).unwrap();
        system.cpu_mut().set_pc(0x0000_0000);

        system.run().unwrap();
        assert_eq!(system.retired(), 1);
        assert_eq!(system.cpu().reg(1), 5);
        assert!(!system.is_running());
    }

    #[test]
    fn test_fetch_from_unmapped_region_halts() {
        let mut system = System::new();

        system.cpu_mut().set_pc(0x5000_0000);
        let result = system.step();

        assert!(matches!(
            result,
            Err(EmulatorError::Exception(Exception::AccessFault { address: 0x5000_0000 }))
        ));
        assert!(!system.is_running());
    }

    #[test]
    fn test_misaligned_pc_halts() {
        let mut system = System::new();

        system.cpu_mut().set_pc(0x0000_0002);
        let result = system.step();

        assert!(matches!(
            result,
            Err(EmulatorError::Exception(
                Exception::InstructionAddressMisaligned { address: 0x0000_0002 }
            ))
        ));
    }

    #[test]
    fn test_load_program_places_image_at_ram_base() {
        let mut system = System::new();
        let image = ProgramImage::from_bytes(vec![0x93, 0x00, 0x50, 0x00]).unwrap();

        system.load_program(&image);

        // addi x1, x0, 5 assembled little-endian
        assert_eq!(system.bus().read32(0x0000_0000).unwrap(), 0x00500093);
    }
}
