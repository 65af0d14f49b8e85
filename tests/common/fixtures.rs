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

//! Test fixtures for common test scenarios

use rvx::core::memory::Bus;
use rvx::core::system::System;
use rvx::core::uart::Uart;

/// Create a System with initialized components
#[allow(dead_code)]
pub fn create_test_system() -> System {
    System::new()
}

/// Load a program into memory word by word at the specified address
#[allow(dead_code)]
pub fn load_test_program(bus: &mut Bus, start_addr: u32, program: &[u32]) {
    for (i, &instruction) in program.iter().enumerate() {
        let addr = start_addr + (i as u32 * 4);
        bus.write32(addr, instruction)
            .expect("Failed to write to memory");
    }
}

/// Create a System with a program in RAM and the PC pointing at it
///
/// The boot ROM is bypassed: the PC is moved straight to RAM offset 0, the
/// way the ROM itself hands over control after a bootload.
#[allow(dead_code)]
pub fn create_system_running_ram_program(program: &[u32]) -> System {
    let mut system = System::new();
    load_test_program(system.bus_mut(), 0, program);
    system.cpu_mut().set_pc(0);
    system
}

/// Deliver one byte to the UART and pump the hart until it is consumed
///
/// Panics if the hart does not pick the byte up within `max_steps`.
#[allow(dead_code)]
pub fn deliver_uart_byte(system: &mut System, byte: u8, max_steps: usize) {
    system.bus().uart().host_push_byte(byte);
    for _ in 0..max_steps {
        if system.bus().uart().read(Uart::RX_READY) == 0 {
            return;
        }
        system.step().expect("hart faulted while polling the UART");
    }
    panic!("hart did not consume UART byte 0x{:02X}", byte);
}
