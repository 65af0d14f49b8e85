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

//! System-level integration tests
//!
//! These run whole programs through the System: the shipped boot ROM, RAM
//! programs handed over the UART, and the halt path.

mod common;

use common::assertions::{assert_cpu_pc, assert_cpu_reg, assert_memory_word};
use common::fixtures::{
    create_system_running_ram_program, create_test_system, deliver_uart_byte,
};
use common::test_roms;

use rvx::core::error::{EmulatorError, Exception, Result};
use rvx::core::loader::ProgramImage;
use rvx::core::system::System;
use rvx::core::uart::Uart;

#[test]
fn test_basic_initialization() -> Result<()> {
    // Basic smoke test
    let system = System::new();
    assert_eq!(system.retired(), 0);
    assert_eq!(system.pc(), 0x1000_0000);
    Ok(())
}

#[test]
fn test_reset_enters_boot_rom() {
    let mut system = create_test_system();

    // S1: the first fetch comes from the boot ROM
    assert_eq!(system.bus().fetch(0x1000_0000).unwrap(), 0x300005B7);

    system.step().unwrap();
    assert_cpu_reg(system.cpu(), 11, 0x3000_0000);
    assert_cpu_pc(system.cpu(), 0x1000_0004);
    assert_eq!(system.retired(), 1);
}

#[test]
fn test_boot_rom_waits_for_uart_input() {
    let mut system = create_test_system();

    // With no input the ROM sits in its RX_READY poll loop
    system.step_n(100).unwrap();
    let pc = system.pc();
    assert!(
        (0x1000_0030..=0x1000_0034).contains(&pc),
        "expected the ROM poll loop, PC=0x{:08X}",
        pc
    );
}

#[test]
fn test_boot_rom_loads_image_over_uart_and_runs_it() {
    let mut system = create_test_system();

    // The ROM protocol: a 16-bit little-endian length, then that many
    // image bytes, which the ROM stores at RAM 0 and jumps to.
    let program = test_roms::test_program_uart_hello();
    let image: Vec<u8> = program.iter().flat_map(|w| w.to_le_bytes()).collect();

    deliver_uart_byte(&mut system, image.len() as u8, 1000);
    deliver_uart_byte(&mut system, 0x00, 1000);
    for &byte in &image {
        deliver_uart_byte(&mut system, byte, 1000);
    }

    // The received program writes 'A' to TX_DATA; pump until it shows up
    let mut published = None;
    for _ in 0..1000 {
        system.step().unwrap();
        if let Some(byte) = system.bus().uart().host_take_tx() {
            published = Some(byte);
            break;
        }
    }
    assert_eq!(published, Some(0x41));

    // The image landed verbatim at RAM offset 0
    assert_memory_word(system.bus(), 0x0000_0000, program[0]);
    assert_memory_word(system.bus(), 0x0000_0004, program[1]);
}

#[test]
fn test_uart_echo_program_round_trips_keystrokes() {
    let mut system = create_system_running_ram_program(&test_roms::test_program_uart_echo());

    for &keystroke in b"OK" {
        deliver_uart_byte(&mut system, keystroke, 1000);

        let mut published = None;
        for _ in 0..100 {
            if let Some(byte) = system.bus().uart().host_take_tx() {
                published = Some(byte);
                break;
            }
            system.step().unwrap();
        }
        assert_eq!(published, Some(keystroke));
    }
}

#[test]
fn test_arithmetic_program() {
    let mut system =
        create_system_running_ram_program(&test_roms::test_program_basic_arithmetic());

    system.step_n(3).unwrap();
    assert_cpu_reg(system.cpu(), 1, 1);
    assert_cpu_reg(system.cpu(), 2, 2);
    assert_cpu_reg(system.cpu(), 3, 3);
}

#[test]
fn test_load_store_program() {
    let mut system = create_system_running_ram_program(&test_roms::test_program_load_store());

    system.step_n(4).unwrap();
    assert_cpu_reg(system.cpu(), 3, 0xFFFF_FFAA); // lb sign-extends 0xAA
    assert_eq!(system.bus().read8(0x100).unwrap(), 0xAA);
}

#[test]
fn test_nop_sled_advances_pc_only() {
    let mut system = create_system_running_ram_program(&test_roms::test_program_nop_sled());

    system.step_n(4).unwrap();
    assert_cpu_pc(system.cpu(), 0x10);
    assert_eq!(system.retired(), 4);
    for i in 1..32 {
        assert_cpu_reg(system.cpu(), i, 0);
    }
}

#[test]
fn test_illegal_instruction_halts_machine() {
    let mut system =
        create_system_running_ram_program(&test_roms::test_program_illegal_tail());

    // run() treats the architectural halt as a clean shutdown
    system.run().unwrap();

    assert_eq!(system.retired(), 2);
    assert!(!system.is_running());
    assert_cpu_reg(system.cpu(), 1, 5);
    assert_cpu_reg(system.cpu(), 2, 10);
    // PC still points at the faulting word
    assert_cpu_pc(system.cpu(), 0x8);
}

#[test]
fn test_step_reports_the_halting_exception() {
    let mut system =
        create_system_running_ram_program(&test_roms::test_program_illegal_tail());

    system.step_n(2).unwrap();
    let result = system.step();
    assert!(matches!(
        result,
        Err(EmulatorError::Exception(Exception::IllegalInstruction {
            instruction: 0xFFFF_FFFF
        }))
    ));
}

#[test]
fn test_program_image_boots_from_file() {
    use std::io::Write;

    let program = test_roms::test_program_basic_arithmetic();
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_le_bytes()).collect();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let image = ProgramImage::from_file(file.path()).unwrap();
    let mut system = System::new();
    system.load_program(&image);
    system.cpu_mut().set_pc(0);

    system.step_n(3).unwrap();
    assert_cpu_reg(system.cpu(), 3, 3);
}

#[test]
fn test_uart_tx_busy_protocol_from_program() {
    // Two back-to-back stores: the second is dropped while TX_BUSY=1
    let mut system = create_system_running_ram_program(&[
        0x300005B7, // lui x11, 0x30000
        0x04100513, // addi x10, x0, 0x41
        0x00A58123, // sb x10, 2(x11)
        0x04200513, // addi x10, x0, 0x42
        0x00A58123, // sb x10, 2(x11)
    ]);

    system.step_n(5).unwrap();
    assert_eq!(system.bus().uart().read(Uart::TX_BUSY), 1);
    assert_eq!(system.bus().uart().host_take_tx(), Some(0x41));
    assert_eq!(system.bus().uart().host_take_tx(), None);
}
