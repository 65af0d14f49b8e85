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

//! RV32I microcontroller emulator core library
//!
//! This library provides the core emulation components for a small RISC-V
//! (RV32I) microcontroller: CPU, memory bus, boot ROM, UART, and the
//! surrounding system glue.
//!
//! # Example
//!
//! ```
//! use rvx::core::cpu::CPU;
//! use rvx::core::memory::Bus;
//!
//! let mut cpu = CPU::new();
//! let mut bus = Bus::new();
//!
//! // Execute one instruction (the first boot ROM word)
//! cpu.step(&mut bus).unwrap();
//! ```

pub mod core;
