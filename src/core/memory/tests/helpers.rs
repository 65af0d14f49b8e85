// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;

/// Creates a new Bus instance for testing
#[allow(dead_code)]
pub fn create_test_bus() -> Bus {
    Bus::new()
}

/// Creates a Bus with a pattern written across the first RAM words
#[allow(dead_code)]
pub fn create_bus_with_ram_pattern() -> Bus {
    let mut bus = Bus::new();
    for i in 0..8u32 {
        bus.write32(i * 4, 0x1111_1111 * i).unwrap();
    }
    bus
}
