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

//! Memory-mapped UART
//!
//! Four byte-addressed registers at offsets 0..3 from the UART base:
//!
//! | Offset | Name     | Access | Semantics                                |
//! |--------|----------|--------|------------------------------------------|
//! | 0      | RX_DATA  | R      | Latest received byte; reading clears     |
//! |        |          |        | RX_READY                                 |
//! | 1      | RX_READY | R      | 1 while a byte is waiting in RX_DATA     |
//! | 2      | TX_DATA  | W      | Latches a byte for transmission          |
//! | 3      | TX_BUSY  | R      | 1 while a latched byte is untransmitted  |
//!
//! The receive pair and transmit pair each live behind their own mutex, so
//! the hart observes a consistent register value per access while the host
//! threads update the other side. Hart-side `read`/`write` only ever lock,
//! touch a register, and unlock: the hart never blocks on I/O.
//!
//! Host side, `start()` spawns two detached threads: a reader that blocks
//! on stdin and pushes each byte into the receive registers, and a printer
//! that sleeps on a condvar until TX_BUSY rises, writes the byte to stdout,
//! and clears TX_BUSY. The same `host_push_byte`/`host_take_tx` entry
//! points the threads use double as deterministic test hooks.

use std::io::{Read, Write};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// Receive-side register pair
#[derive(Debug, Default)]
struct RxRegisters {
    data: u8,
    ready: u8,
}

/// Transmit-side register pair
#[derive(Debug, Default)]
struct TxRegisters {
    data: u8,
    busy: u8,
}

/// Memory-mapped UART device
///
/// # Example
///
/// ```
/// use rvx::core::uart::Uart;
///
/// let uart = Uart::new();
///
/// // Host delivers a byte, the hart polls and consumes it
/// uart.host_push_byte(b'A');
/// assert_eq!(uart.read(Uart::RX_READY), 1);
/// assert_eq!(uart.read(Uart::RX_DATA), b'A');
/// assert_eq!(uart.read(Uart::RX_READY), 0);
/// ```
pub struct Uart {
    rx: Arc<Mutex<RxRegisters>>,
    tx: Arc<(Mutex<TxRegisters>, Condvar)>,
    started: bool,
}

impl Uart {
    /// Register offset: received byte (read clears RX_READY)
    pub const RX_DATA: u8 = 0;
    /// Register offset: receive-ready flag
    pub const RX_READY: u8 = 1;
    /// Register offset: transmit data (write-only)
    pub const TX_DATA: u8 = 2;
    /// Register offset: transmit-busy flag
    pub const TX_BUSY: u8 = 3;

    /// Create a new UART with all registers zeroed
    ///
    /// No host threads run until `start()`; tests drive the device through
    /// the host hooks instead.
    pub fn new() -> Self {
        Self {
            rx: Arc::new(Mutex::new(RxRegisters::default())),
            tx: Arc::new((Mutex::new(TxRegisters::default()), Condvar::new())),
            started: false,
        }
    }

    /// Clear all four registers
    pub fn reset(&mut self) {
        let mut rx = self.rx.lock().unwrap();
        rx.data = 0;
        rx.ready = 0;
        drop(rx);

        let mut tx = self.tx.0.lock().unwrap();
        tx.data = 0;
        tx.busy = 0;
    }

    /// Spawn the host-side I/O threads
    ///
    /// The reader thread blocks on stdin and delivers each byte to the
    /// receive registers; the printer thread drains latched TX bytes to
    /// stdout. Both threads are detached and end with the process. Calling
    /// `start` twice is a no-op.
    ///
    /// Putting the terminal into non-canonical, no-echo mode is the
    /// caller's job; the device itself only moves bytes.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let rx = Arc::clone(&self.rx);
        thread::spawn(move || {
            for byte in std::io::stdin().bytes() {
                match byte {
                    Ok(byte) => {
                        let mut regs = rx.lock().unwrap();
                        regs.data = byte;
                        regs.ready = 1;
                    }
                    Err(e) => {
                        log::warn!("UART stdin read failed: {}", e);
                        break;
                    }
                }
            }
            log::debug!("UART reader thread exiting (stdin closed)");
        });

        let tx = Arc::clone(&self.tx);
        thread::spawn(move || {
            let (lock, cvar) = &*tx;
            loop {
                let mut regs = lock.lock().unwrap();
                while regs.busy == 0 {
                    regs = cvar.wait(regs).unwrap();
                }
                let byte = regs.data;
                drop(regs);

                let mut stdout = std::io::stdout();
                let _ = stdout.write_all(&[byte]);
                let _ = stdout.flush();

                // Transmission done, drop the busy flag
                lock.lock().unwrap().busy = 0;
            }
        });
    }

    /// Hart-side register read
    ///
    /// Reading RX_DATA clears RX_READY. TX_DATA is write-only and reads as
    /// 0, as does any offset above 3.
    pub fn read(&self, offset: u8) -> u8 {
        match offset {
            Self::RX_DATA => {
                let mut rx = self.rx.lock().unwrap();
                rx.ready = 0;
                rx.data
            }
            Self::RX_READY => self.rx.lock().unwrap().ready,
            Self::TX_BUSY => self.tx.0.lock().unwrap().busy,
            _ => 0,
        }
    }

    /// Hart-side register write
    ///
    /// Writing TX_DATA while TX_BUSY is clear latches the byte and raises
    /// TX_BUSY until the host drains it; writes while busy are dropped.
    /// Writes to any other offset are ignored.
    pub fn write(&self, offset: u8, value: u8) {
        if offset == Self::TX_DATA {
            let (lock, cvar) = &*self.tx;
            let mut tx = lock.lock().unwrap();
            if tx.busy == 0 {
                tx.data = value;
                tx.busy = 1;
                cvar.notify_one();
            } else {
                log::trace!("UART TX byte 0x{:02X} dropped while busy", value);
            }
        }
    }

    /// Host-side: deliver one received byte
    ///
    /// Overwrites any byte the hart has not consumed yet, exactly as a real
    /// receiver with a one-byte buffer would.
    pub fn host_push_byte(&self, byte: u8) {
        let mut rx = self.rx.lock().unwrap();
        rx.data = byte;
        rx.ready = 1;
    }

    /// Host-side: drain one latched TX byte, if any
    ///
    /// Returns the byte and clears TX_BUSY, or `None` when nothing is
    /// pending.
    pub fn host_take_tx(&self) -> Option<u8> {
        let mut tx = self.tx.0.lock().unwrap();
        if tx.busy != 0 {
            tx.busy = 0;
            Some(tx.data)
        } else {
            None
        }
    }
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}
