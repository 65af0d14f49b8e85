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

use clap::Parser;
use log::{error, info, warn};
use rvx::core::config::{Config, DEFAULT_CONFIG_PATH};
use rvx::core::cpu::CpuTracer;
use rvx::core::error::{EmulatorError, Result};
use rvx::core::loader::{ProgramImage, DEFAULT_IMAGE_PATH};
use rvx::core::system::System;

/// RV32I microcontroller emulator
#[derive(Parser)]
#[command(name = "rvx")]
#[command(about = "RV32I microcontroller emulator", long_about = None)]
struct Args {
    /// Path to the memory image copied into RAM at offset 0
    image: Option<String>,

    /// Write a per-instruction execution trace to this file
    #[arg(short = 't', long)]
    trace: Option<String>,

    /// Stop tracing after this many instructions (0 = unlimited)
    #[arg(long, default_value = "0")]
    trace_limit: u64,

    /// Number of instructions to execute (0 = run until halt)
    #[arg(short = 'n', long, default_value = "0")]
    steps: u64,

    /// Configuration file path
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<()> {
    // Load .env configuration if present
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("rvx v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Command-line arguments override configuration file values
    let config = if std::path::Path::new(&args.config).exists() {
        Config::load(&args.config)?
    } else {
        Config::default()
    };

    let image_path = args
        .image
        .or(config.program)
        .unwrap_or_else(|| DEFAULT_IMAGE_PATH.to_string());

    info!("Loading memory image from: {}", image_path);

    let image = match ProgramImage::from_file(&image_path) {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to load memory image: {}", e);
            return Err(e);
        }
    };

    let mut system = System::new();
    system.load_program(&image);

    // Attach the execution tracer if requested
    let trace_path = args.trace.or(config.trace.file);
    if let Some(path) = &trace_path {
        let limit = if args.trace_limit != 0 {
            args.trace_limit
        } else {
            config.trace.limit
        };
        info!("Tracing execution to {} (limit: {})", path, limit);
        system.set_tracer(CpuTracer::new(path)?, limit);
    }

    // Put the terminal into non-canonical, no-echo mode so keystrokes reach
    // the UART one byte at a time, then hand stdin/stdout to the device
    let interactive = crossterm::terminal::enable_raw_mode().is_ok();
    if !interactive {
        warn!("Terminal raw mode unavailable, UART input is line-buffered");
    }
    system.start_uart();

    let result = if args.steps > 0 {
        system.step_n(args.steps as usize)
    } else {
        system.run()
    };

    if interactive {
        let _ = crossterm::terminal::disable_raw_mode();
    }

    match result {
        // A fatal architectural exception has already been logged and
        // traced; the machine halting is a clean shutdown
        Err(EmulatorError::Exception(_)) | Ok(()) => {
            info!(
                "Emulation finished: {} instructions retired, final PC=0x{:08X}",
                system.retired(),
                system.pc()
            );
            Ok(())
        }
        Err(e) => {
            error!("Emulation failed: {}", e);
            Err(e)
        }
    }
}
