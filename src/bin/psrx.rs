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

use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use psrx::core::config::EmulatorConfig;
use psrx::core::error::Result;
use psrx::core::system::System;

/// PlayStation (PSX) emulator
#[derive(Parser)]
#[command(name = "psrx")]
#[command(about = "PlayStation emulator", long_about = None)]
struct Args {
    /// Path to a TOML config file. CLI flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to PlayStation BIOS file (e.g., SCPH1001.BIN)
    bios_file: Option<String>,

    /// Path to CD-ROM image file (.cue)
    #[arg(short = 'c', long = "cdrom")]
    disc_path: Option<PathBuf>,

    /// Number of instructions to execute when not fast-booting into a game
    #[arg(short = 'n', long, default_value = "100000")]
    instructions: usize,

    /// Skip BIOS shell and jump straight into the disc's boot executable
    #[arg(long)]
    fast_boot: Option<bool>,

    /// Intercept BIOS kernel calls with host HLE routines
    #[arg(long)]
    hle_vectors: Option<bool>,

    /// Trace every I/O port access at `trace` log level
    #[arg(long)]
    trace_io: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EmulatorConfig::from_toml_file(path)?,
        None => EmulatorConfig::default(),
    }
    .apply_env();

    if let Some(bios) = &args.bios_file {
        config.bios_path = bios.clone();
    }
    if let Some(disc) = &args.disc_path {
        config.disc_path = Some(disc.clone());
    }
    if let Some(v) = args.fast_boot {
        config.fast_boot = v;
    }
    if let Some(v) = args.hle_vectors {
        config.hle_vectors = v;
    }
    if args.trace_io {
        config.trace_io = true;
    }

    // `trace_io` raises the default filter to `trace` so the existing
    // `log::trace!` call sites in `memory::io_ports` become visible;
    // `pretty_trace` additionally spells out the module path and a
    // timestamp instead of env_logger's compact default.
    let level = if config.trace_io {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    let mut logger = env_logger::Builder::from_default_env();
    logger.filter_level(level);
    if config.pretty_trace {
        logger.format_timestamp_millis().format_module_path(true);
    }
    logger.init();

    info!("psrx v{}", env!("CARGO_PKG_VERSION"));

    if config.bios_path.is_empty() {
        error!("no BIOS path given (pass a path, --config, or set PSRX_BIOS_PATH)");
        return Err(psrx::core::error::EmulatorError::BiosNotFound(
            "no BIOS path configured".into(),
        ));
    }

    info!("Loading BIOS from: {}", config.bios_path);

    let mut system = System::new();
    system.set_putchar(Box::new(|byte| {
        print!("{}", byte as char);
        let _ = std::io::stdout().flush();
    }));
    system.set_hle_vectors(config.hle_vectors);
    system.set_cycle_multiplier(config.cycle_multiplier);
    system.set_bus_tick_batch(config.bus_tick_batch);

    if let Err(e) = system.load_bios(&config.bios_path) {
        error!("Failed to load BIOS: {}", e);
        return Err(e);
    }
    info!("BIOS loaded successfully");

    system.reset();

    let disc_path = config.disc_path.clone();
    let fast_boot = config.fast_boot && disc_path.is_some();

    if fast_boot {
        let disc_path = disc_path.as_ref().unwrap();
        info!("Fast-booting disc: {}", disc_path.display());
        system.load_game(&disc_path.to_string_lossy())?;
    } else if let Some(disc_path) = &disc_path {
        info!("Loading CD-ROM from: {}", disc_path.display());
        system
            .cdrom()
            .borrow_mut()
            .load_disc(&disc_path.to_string_lossy())
            .map_err(|e| {
                error!("Failed to load CD-ROM: {}", e);
                psrx::core::error::EmulatorError::CdRom(e)
            })?;
        info!("CD-ROM loaded successfully");
    }

    info!("Starting emulation...");

    if fast_boot {
        loop {
            if let Err(e) = system.run_frame() {
                error!("Error at PC=0x{:08X}: {}", system.pc(), e);
                system.cpu().dump_registers();
                return Err(e);
            }
            if !system.is_running() {
                break;
            }
        }
    } else {
        let total_instructions = args.instructions;
        let log_interval = (total_instructions / 10).max(1);
        let mut executed = 0usize;
        let mut next_log = log_interval;

        while executed < total_instructions && system.is_running() {
            let remaining = total_instructions - executed;
            if remaining >= config.bus_tick_batch as usize {
                if let Err(e) = system.step_batched() {
                    error!("Error at PC=0x{:08X}: {}", system.pc(), e);
                    error!("Instruction count: {}", executed);
                    system.cpu().dump_registers();
                    return Err(e);
                }
                executed += config.bus_tick_batch as usize;
            } else {
                if let Err(e) = system.step() {
                    error!("Error at PC=0x{:08X}: {}", system.pc(), e);
                    error!("Instruction count: {}", executed);
                    system.cpu().dump_registers();
                    return Err(e);
                }
                executed += 1;
            }

            if executed >= next_log {
                info!(
                    "Progress: {}/{} instructions | PC: 0x{:08X} | Cycles: {}",
                    executed,
                    total_instructions,
                    system.pc(),
                    system.cycles()
                );
                next_log += log_interval;
            }
        }
    }

    info!("Emulation completed successfully!");
    info!("Total cycles: {}", system.cycles());
    info!("Final PC: 0x{:08X}", system.pc());

    Ok(())
}
