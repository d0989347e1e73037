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
//! This module ties together all emulator components (CPU, Memory, GPU, SPU, Controller)
//! and provides the main emulation loop.

mod controller_ports;
mod hle;

pub use controller_ports::ControllerPorts;

#[cfg(feature = "audio")]
use super::audio::AudioBackend;
use super::cdrom::CDROM;
use super::cpu::{CpuTracer, StepOutcome, CPU};
use super::dma::DMA;
use super::error::{EmulatorError, Result};
use super::gpu::GPU;
use super::interrupt::{interrupts, InterruptController};
use super::memory::Bus;
use super::spu::SPU;
use super::timer::Timers;
use super::timing::TimingEventManager;
use std::cell::RefCell;
use std::rc::Rc;

/// PlayStation System
///
/// Integrates all hardware components and manages the emulation loop.
///
/// # Components
/// - CPU: MIPS R3000A processor
/// - Bus: Memory bus for RAM, BIOS, and I/O
/// - GPU: Graphics processing unit
/// - SPU: Sound processing unit
/// - Audio: Audio output backend
/// - DMA: Direct Memory Access controller
/// - Controller Ports: Input device interface
/// - Timers: 3 timer/counter channels
///
/// # Example
/// ```no_run
/// use psrx::core::system::System;
///
/// let mut system = System::new();
/// // system.load_bios("path/to/bios.bin")?;
/// // system.run();
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Timing event manager
    timing: TimingEventManager,
    /// GPU instance (shared via Rc<RefCell> for memory-mapped access)
    gpu: Rc<RefCell<GPU>>,
    /// SPU instance (shared via Rc<RefCell> for memory-mapped access)
    spu: Rc<RefCell<SPU>>,
    /// DMA controller (shared via Rc<RefCell> for memory-mapped access)
    dma: Rc<RefCell<DMA>>,
    /// CDROM drive (shared via Rc<RefCell> for memory-mapped access)
    cdrom: Rc<RefCell<CDROM>>,
    /// Controller ports (shared via Rc<RefCell> for memory-mapped access)
    controller_ports: Rc<RefCell<ControllerPorts>>,
    /// Timers (shared via Rc<RefCell> for memory-mapped access)
    timers: Rc<RefCell<Timers>>,
    /// Interrupt controller (shared via Rc<RefCell> for memory-mapped access)
    interrupt_controller: Rc<RefCell<InterruptController>>,
    /// Audio output backend (optional, may not be available on all systems)
    #[cfg(feature = "audio")]
    audio: Option<AudioBackend>,
    /// Total cycles executed
    cycles: u64,
    /// Running state
    running: bool,
    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,
    /// Maximum instructions to trace (0 = unlimited)
    trace_limit: usize,
    /// Number of instructions traced so far
    trace_count: usize,
    /// Cycles at last VBLANK
    last_vblank_cycles: u64,
    /// Intercept BIOS kernel-call vectors 0xA0/0xB0/0xC0 and run a host
    /// routine instead of the BIOS's own code (see `hle.rs`).
    hle_vectors: bool,
    /// Kernel event handles opened via `OpenEvent`, keyed by handle ID.
    hle_events: std::collections::HashMap<u32, hle::KernelEvent>,
    /// Next handle ID `OpenEvent` will hand out.
    hle_next_event: u32,
    /// Host console-output sink for `std_out_putchar`. Defaults to logging
    /// at `info` level under the `psrx::bios` target.
    putchar: Box<dyn FnMut(u8)>,
    /// Scales the cycle count each `step()` hands to the devices (GPU,
    /// timers, CD-ROM, SPU) and accumulates into `cycles`. 1 matches real
    /// hardware timing; raised above 1 trades timing fidelity for faster
    /// guest-time progress per host instruction dispatched.
    cycle_multiplier: u32,
    /// Default batch size for `step_batched` — how many `step()` calls to
    /// run per call before the host gets control back.
    bus_tick_batch: u32,
}

impl System {
    /// Create a new System instance
    ///
    /// Initializes all hardware components to their reset state.
    /// Sets up memory-mapped I/O connections between components.
    /// Registers timing events for all components.
    ///
    /// # Returns
    /// Initialized System instance
    pub fn new() -> Self {
        // Create GPU wrapped in Rc<RefCell> for shared access
        let gpu = Rc::new(RefCell::new(GPU::new()));

        // Create DMA controller wrapped in Rc<RefCell> for shared access
        let dma = Rc::new(RefCell::new(DMA::new()));

        // Create CDROM wrapped in Rc<RefCell> for shared access
        let cdrom = Rc::new(RefCell::new(CDROM::new()));

        // Create ControllerPorts wrapped in Rc<RefCell> for shared access
        let controller_ports = Rc::new(RefCell::new(ControllerPorts::new()));

        // Create Timers wrapped in Rc<RefCell> for shared access
        let timers = Rc::new(RefCell::new(Timers::new()));

        // Create Interrupt Controller wrapped in Rc<RefCell> for shared access
        let interrupt_controller = Rc::new(RefCell::new(InterruptController::new()));

        // Create SPU wrapped in Rc<RefCell> for shared access
        let spu = Rc::new(RefCell::new(SPU::new()));

        // Create bus and connect all peripherals for memory-mapped I/O
        let mut bus = Bus::new();
        bus.set_gpu(gpu.clone());
        bus.set_dma(dma.clone());
        bus.set_cdrom(cdrom.clone());
        bus.set_controller_ports(controller_ports.clone());
        bus.set_timers(timers.clone());
        bus.set_interrupt_controller(interrupt_controller.clone());
        bus.set_spu(spu.clone());

        // Create timing manager. CD-ROM, GPU and Timers each maintain their
        // own internal countdowns and are driven from the per-step `tick()`
        // calls below; `timing` exists solely to drive `CPU::execute`'s
        // frame-target loop (see `run_frame`).
        let timing = TimingEventManager::new();

        log::info!("System: All components initialized");

        // Initialize audio backend (optional, only if feature is enabled)
        #[cfg(feature = "audio")]
        let audio = match AudioBackend::new() {
            Ok(backend) => {
                log::info!("Audio backend initialized successfully");
                Some(backend)
            }
            Err(e) => {
                log::warn!("Failed to initialize audio backend: {}", e);
                log::warn!("Audio output will be disabled");
                None
            }
        };

        Self {
            cpu: CPU::new(),
            bus,
            timing,
            gpu,
            spu,
            dma,
            cdrom,
            controller_ports,
            timers,
            interrupt_controller,
            #[cfg(feature = "audio")]
            audio,
            cycles: 0,
            running: false,
            tracer: None,
            trace_limit: 0,
            trace_count: 0,
            last_vblank_cycles: 0,
            hle_vectors: false,
            hle_events: std::collections::HashMap::new(),
            hle_next_event: 0xF000_0001,
            putchar: Box::new(|byte| {
                log::info!(target: "psrx::bios", "{}", byte as char);
            }),
            cycle_multiplier: 1,
            bus_tick_batch: 32,
        }
    }

    /// Enable or disable BIOS kernel-call HLE (see `hle.rs`). Disabled by
    /// default; `load_game`'s fast-boot path turns it on.
    pub fn set_hle_vectors(&mut self, enabled: bool) {
        self.hle_vectors = enabled;
    }

    /// Install a host sink for BIOS console output (`std_out_putchar`).
    pub fn set_putchar(&mut self, sink: Box<dyn FnMut(u8)>) {
        self.putchar = sink;
    }

    /// Scale the cycle count devices are ticked by relative to what the CPU
    /// reports per instruction. 1 (the default) matches real hardware
    /// timing.
    pub fn set_cycle_multiplier(&mut self, multiplier: u32) {
        self.cycle_multiplier = multiplier.max(1);
    }

    /// Set the default batch size used by `step_batched`.
    pub fn set_bus_tick_batch(&mut self, batch: u32) {
        self.bus_tick_batch = batch.max(1);
    }

    /// Run up to `bus_tick_batch` instructions (see `set_bus_tick_batch`)
    /// in one call, stopping early if the system halts or `step` errors.
    /// Returns the total device cycles consumed. Intended for hosts that
    /// don't need to inspect state after every single instruction, e.g. a
    /// host-side progress-logging loop that only checks in periodically.
    pub fn step_batched(&mut self) -> Result<u32> {
        let mut total = 0u32;
        for _ in 0..self.bus_tick_batch {
            if !self.running {
                break;
            }
            total += self.step()?;
        }
        Ok(total)
    }

    /// Load BIOS from file
    ///
    /// Loads a BIOS ROM file into the system. The BIOS must be 512KB in size.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BIOS file
    ///
    /// # Returns
    ///
    /// - `Ok(())` if BIOS was loaded successfully
    /// - `Err(EmulatorError)` if loading fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.load_bios("SCPH1001.BIN").unwrap();
    /// ```
    pub fn load_bios(&mut self, path: &str) -> Result<()> {
        self.bus.load_bios(path)
    }

    /// Reset the system to initial state
    ///
    /// Resets all components as if the console was power-cycled.
    /// This clears RAM/scratchpad but preserves loaded BIOS.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.gpu.borrow_mut().reset();
        // Reset SPU by creating a new instance and updating bus connection
        self.spu = Rc::new(RefCell::new(SPU::new()));
        self.bus.set_spu(self.spu.clone());
        self.cycles = 0;
        self.running = true;
        self.trace_count = 0;
        self.last_vblank_cycles = 0;
        self.hle_events.clear();
        self.hle_next_event = 0xF000_0001;
    }

    /// Execute one CPU instruction
    ///
    /// Executes a single CPU instruction and ticks the GPU accordingly.
    /// The GPU is synchronized with CPU cycles for accurate emulation.
    ///
    /// # Returns
    /// Number of cycles consumed
    ///
    /// # Errors
    /// Returns error if instruction execution fails
    pub fn step(&mut self) -> Result<u32> {
        // Trace instruction if tracer is enabled
        if let Some(ref mut tracer) = self.tracer {
            // Check if we should still trace
            if self.trace_limit == 0 || self.trace_count < self.trace_limit {
                if let Err(e) = tracer.trace(&self.cpu, &self.bus) {
                    log::warn!("Failed to write trace: {}", e);
                }
                self.trace_count += 1;

                // Flush every 100 instructions to ensure data is written
                if self.trace_count.is_multiple_of(100) {
                    log::debug!("Flushed trace at {} instructions", self.trace_count);
                    let _ = tracer.flush();
                }
            } else if self.trace_count == self.trace_limit {
                log::info!(
                    "Trace limit reached ({} instructions), disabling tracer",
                    self.trace_limit
                );
                // Flush and disable tracer
                let _ = tracer.flush();
                self.trace_count += 1; // Increment to prevent repeated logging
            }
        } else if self.trace_count == 0 {
            // Log once if tracer is not enabled
            static LOGGED: std::sync::atomic::AtomicBool =
                std::sync::atomic::AtomicBool::new(false);
            if !LOGGED.swap(true, std::sync::atomic::Ordering::Relaxed) {
                log::warn!("Tracer is None in step() - tracing not active");
            }
        }

        // BIOS kernel-call HLE: if enabled and we're at one of the three
        // dispatcher stub addresses, run the host routine instead of the
        // BIOS's own code and skip the normal fetch/dispatch for this step.
        if self.try_intercept_hle() {
            self.cycles += 1;
            return Ok(1);
        }

        // Cause.IP2 is the sole hardware interrupt line; it's driven by the
        // aggregated (i_stat & i_mask) signal from the interrupt controller.
        let pending = if self.interrupt_controller.borrow().is_pending() {
            interrupts::CASCADE_LINE
        } else {
            0
        };
        self.cpu.check_interrupts(pending);

        let cpu_cycles = match self.cpu.step(&mut self.bus)? {
            StepOutcome::Ok(cycles) => cycles,
            StepOutcome::Halt => {
                self.running = false;
                0
            }
            StepOutcome::IllegalInstruction
            | StepOutcome::AddressError
            | StepOutcome::Break
            | StepOutcome::Syscall => 1,
        };

        // Tick DMA controller to process active transfers
        // DMA gets access to RAM, GPU, CD-ROM, and SPU for data transfers
        let dma_irq = {
            let ram = self.bus.ram_mut();
            let mut gpu = self.gpu.borrow_mut();
            let mut cdrom = self.cdrom.borrow_mut();
            let mut spu = self.spu.borrow_mut();
            self.dma
                .borrow_mut()
                .tick(ram, &mut gpu, &mut cdrom, &mut spu)
        };

        // Request DMA interrupt if any transfer completed
        if dma_irq {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::DMA);
        }

        // Scale the cycle count handed to the devices by `cycle_multiplier`;
        // 1 (the default) reproduces real hardware timing exactly.
        let device_cycles = cpu_cycles.saturating_mul(self.cycle_multiplier);

        // Apply icache invalidation from memory writes (must come before prefill)
        // This maintains cache coherency when memory is modified
        for addr in self.bus.drain_icache_invalidate_queue() {
            self.cpu.invalidate_icache(addr);
        }

        // Apply icache range invalidation from bulk memory writes (e.g., executable loading)
        // This efficiently invalidates large ranges without queueing individual addresses
        for (start, end) in self.bus.drain_icache_invalidate_range_queue() {
            self.cpu.invalidate_icache_range(start, end);
        }

        // Apply icache prefill from memory writes
        // This ensures instructions are cached before execution
        for (addr, instruction) in self.bus.drain_icache_prefill_queue() {
            self.cpu.prefill_icache(addr, instruction);
        }

        // Tick GPU; this is the sole source of VBlank/HBlank edges
        let (vblank_irq, hblank_irq) = self.gpu.borrow_mut().tick(device_cycles);

        if vblank_irq {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::VBLANK);
        }

        // Tick timers with the HBlank edge from this step
        let timer_irqs = self
            .timers
            .borrow_mut()
            .tick(device_cycles, false, hblank_irq);

        if timer_irqs[0] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER0);
        }
        if timer_irqs[1] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER1);
        }
        if timer_irqs[2] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER2);
        }

        // Tick CD-ROM drive, synchronized with CPU cycles; advances its own
        // command/async-IRQ countdowns internally and reports a rising edge
        // of its aggregate IRQ line
        let cdrom_irq = self.cdrom.borrow_mut().tick(device_cycles);
        if cdrom_irq {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::CDROM);
        }

        // Tick SPU to generate audio samples with CD-DA mixing (only if audio feature is enabled)
        #[cfg(feature = "audio")]
        {
            // Generate audio samples with CD audio mixed in
            // We need to coordinate between CDROM (which owns cd_audio) and SPU
            let audio_samples = {
                let mut cdrom = self.cdrom.borrow_mut();
                let mut spu = self.spu.borrow_mut();
                spu.tick_with_cd(device_cycles, &mut cdrom.cd_audio)
            };

            // Queue samples to audio backend if available
            if let Some(ref mut audio) = self.audio {
                if !audio_samples.is_empty() {
                    audio.queue_samples(&audio_samples);

                    // Check buffer level and warn on underruns
                    let buffer_level = audio.buffer_level();
                    if buffer_level < 512 {
                        log::warn!("Audio buffer underrun: {} samples queued", buffer_level);
                    }
                }
            }
        }

        self.cycles += device_cycles as u64;

        Ok(device_cycles)
    }

    /// Execute multiple instructions
    ///
    /// Executes exactly `n` instructions unless an error occurs.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of instructions to execute
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all instructions executed successfully
    /// - `Err(EmulatorError)` if any instruction fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.step_n(100).unwrap(); // Execute 100 instructions
    /// ```
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Execute one frame worth of instructions
    ///
    /// The PlayStation CPU runs at approximately 33.8688 MHz.
    /// At 60 fps, one frame requires approximately 564,480 cycles.
    ///
    /// Drives the CPU through `step()` — the same per-instruction path used
    /// by `step_n` — until the frame's cycle budget is exhausted, so DMA,
    /// GPU, timers, CD-ROM, and interrupt checking all run exactly as they
    /// do outside frame mode. SPU audio is ticked from within `step()`
    /// itself (see its `#[cfg(feature = "audio")]` block), not separately
    /// here.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the frame executed successfully
    /// - `Err(EmulatorError)` if execution fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.reset();
    /// system.run_frame().unwrap(); // Execute one frame
    /// ```
    pub fn run_frame(&mut self) -> Result<()> {
        // PSX CPU runs at ~33.8688 MHz
        // At 60 fps, one frame = 33868800 / 60 ≈ 564,480 cycles
        const CYCLES_PER_FRAME: u64 = 564_480;

        let target = self.cycles + CYCLES_PER_FRAME;
        while self.cycles < target && self.running {
            self.step()?;
        }

        self.timing.global_tick_counter = self.cycles;

        Ok(())
    }

    /// Get current PC value
    ///
    /// # Returns
    /// Current program counter value
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::system::System;
    ///
    /// let system = System::new();
    /// assert_eq!(system.pc(), 0xBFC00000);
    /// ```
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Get total cycles executed
    ///
    /// # Returns
    /// Total number of cycles since reset
    ///
    /// # Example
    ///
    /// ```
    /// use psrx::core::system::System;
    ///
    /// let system = System::new();
    /// assert_eq!(system.cycles(), 0);
    /// ```
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the system is still running (cleared by a `Halt` outcome
    /// from `CPU::step`, e.g. a guest `BREAK`/halt instruction).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get reference to CPU
    ///
    /// # Returns
    /// Reference to CPU instance
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Get mutable reference to CPU
    ///
    /// # Returns
    /// Mutable reference to CPU instance
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// Get reference to memory bus
    ///
    /// # Returns
    /// Reference to Bus instance
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to memory bus
    ///
    /// # Returns
    /// Mutable reference to Bus instance
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Get reference to GPU
    ///
    /// # Returns
    /// Reference to GPU instance (wrapped in Rc<RefCell>)
    pub fn gpu(&self) -> Rc<RefCell<GPU>> {
        Rc::clone(&self.gpu)
    }

    /// Get reference to Controller Ports
    ///
    /// # Returns
    /// Reference to ControllerPorts instance (wrapped in Rc<RefCell>)
    pub fn controller_ports(&self) -> Rc<RefCell<ControllerPorts>> {
        Rc::clone(&self.controller_ports)
    }

    /// Get reference to CDROM
    ///
    /// # Returns
    /// Reference to CDROM instance (wrapped in Rc<RefCell>)
    pub fn cdrom(&self) -> Rc<RefCell<CDROM>> {
        Rc::clone(&self.cdrom)
    }

    /// Load a game from CD-ROM and prepare for execution
    ///
    /// **Current Implementation Status (Partial):**
    ///
    /// Currently implemented:
    /// 1. Load disc image from .cue file
    /// 2. Read SYSTEM.CNF from disc (hard-coded filename: "SYSTEM.CNF;1")
    /// 3. Parse SYSTEM.CNF to find boot executable path
    /// 4. Read the boot PSX-EXE from disc and parse its header
    /// 5. Copy executable data into RAM
    /// 6. Set CPU registers (PC, GP, SP, FP) and jump to the entry point
    ///
    /// # Arguments
    ///
    /// * `cue_path` - Path to the disc image .cue file
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the disc loads and the boot executable starts running
    /// - `Err(EmulatorError)` if the disc, `SYSTEM.CNF`, or the executable
    ///   can't be read or parsed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.load_bios("SCPH1001.BIN").unwrap();
    /// system.reset();
    /// system.load_game("game.cue").unwrap();
    /// ```
    pub fn load_game(&mut self, cue_path: &str) -> Result<()> {
        use super::loader::{PSXExecutable, SystemConfig};

        log::info!("Loading game from: {}", cue_path);

        // Step 1: Load disc image
        self.cdrom
            .borrow_mut()
            .load_disc(cue_path)
            .map_err(EmulatorError::CdRom)?;

        log::info!("Disc loaded successfully");

        // Step 2: Read SYSTEM.CNF from disc
        let system_cnf_data = self
            .cdrom
            .borrow_mut()
            .read_file("SYSTEM.CNF;1")
            .map_err(EmulatorError::CdRom)?;

        let system_cnf_text = String::from_utf8_lossy(&system_cnf_data);
        log::debug!("SYSTEM.CNF contents:\n{}", system_cnf_text);

        // Step 3: Parse SYSTEM.CNF
        let config = SystemConfig::parse(&system_cnf_text)?;
        log::info!("Boot file: {}", config.boot_file);
        log::debug!("Stack: 0x{:08X}", config.stack);

        // Step 4: Read the boot executable from disc and parse its header.
        // `BOOT` is a path like `cdrom:\SLUS_000.01;1`; `read_file` only
        // walks the root directory, so strip everything but the filename.
        let boot_filename = config
            .boot_file
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(&config.boot_file);
        let exe_data = self
            .cdrom
            .borrow_mut()
            .read_file(boot_filename)
            .map_err(EmulatorError::CdRom)?;
        let exe = PSXExecutable::load(&exe_data)?;

        // Step 5: Copy executable data into RAM, byte-wise so the bus's
        // existing icache invalidation queue sees every written address
        for (offset, &byte) in exe.data.iter().enumerate() {
            self.bus
                .write8(exe.load_address.wrapping_add(offset as u32), byte)?;
        }
        for addr in self.bus.drain_icache_invalidate_queue() {
            self.cpu.invalidate_icache(addr);
        }

        // Step 6: Set CPU registers and jump to the entry point
        self.cpu.set_pc(exe.pc);
        self.cpu.set_reg(28, exe.gp); // $gp

        // `SystemConfig::parse` defaults `stack` to 0x801FFF00 when SYSTEM.CNF
        // doesn't set STACK; prefer the executable's own header value in
        // that case, falling back to the default if the header has none.
        let sp = if config.stack != 0x801FFF00 {
            config.stack
        } else if exe.stack_base != 0 {
            exe.stack_base.wrapping_add(exe.stack_offset)
        } else {
            config.stack
        };
        self.cpu.set_reg(29, sp); // $sp
        self.cpu.set_reg(30, sp); // $fp

        // Fast-boot: skip the BIOS's own shell/boot animation entirely by
        // jumping straight to the executable and running the rest of the
        // boot-time kernel calls (pad/event polling) through HLE instead.
        self.set_hle_vectors(true);

        log::info!("Game loaded successfully!");
        log::info!("Entry point: 0x{:08X}", exe.pc);
        log::info!("Global pointer: 0x{:08X}", exe.gp);
        log::info!("Stack pointer: 0x{:08X}", sp);

        Ok(())
    }

    /// Enable CPU execution tracing to a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the trace file to write
    /// * `limit` - Maximum number of instructions to trace (0 = unlimited)
    ///
    /// # Returns
    ///
    /// - `Ok(())` if tracing was enabled successfully
    /// - `Err(EmulatorError)` if file creation fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.enable_tracing("trace.log", 5000).unwrap(); // Trace first 5000 instructions
    /// ```
    pub fn enable_tracing(&mut self, path: &str, limit: usize) -> Result<()> {
        self.tracer = Some(CpuTracer::new(path)?);
        self.trace_limit = limit;
        self.trace_count = 0;
        log::info!(
            "CPU tracing enabled: {} (limit: {})",
            path,
            if limit == 0 {
                "unlimited".to_string()
            } else {
                limit.to_string()
            }
        );
        Ok(())
    }

    /// Disable CPU execution tracing
    ///
    /// Closes the trace file and disables tracing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psrx::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.enable_tracing("trace.log", 1000).unwrap();
    /// // ... run emulation ...
    /// system.disable_tracing();
    /// ```
    pub fn disable_tracing(&mut self) {
        if self.tracer.is_some() {
            log::info!(
                "CPU tracing disabled (traced {} instructions)",
                self.trace_count
            );
            self.tracer = None;
            self.trace_limit = 0;
            self.trace_count = 0;
        }
    }

    /// Check if tracing is currently enabled
    ///
    /// # Returns
    /// true if tracing is active
    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Get the number of instructions traced so far
    ///
    /// # Returns
    /// Number of instructions traced
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
