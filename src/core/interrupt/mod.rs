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

//! PSX Interrupt Controller Implementation
//!
//! The interrupt controller latches edge-triggered interrupt requests from
//! hardware components and aggregates them, through `i_mask`, into the
//! single COP0 Cause.IP2 line the CPU polls before every instruction.
//!
//! ## Registers
//!
//! - **I_STAT** (0x1F801070): Interrupt status register (R/W)
//!   - Reading returns the current latched interrupt flags
//!   - Writing 0 to a bit acknowledges (clears) that interrupt
//!   - Writing 1 to a bit is a no-op
//!
//! - **I_MASK** (0x1F801074): Interrupt mask register (R/W)
//!   - 1 = interrupt enabled, 0 = interrupt masked
//!
//! ## Interrupt Sources (Bit Positions)
//!
//! ```text
//! Bit  | Source        | Description
//! -----|---------------|----------------------------------
//! 0    | VBLANK        | Vertical blank interrupt
//! 1    | GPU           | GPU command/transfer complete
//! 2    | CDROM         | CD-ROM controller
//! 3    | DMA           | DMA transfer complete
//! 4    | TIMER0        | Timer 0 interrupt
//! 5    | TIMER1        | Timer 1 interrupt
//! 6    | TIMER2        | Timer 2 interrupt
//! 7    | PAD_MEMCARD   | Controller/memory card
//! 8    | SIO           | Serial I/O
//! 9    | SPU           | Sound processing unit
//! 10   | CONTROLLER    | Lightpen / PIO (IRQ10)
//! 11-15| -             | Not used
//! ```
//!
//! ## References
//!
//! - [PSX-SPX: Interrupt Control](http://problemkaputt.de/psx-spx.htm#interruptcontrol)

/// Interrupt source bit flags.
///
/// Bit assignment follows the hardware table exactly; note that bit 7 is the
/// pad/memory-card source and bit 10 is the (lightpen/PIO) "Controller"
/// source as named by hardware documentation — these are two different
/// things despite both touching the pad subsystem.
pub mod interrupts {
    /// Vertical blank interrupt (bit 0)
    pub const VBLANK: u16 = 1 << 0;
    /// GPU command/transfer complete interrupt (bit 1)
    pub const GPU: u16 = 1 << 1;
    /// CD-ROM controller interrupt (bit 2)
    pub const CDROM: u16 = 1 << 2;
    /// DMA transfer complete interrupt (bit 3)
    pub const DMA: u16 = 1 << 3;
    /// Timer 0 interrupt (bit 4)
    pub const TIMER0: u16 = 1 << 4;
    /// Timer 1 interrupt (bit 5)
    pub const TIMER1: u16 = 1 << 5;
    /// Timer 2 interrupt (bit 6)
    pub const TIMER2: u16 = 1 << 6;
    /// Pad / memory card interrupt (bit 7)
    pub const PAD_MEMCARD: u16 = 1 << 7;
    /// Serial I/O interrupt (bit 8)
    pub const SIO: u16 = 1 << 8;
    /// Sound processing unit interrupt (bit 9)
    pub const SPU: u16 = 1 << 9;
    /// Lightpen / PIO interrupt (bit 10)
    pub const CONTROLLER: u16 = 1 << 10;

    /// CPU Cause.IP2 bit, as passed to `CPU::check_interrupts`.
    ///
    /// All eleven interrupt-controller sources cascade into this single
    /// COP0 interrupt line; there is no one-to-one mapping between these
    /// source bits and the CPU's pending mask.
    pub const CASCADE_LINE: u8 = 1 << 2;
}

/// PlayStation Interrupt Controller.
///
/// # Example
///
/// ```
/// use psrx::core::interrupt::{InterruptController, interrupts};
///
/// let mut ic = InterruptController::new();
/// ic.request(interrupts::VBLANK);
/// ic.write_mask(interrupts::VBLANK as u32);
/// assert!(ic.is_pending());
///
/// // Acknowledge by writing a 0 to the VBLANK bit; other bits stay 1.
/// ic.write_status(!(interrupts::VBLANK as u32));
/// assert!(!ic.is_pending());
/// ```
pub struct InterruptController {
    /// I_STAT (0x1F801070) - latched interrupt status.
    status: u16,
    /// I_MASK (0x1F801074) - per-source enable.
    mask: u16,
}

impl InterruptController {
    /// Create a new interrupt controller with everything cleared and masked.
    pub fn new() -> Self {
        Self { status: 0, mask: 0 }
    }

    /// Latch an interrupt request (rising edge from a hardware source).
    ///
    /// Idempotent while the source stays latched: repeated calls before an
    /// acknowledge do not change behavior, matching the edge-triggered
    /// semantics where only a falling-then-rising edge re-latches.
    pub fn request(&mut self, interrupt: u16) {
        self.status |= interrupt;
        log::trace!(
            "IRQ requested: 0x{:04X}, status=0x{:04X}",
            interrupt,
            self.status
        );
    }

    /// Check whether any unmasked interrupt is pending (the Cause.IP2 input).
    pub fn is_pending(&self) -> bool {
        (self.status & self.mask) != 0
    }

    /// Read I_STAT.
    pub fn read_status(&self) -> u32 {
        self.status as u32
    }

    /// Write I_STAT: acknowledges bits written as 0, leaves bits written as
    /// 1 unchanged. Only the lower 16 bits of `value` are consulted.
    pub fn write_status(&mut self, value: u32) {
        self.status &= value as u16;
        log::trace!("IRQ acknowledged, status=0x{:04X}", self.status);
    }

    /// Read I_MASK.
    pub fn read_mask(&self) -> u32 {
        self.mask as u32
    }

    /// Write I_MASK.
    pub fn write_mask(&mut self, value: u32) {
        self.mask = value as u16;
        log::debug!("IRQ mask set: 0x{:04X}", self.mask);
    }
}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
