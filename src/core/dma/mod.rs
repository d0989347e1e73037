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

//! DMA (Direct Memory Access) Controller
//!
//! Seven channels, each dedicated to a peripheral, transferring data between
//! RAM and a device without CPU intervention.
//!
//! | Channel | Device      | Base Address |
//! |---------|-------------|--------------|
//! | 0       | MDEC In     | 0x1F801080   |
//! | 1       | MDEC Out    | 0x1F801090   |
//! | 2       | GPU         | 0x1F8010A0   |
//! | 3       | CD-ROM      | 0x1F8010B0   |
//! | 4       | SPU         | 0x1F8010C0   |
//! | 5       | PIO         | 0x1F8010D0   |
//! | 6       | OTC         | 0x1F8010E0   |
//!
//! Each channel has three registers (MADR, BCR, CHCR); two global registers
//! (DPCR, DICR) hold priority/enable and interrupt state across channels.
//!
//! # References
//!
//! - [PSX-SPX: DMA Controller](http://problemkaputt.de/psx-spx.htm#dmacontroller)

use crate::core::cdrom::CDROM;
use crate::core::gpu::GPU;
use crate::core::spu::SPU;

#[cfg(test)]
mod tests;

/// DMA Controller with 7 channels.
///
/// # Examples
///
/// ```
/// use psrx::core::dma::DMA;
///
/// let mut dma = DMA::new();
/// assert_eq!(dma.read_control(), 0x07654321);
/// ```
pub struct DMA {
    channels: [DMAChannel; 7],
    /// DPCR (0x1F8010F0): channel priority/enable, default 0x07654321.
    control: u32,
    /// DICR (0x1F8010F4): interrupt enables, flags and master enable/force.
    interrupt: u32,
    /// Previous state of the aggregate DMA IRQ line, for edge detection.
    prev_line: bool,
}

/// Single DMA channel.
#[derive(Clone)]
pub struct DMAChannel {
    /// MADR: base address in RAM for the transfer.
    base_address: u32,
    /// BCR: bits 0-15 block size (words), bits 16-31 block count.
    block_control: u32,
    /// CHCR: direction / step / sync mode / chop / start / trigger bits.
    channel_control: u32,
    channel_id: u8,
}

impl DMAChannel {
    const TRANSFER_TO_RAM: u32 = 0;
    const TRANSFER_FROM_RAM: u32 = 1;

    fn new(channel_id: u8) -> Self {
        Self {
            base_address: 0,
            block_control: 0,
            channel_control: 0,
            channel_id,
        }
    }

    /// Start/busy flag (bit 24 of CHCR).
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        (self.channel_control & 0x0100_0000) != 0
    }

    /// Transfer direction: 0 = device→RAM, 1 = RAM→device (bit 0 of CHCR).
    #[inline(always)]
    pub fn direction(&self) -> u32 {
        self.channel_control & 1
    }

    /// Synchronization mode (bits 9-10 of CHCR): 0 manual, 1 request, 2 linked-list.
    #[inline(always)]
    pub fn sync_mode(&self) -> u32 {
        (self.channel_control >> 9) & 3
    }

    /// Manual-start trigger bit (bit 28 of CHCR).
    #[inline(always)]
    pub fn trigger(&self) -> bool {
        (self.channel_control & 0x1000_0000) != 0
    }

    fn deactivate(&mut self) {
        log::trace!("DMA channel {} deactivated", self.channel_id);
        self.channel_control &= !0x0100_0000;
    }
}

impl DMA {
    #[allow(dead_code)]
    const CH_MDEC_IN: usize = 0;
    #[allow(dead_code)]
    const CH_MDEC_OUT: usize = 1;
    pub const CH_GPU: usize = 2;
    pub const CH_CDROM: usize = 3;
    #[allow(dead_code)]
    const CH_SPU: usize = 4;
    #[allow(dead_code)]
    const CH_PIO: usize = 5;
    pub const CH_OTC: usize = 6;

    /// DICR bit layout.
    const DICR_FORCE: u32 = 1 << 15;
    const DICR_ENABLE_BASE: u32 = 16; // per-channel enable bits 16..=22
    const DICR_MASTER_ENABLE: u32 = 1 << 23;
    const DICR_FLAG_BASE: u32 = 24; // per-channel flag bits 24..=30, write-1-clears
    const DICR_MASTER_FLAG: u32 = 1 << 31;
    const DICR_WRITABLE: u32 = 0x00FF_FFC0; // bits 6..=23

    /// Create a new DMA controller; all channels inactive, default priority.
    pub fn new() -> Self {
        Self {
            channels: std::array::from_fn(|i| DMAChannel::new(i as u8)),
            control: 0x0765_4321,
            interrupt: 0,
            prev_line: false,
        }
    }

    /// Process active, triggered channels in priority order.
    ///
    /// Returns `true` exactly once per rising edge of the aggregate DMA IRQ
    /// line (i.e. when a channel completion newly causes DICR's master flag
    /// to go from 0 to 1); the caller should latch that edge into the
    /// interrupt controller.
    pub fn tick(&mut self, ram: &mut [u8], gpu: &mut GPU, cdrom: &mut CDROM, spu: &mut SPU) -> bool {
        for ch_id in 0..7 {
            if self.channels[ch_id].is_active() && self.channels[ch_id].trigger() {
                self.execute_transfer(ch_id, ram, gpu, cdrom, spu);
            }
        }

        let line = self.recompute_master_flag();
        let rising = line && !self.prev_line;
        self.prev_line = line;
        rising
    }

    fn execute_transfer(
        &mut self,
        ch_id: usize,
        ram: &mut [u8],
        gpu: &mut GPU,
        cdrom: &mut CDROM,
        spu: &mut SPU,
    ) {
        log::debug!(
            "DMA{} transfer: addr=0x{:08X} bcr=0x{:08X} chcr=0x{:08X}",
            ch_id,
            self.channels[ch_id].base_address,
            self.channels[ch_id].block_control,
            self.channels[ch_id].channel_control
        );

        match ch_id {
            Self::CH_GPU => self.transfer_gpu(ram, gpu),
            Self::CH_CDROM => self.transfer_cdrom(ram, cdrom),
            Self::CH_OTC => self.transfer_otc(ram),
            _ => {
                // MDEC in/out, SPU, PIO: devices are out of scope. Complete
                // the transfer as a no-op move so CHCR still clears and the
                // channel-flag bit still latches.
                let _ = spu;
                log::trace!("DMA{} device not modeled, completing as no-op", ch_id);
                self.channels[ch_id].deactivate();
            }
        }

        if self.channel_irq_enabled(ch_id) {
            self.interrupt |= 1 << (Self::DICR_FLAG_BASE + ch_id as u32);
        }
    }

    fn transfer_gpu(&mut self, ram: &mut [u8], gpu: &mut GPU) {
        let sync_mode = self.channels[Self::CH_GPU].sync_mode();
        let direction = self.channels[Self::CH_GPU].direction();
        let base_address = self.channels[Self::CH_GPU].base_address;
        let block_control = self.channels[Self::CH_GPU].block_control;

        match sync_mode {
            2 => {
                // Linked-list mode: node header = (next_pointer: 24 bits,
                // word_count: top byte). Terminator is next_pointer == 0xFFFFFF.
                let mut addr = base_address & 0x001F_FFFC;

                loop {
                    let header = self.read_ram_u32(ram, addr);
                    let count = (header >> 24) as usize;
                    let next_pointer = header & 0x00FF_FFFF;

                    for i in 0..count {
                        let word = self.read_ram_u32(ram, addr + 4 + (i * 4) as u32);
                        gpu.write_gp0(word);
                    }

                    if next_pointer == 0x00FF_FFFF {
                        break;
                    }

                    addr = next_pointer & 0x001F_FFFC;
                }

                self.channels[Self::CH_GPU].deactivate();
                log::debug!("GPU DMA linked-list transfer complete");
            }
            0 | 1 => {
                let block_size = (block_control & 0xFFFF) as usize;
                let block_count = ((block_control >> 16) & 0xFFFF) as usize;
                let mut addr = base_address & 0x001F_FFFC;

                let total_words = if sync_mode == 0 {
                    block_size
                } else {
                    block_size * block_count
                };

                if direction == DMAChannel::TRANSFER_FROM_RAM {
                    for _ in 0..total_words {
                        let word = self.read_ram_u32(ram, addr);
                        gpu.write_gp0(word);
                        addr = (addr + 4) & 0x001F_FFFC;
                    }
                } else if direction == DMAChannel::TRANSFER_TO_RAM {
                    for _ in 0..total_words {
                        let word = gpu.read_gpuread();
                        self.write_ram_u32(ram, addr, word);
                        addr = (addr + 4) & 0x001F_FFFC;
                    }
                }

                self.channels[Self::CH_GPU].deactivate();
                log::debug!("GPU DMA block transfer complete ({} words)", total_words);
            }
            _ => {
                log::warn!("GPU DMA sync mode {} not supported", sync_mode);
                self.channels[Self::CH_GPU].deactivate();
            }
        }
    }

    fn transfer_cdrom(&mut self, ram: &mut [u8], cdrom: &mut CDROM) {
        let block_control = self.channels[Self::CH_CDROM].block_control;
        let base_address = self.channels[Self::CH_CDROM].base_address;

        let block_size = (block_control & 0xFFFF) as usize;
        let block_count = ((block_control >> 16) & 0xFFFF).max(1) as usize;

        let mut addr = base_address & 0x001F_FFFC;
        let total_words = block_size * block_count;

        for _ in 0..total_words {
            let byte0 = cdrom.get_data_byte();
            let byte1 = cdrom.get_data_byte();
            let byte2 = cdrom.get_data_byte();
            let byte3 = cdrom.get_data_byte();

            let word = u32::from_le_bytes([byte0, byte1, byte2, byte3]);
            self.write_ram_u32(ram, addr, word);
            addr = (addr + 4) & 0x001F_FFFC;
        }

        self.channels[Self::CH_CDROM].deactivate();
        log::debug!(
            "CD-ROM DMA transfer complete ({} words = {} bytes)",
            total_words,
            total_words * 4
        );
    }

    /// Build a reverse-linked list in RAM, terminated by `0xFFFFFF`, used to
    /// initialize the GPU's ordering table before rendering.
    fn transfer_otc(&mut self, ram: &mut [u8]) {
        let block_control = self.channels[Self::CH_OTC].block_control;
        let base_address = self.channels[Self::CH_OTC].base_address;

        let count = block_control & 0xFFFF;
        let mut addr = base_address & 0x001F_FFFC;

        for i in 0..count {
            if i == count - 1 {
                self.write_ram_u32(ram, addr, 0x00FF_FFFF);
            } else {
                self.write_ram_u32(ram, addr, addr.wrapping_sub(4) & 0x001F_FFFC);
            }
            addr = addr.wrapping_sub(4) & 0x001F_FFFC;
        }

        self.channels[Self::CH_OTC].deactivate();
        log::debug!("OTC DMA transfer complete ({} entries)", count);
    }

    #[inline(always)]
    fn read_ram_u32(&self, ram: &[u8], addr: u32) -> u32 {
        let addr = (addr & 0x001F_FFFC) as usize;
        if addr + 4 > ram.len() {
            log::error!("DMA read out of bounds: 0x{:08X}", addr);
            return 0;
        }
        u32::from_le_bytes([ram[addr], ram[addr + 1], ram[addr + 2], ram[addr + 3]])
    }

    #[inline(always)]
    fn write_ram_u32(&self, ram: &mut [u8], addr: u32, value: u32) {
        let addr = (addr & 0x001F_FFFC) as usize;
        if addr + 4 > ram.len() {
            log::error!("DMA write out of bounds: 0x{:08X}", addr);
            return;
        }
        ram[addr..addr + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn channel_irq_enabled(&self, channel: usize) -> bool {
        (self.interrupt >> (Self::DICR_ENABLE_BASE + channel as u32)) & 1 != 0
    }

    fn master_enable(&self) -> bool {
        (self.interrupt & Self::DICR_MASTER_ENABLE) != 0
    }

    fn force(&self) -> bool {
        (self.interrupt & Self::DICR_FORCE) != 0
    }

    /// Recompute DICR bit 31 from force/master-enable/per-channel flags and
    /// return the resulting line level.
    fn recompute_master_flag(&mut self) -> bool {
        let any_enabled_and_flagged = (0..7).any(|ch| {
            self.channel_irq_enabled(ch) && (self.interrupt >> (Self::DICR_FLAG_BASE + ch as u32)) & 1 != 0
        });
        let summary = self.force() || (self.master_enable() && any_enabled_and_flagged);
        if summary {
            self.interrupt |= Self::DICR_MASTER_FLAG;
        } else {
            self.interrupt &= !Self::DICR_MASTER_FLAG;
        }
        summary
    }

    pub fn read_madr(&self, channel: usize) -> u32 {
        self.channels[channel].base_address
    }

    pub fn write_madr(&mut self, channel: usize, value: u32) {
        self.channels[channel].base_address = value & 0x00FF_FFFF;
        log::trace!("DMA{} MADR = 0x{:08X}", channel, value);
    }

    pub fn read_bcr(&self, channel: usize) -> u32 {
        self.channels[channel].block_control
    }

    pub fn write_bcr(&mut self, channel: usize, value: u32) {
        self.channels[channel].block_control = value;
        log::trace!("DMA{} BCR = 0x{:08X}", channel, value);
    }

    pub fn read_chcr(&self, channel: usize) -> u32 {
        self.channels[channel].channel_control
    }

    pub fn write_chcr(&mut self, channel: usize, value: u32) {
        self.channels[channel].channel_control = value;
        log::trace!("DMA{} CHCR = 0x{:08X}", channel, value);

        if (value & 0x0100_0000) != 0 {
            log::debug!(
                "DMA{} started: addr=0x{:08X} bcr=0x{:08X} mode={}",
                channel,
                self.channels[channel].base_address,
                self.channels[channel].block_control,
                self.channels[channel].sync_mode()
            );
        }
    }

    pub fn read_control(&self) -> u32 {
        self.control
    }

    pub fn write_control(&mut self, value: u32) {
        self.control = value;
        log::trace!("DPCR = 0x{:08X}", value);
    }

    pub fn read_interrupt(&self) -> u32 {
        self.interrupt
    }

    pub fn write_interrupt(&mut self, value: u32) {
        self.interrupt = (self.interrupt & !Self::DICR_WRITABLE) | (value & Self::DICR_WRITABLE);

        let clear_mask = (value >> Self::DICR_FLAG_BASE) & 0x7F;
        self.interrupt &= !(clear_mask << Self::DICR_FLAG_BASE);

        self.recompute_master_flag();
        log::trace!("DICR = 0x{:08X}", self.interrupt);
    }
}

impl Default for DMA {
    fn default() -> Self {
        Self::new()
    }
}
