// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! CD-ROM command implementations
//!
//! Each command pops its parameters off `param_fifo`, pushes response bytes
//! onto `response_fifo`, and latches one or two IRQ values (INT3 for the
//! first/acknowledge response, INT2 for a delayed second response, INT5 on
//! error). Status-byte reads go through a local first so they never overlap
//! a mutable borrow of `response_fifo` in the same expression.

use super::{bcd_to_dec, dec_to_bcd, CDPosition, CDState, CDROM};

impl CDROM {
    /// Dispatch a command byte, consuming parameters and producing
    /// responses/interrupts.
    pub fn execute_command(&mut self, cmd: u8) {
        log::debug!("CD-ROM command: 0x{:02X}", cmd);

        match cmd {
            0x01 => self.cmd_getstat(),
            0x02 => self.cmd_setloc(),
            0x03 => self.cmd_play(),
            0x06 => self.cmd_readn(),
            0x09 => self.cmd_pause(),
            0x0A => self.cmd_init(),
            0x0E => self.cmd_setmode(),
            0x11 => self.cmd_getlocp(),
            0x10 => self.cmd_getlocl(),
            0x12 => self.cmd_setsession(),
            0x13 => self.cmd_gettn(),
            0x14 => self.cmd_gettd(),
            0x15 => self.cmd_seekl(),
            0x16 => self.cmd_seekp(),
            0x19 => self.cmd_test(),
            0x1A => self.cmd_getid(),
            0x1B => self.cmd_reads(),
            0x1E => self.cmd_readtoc(),
            _ => {
                log::warn!("Unknown CD-ROM command: 0x{:02X}", cmd);
                self.error_response();
            }
        }
    }

    /// Command 0x01: GetStat.
    pub(super) fn cmd_getstat(&mut self) {
        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
    }

    /// Command 0x02: SetLoc — latch seek target from 3 BCD parameter bytes.
    pub(super) fn cmd_setloc(&mut self) {
        if self.param_fifo.len() < 3 {
            log::warn!("CD-ROM: SetLoc with insufficient parameters");
            self.error_response();
            return;
        }

        let minute = self.param_fifo.pop_front().unwrap();
        let second = self.param_fifo.pop_front().unwrap();
        let sector = self.param_fifo.pop_front().unwrap();

        self.seek_target = Some(CDPosition::new(
            bcd_to_dec(minute),
            bcd_to_dec(second),
            bcd_to_dec(sector),
        ));

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
    }

    /// Command 0x03: Play — start CD-DA playback at the current/seek-target
    /// position. Not wired to an audio sink; advances position like a read.
    pub(super) fn cmd_play(&mut self) {
        if let Some(target) = self.seek_target.take() {
            self.position = target;
        }
        self.state = CDState::Playing;
        self.status.playing = true;
        self.read_ticks = 0;

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
    }

    /// Command 0x06: ReadN — begin reading data sectors at current position.
    pub(super) fn cmd_readn(&mut self) {
        if let Some(target) = self.seek_target.take() {
            self.position = target;
        }
        self.state = CDState::Reading;
        self.status.reading = true;
        self.read_ticks = 0;

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
    }

    /// Command 0x09: Pause.
    pub(super) fn cmd_pause(&mut self) {
        self.state = CDState::Idle;
        self.status.reading = false;
        self.status.playing = false;

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);

        let stat2 = self.get_status_byte();
        self.response_fifo.push_back(stat2);
        self.trigger_interrupt(2);
    }

    /// Command 0x0A: Init — motor on, reset state, begin spin-up.
    pub(super) fn cmd_init(&mut self) {
        self.status.motor_on = true;
        self.state = CDState::Idle;
        self.status.reading = false;
        self.status.seeking = false;
        self.status.playing = false;
        self.motor_spinup_ticks = Self::MOTOR_SPINUP_CYCLES;

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);

        let stat2 = self.get_status_byte();
        self.response_fifo.push_back(stat2);
        self.trigger_interrupt(2);
    }

    /// Command 0x0E: SetMode.
    pub(super) fn cmd_setmode(&mut self) {
        if self.param_fifo.is_empty() {
            log::warn!("CD-ROM: SetMode with no parameters");
            self.error_response();
            return;
        }

        let mode_byte = self.param_fifo.pop_front().unwrap();

        self.mode.cdda_report = (mode_byte & 0x01) != 0;
        self.mode.auto_pause = (mode_byte & 0x02) != 0;
        self.mode.report_all = (mode_byte & 0x04) != 0;
        self.mode.xa_filter = (mode_byte & 0x08) != 0;
        self.mode.ignore_bit = (mode_byte & 0x10) != 0;
        self.mode.size_2340 = (mode_byte & 0x20) != 0;
        self.mode.xa_adpcm = (mode_byte & 0x40) != 0;
        self.mode.double_speed = (mode_byte & 0x80) != 0;

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
    }

    /// Command 0x10: GetLocL — header/subheader of the last-read data sector.
    pub(super) fn cmd_getlocl(&mut self) {
        if self.data_buffer.len() < 8 {
            self.error_response();
            return;
        }
        for &b in &self.data_buffer[0..8] {
            self.response_fifo.push_back(b);
        }
        self.trigger_interrupt(3);
    }

    /// Command 0x11: GetLocP — current physical MSF position and track info.
    pub(super) fn cmd_getlocp(&mut self) {
        let track = self
            .disc
            .as_ref()
            .and_then(|d| d.get_track(1))
            .map(|t| t.number)
            .unwrap_or(1);

        self.response_fifo.push_back(dec_to_bcd(track));
        self.response_fifo.push_back(dec_to_bcd(1)); // index
        self.response_fifo.push_back(dec_to_bcd(self.position.minute));
        self.response_fifo.push_back(dec_to_bcd(self.position.second));
        self.response_fifo.push_back(dec_to_bcd(self.position.minute));
        self.response_fifo.push_back(dec_to_bcd(self.position.second));
        self.response_fifo.push_back(dec_to_bcd(self.position.sector));
        self.trigger_interrupt(3);
    }

    /// Command 0x12: SetSession — switch to a given CD session (multi-session
    /// discs are out of scope; acknowledged as a no-op).
    pub(super) fn cmd_setsession(&mut self) {
        self.param_fifo.clear();
        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);
        let stat2 = self.get_status_byte();
        self.response_fifo.push_back(stat2);
        self.trigger_interrupt(2);
    }

    /// Command 0x13: GetTN — first/last track numbers.
    pub(super) fn cmd_gettn(&mut self) {
        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);

        if let Some(ref disc) = self.disc {
            self.response_fifo.push_back(dec_to_bcd(1));
            self.response_fifo.push_back(dec_to_bcd(disc.track_count() as u8));
        } else {
            self.response_fifo.push_back(dec_to_bcd(1));
            self.response_fifo.push_back(dec_to_bcd(1));
        }
        self.trigger_interrupt(3);
    }

    /// Command 0x14: GetTD — start position of a given track (param 0 = 1
    /// parameter byte: track number, 0 = lead-out).
    pub(super) fn cmd_gettd(&mut self) {
        let track_num = self.param_fifo.pop_front().unwrap_or(0);
        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);

        if let Some(ref disc) = self.disc {
            if track_num == 0 {
                let total = disc.total_sectors() as i32;
                let pos = CDPosition::from_lba(total);
                self.response_fifo.push_back(dec_to_bcd(pos.minute));
                self.response_fifo.push_back(dec_to_bcd(pos.second));
            } else if let Some(track) = disc.get_track(track_num) {
                self.response_fifo.push_back(dec_to_bcd(track.start_position.minute));
                self.response_fifo.push_back(dec_to_bcd(track.start_position.second));
            } else {
                self.response_fifo.push_back(0);
                self.response_fifo.push_back(0);
            }
        } else {
            self.response_fifo.push_back(0);
            self.response_fifo.push_back(0);
        }
        self.trigger_interrupt(3);
    }

    /// Command 0x15: SeekL — seek to target position (data mode).
    pub(super) fn cmd_seekl(&mut self) {
        if self.seek_target.is_some() {
            self.state = CDState::Seeking;
            self.status.seeking = true;
            self.seek_ticks = 0;

            let stat = self.get_status_byte();
            self.response_fifo.push_back(stat);
            self.trigger_interrupt(3);
        } else {
            log::warn!("CD-ROM: SeekL with no target set");
            self.error_response();
        }
    }

    /// Command 0x16: SeekP — seek to target position (audio mode). Shares
    /// the same seek/tick machinery as SeekL.
    pub(super) fn cmd_seekp(&mut self) {
        self.cmd_seekl();
    }

    /// Command 0x19: Test — diagnostic sub-functions.
    pub(super) fn cmd_test(&mut self) {
        if self.param_fifo.is_empty() {
            log::warn!("CD-ROM: Test with no parameters");
            self.error_response();
            return;
        }

        let subfunction = self.param_fifo.pop_front().unwrap();

        match subfunction {
            0x20 => {
                // BIOS date/version, fixed to SCPH-1001-era firmware.
                self.response_fifo.push_back(0x98);
                self.response_fifo.push_back(0x08);
                self.response_fifo.push_back(0x07);
                self.response_fifo.push_back(0xC3);
                self.trigger_interrupt(3);
            }
            0x04 => {
                let stat = self.get_status_byte();
                self.response_fifo.push_back(stat);
                self.response_fifo.push_back(0x00);
                self.response_fifo.push_back(0x00);
                self.response_fifo.push_back(0x00);
                self.response_fifo.push_back(0x00);
                self.trigger_interrupt(3);
            }
            _ => {
                log::warn!("CD-ROM: unknown Test sub-function 0x{:02X}", subfunction);
                let stat = self.get_status_byte();
                self.response_fifo.push_back(stat);
                self.trigger_interrupt(3);
            }
        }
    }

    /// Command 0x1A: GetID.
    pub(super) fn cmd_getid(&mut self) {
        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);

        if self.disc.is_some() {
            let stat2 = self.get_status_byte();
            self.response_fifo.push_back(stat2);
            self.response_fifo.push_back(0x00); // licensed
            self.response_fifo.push_back(0x20); // audio+cdrom
            self.response_fifo.push_back(0x00);
            self.response_fifo.push_back(b'S');
            self.response_fifo.push_back(b'C');
            self.response_fifo.push_back(b'E');
            self.response_fifo.push_back(b'A'); // region inferred as SCEA; a
                                                 // full region table keyed on
                                                 // the disc's license string
                                                 // is out of scope here
            self.trigger_interrupt(2);
        } else {
            self.status.id_error = true;
            self.error_response();
        }
    }

    /// Command 0x1B: ReadS — read with retry (modeled identically to ReadN).
    pub(super) fn cmd_reads(&mut self) {
        self.cmd_readn();
    }

    /// Command 0x1E: ReadTOC.
    pub(super) fn cmd_readtoc(&mut self) {
        if self.disc.is_none() {
            log::warn!("CD-ROM: ReadTOC with no disc loaded");
            self.status.id_error = true;
            self.error_response();
            return;
        }

        let stat = self.get_status_byte();
        self.response_fifo.push_back(stat);
        self.trigger_interrupt(3);

        let stat2 = self.get_status_byte();
        self.response_fifo.push_back(stat2);
        self.trigger_interrupt(2);
    }
}
