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

//! BIOS kernel-call high-level emulation.
//!
//! The real BIOS writes three tiny dispatcher stubs into low RAM at
//! addresses 0xA0, 0xB0 and 0xC0; game and BIOS code alike call kernel
//! functions by loading a selector into `$t1` and jumping to one of those
//! three addresses. Rather than interpret the BIOS's own table-driven
//! dispatcher and each function's machine code, `System::step` intercepts
//! execution at those three addresses directly and runs an equivalent Rust
//! routine, then returns to the caller the same way the real routine would
//! (`jr $ra`).
//!
//! Only the subset of calls needed for boot progression (see `spec.md`
//! §4.8) is implemented; anything else is logged and treated as a no-op so
//! unrecognized calls don't stall the caller.

use super::System;

/// Which of the three kernel dispatcher stubs was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HleTable {
    A0,
    B0,
    C0,
}

/// State of an event handle created by `OpenEvent`.
///
/// Fields mirror the BIOS's own `EvCB` record closely enough for
/// diagnostics; `TestEvent`/`WaitEvent` don't consult them; see their doc
/// comments for why.
#[derive(Debug, Clone, Copy)]
pub(super) struct KernelEvent {
    pub class: u32,
    pub spec: u32,
    pub mode: u32,
    pub handler: u32,
}

/// Physical address, stripping the KUSEG/KSEG0/KSEG1 segment bits — the
/// three dispatcher stubs live at the same RAM offset regardless of which
/// alias they were jumped to through.
fn physical(addr: u32) -> u32 {
    addr & 0x1FFF_FFFF
}

impl System {
    /// If `hle_vectors` is enabled and the CPU is sitting at the entry of
    /// one of the three kernel dispatcher stubs, run the HLE routine for
    /// the selector in `$t1` and simulate its `jr $ra` return. Returns
    /// `true` if a call was intercepted (the caller should skip the normal
    /// `cpu.step()` for this cycle).
    pub(super) fn try_intercept_hle(&mut self) -> bool {
        if !self.hle_vectors {
            return false;
        }

        let table = match physical(self.cpu.pc()) {
            0xA0 => HleTable::A0,
            0xB0 => HleTable::B0,
            0xC0 => HleTable::C0,
            _ => return false,
        };

        let selector = self.cpu.reg(9); // $t1

        self.dispatch_hle(table, selector);
        true
    }

    fn dispatch_hle(&mut self, table: HleTable, selector: u32) {
        match (table, selector) {
            (HleTable::A0, 0x17) | (HleTable::B0, 0x17) => self.hle_return_from_exception(),
            (HleTable::A0, 0x25) | (HleTable::B0, 0x3D) => self.hle_std_out_putchar(),
            (HleTable::A0, 0x3F) => self.hle_printf(),
            (HleTable::B0, 0x08) => self.hle_open_event(),
            (HleTable::B0, 0x09) => self.hle_close_event(),
            (HleTable::B0, 0x0B) => self.hle_wait_event(),
            (HleTable::B0, 0x0C) => self.hle_test_event(),
            (HleTable::B0, 0x4B) => self.hle_start_pad(),
            (HleTable::B0, 0x72) => self.hle_cd_remove(),
            _ => {
                log::debug!(
                    "HLE: unimplemented {:?} call 0x{:02X} at ra=0x{:08X} (treated as no-op)",
                    table,
                    selector,
                    self.cpu.reg(31)
                );
                self.hle_return_to_caller();
            }
        }
    }

    /// `jr $ra` — every HLE routine except `ReturnFromException` (which
    /// computes its own target from EPC) ends this way.
    fn hle_return_to_caller(&mut self) {
        let ra = self.cpu.reg(31);
        self.cpu.set_pc(ra);
    }

    /// A0:0x17 / B0:0x17 ReturnFromException.
    ///
    /// Stands in for the tail of the BIOS's own exception handler: restores
    /// the processor mode `exception()` pushed and resumes at EPC.
    fn hle_return_from_exception(&mut self) {
        self.cpu.return_from_exception();
    }

    /// A0:0x25 std_out_putchar / B0:0x3D std_out_putchar.
    ///
    /// `$a0` holds the character; returns it unchanged in `$v0`, matching
    /// the C `putchar` convention the BIOS's own implementation follows.
    fn hle_std_out_putchar(&mut self) {
        let ch = self.cpu.reg(4) as u8;
        (self.putchar)(ch);
        self.cpu.set_reg(2, ch as u32); // $v0
        self.hle_return_to_caller();
    }

    /// A0:0x3F printf.
    ///
    /// `$a0` is the format string; `$a1..$a3` are the first three
    /// arguments, further arguments are read from the stack starting at
    /// `$sp + 0x10` (the caller's argument-spill area in the MIPS o32
    /// convention). Supports the conversions the BIOS's own debug prints
    /// actually use: `%d %u %x %X %o %c %s %%`.
    fn hle_printf(&mut self) {
        let fmt_ptr = self.cpu.reg(4);
        let fmt = self.hle_read_cstring(fmt_ptr);

        let reg_args = [self.cpu.reg(5), self.cpu.reg(6), self.cpu.reg(7)];
        let mut reg_arg_index = 0usize;
        let mut stack_cursor = self.cpu.reg(29).wrapping_add(0x10);

        let mut out = String::new();
        let mut chars = fmt.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }

            let spec = match chars.next() {
                Some(s) => s,
                None => {
                    out.push('%');
                    break;
                }
            };

            if spec == '%' {
                out.push('%');
                continue;
            }

            let arg = if reg_arg_index < reg_args.len() {
                let v = reg_args[reg_arg_index];
                reg_arg_index += 1;
                v
            } else {
                let v = self.bus.read32(stack_cursor).unwrap_or(0);
                stack_cursor = stack_cursor.wrapping_add(4);
                v
            };

            match spec {
                'd' | 'i' => out.push_str(&(arg as i32).to_string()),
                'u' => out.push_str(&arg.to_string()),
                'x' => out.push_str(&format!("{:x}", arg)),
                'X' => out.push_str(&format!("{:X}", arg)),
                'o' => out.push_str(&format!("{:o}", arg)),
                'c' => out.push(arg as u8 as char),
                's' => out.push_str(&self.hle_read_cstring(arg)),
                other => {
                    out.push('%');
                    out.push(other);
                }
            }
        }

        let len = out.len();
        for byte in out.bytes() {
            (self.putchar)(byte);
        }
        self.cpu.set_reg(2, len as u32); // $v0

        self.hle_return_to_caller();
    }

    fn hle_read_cstring(&self, ptr: u32) -> String {
        let mut bytes = Vec::new();
        let mut addr = ptr;
        loop {
            match self.bus.read8(addr) {
                Ok(0) | Err(_) => break,
                Ok(b) => bytes.push(b),
            }
            addr = addr.wrapping_add(1);
            if bytes.len() >= 4096 {
                break;
            }
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// B0:0x08 OpenEvent($a0 class, $a1 spec, $a2 mode, $a3 handler) ->
    /// `$v0` event descriptor.
    fn hle_open_event(&mut self) {
        let handle = self.hle_next_event;
        self.hle_next_event = self.hle_next_event.wrapping_add(1);

        self.hle_events.insert(
            handle,
            KernelEvent {
                class: self.cpu.reg(4),
                spec: self.cpu.reg(5),
                mode: self.cpu.reg(6),
                handler: self.cpu.reg(7),
            },
        );

        self.cpu.set_reg(2, handle); // $v0
        self.hle_return_to_caller();
    }

    /// B0:0x09 CloseEvent($a0 handle) -> `$v0` 1 on success.
    fn hle_close_event(&mut self) {
        let handle = self.cpu.reg(4);
        self.hle_events.remove(&handle);
        self.cpu.set_reg(2, 1);
        self.hle_return_to_caller();
    }

    /// B0:0x0C TestEvent($a0 handle) -> `$v0` 1 if the event has occurred.
    ///
    /// No asynchronous device model feeds these events in this core, so a
    /// polling loop would otherwise spin forever; always reporting "ready"
    /// matches the fast-boot intent of skipping what this core doesn't
    /// model rather than hanging the guest.
    fn hle_test_event(&mut self) {
        self.cpu.set_reg(2, 1);
        self.hle_return_to_caller();
    }

    /// B0:0x0B WaitEvent($a0 handle) -> `$v0` 1.
    ///
    /// Same reasoning as `TestEvent`: resolves immediately instead of
    /// blocking on a condition this core never signals.
    fn hle_wait_event(&mut self) {
        self.cpu.set_reg(2, 1);
        self.hle_return_to_caller();
    }

    /// B0:0x4B StartPAD — the controller ports are already live from
    /// `System::new`, so this is a no-op beyond returning to the caller.
    fn hle_start_pad(&mut self) {
        self.hle_return_to_caller();
    }

    /// B0:0x72 CdRemove — no disc tray is modeled; report success.
    fn hle_cd_remove(&mut self) {
        self.cpu.set_reg(2, 1);
        self.hle_return_to_caller();
    }
}
