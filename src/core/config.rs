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

//! Host-side emulator configuration.
//!
//! Distinct from [`crate::core::loader::SystemConfig`], which parses the
//! guest's own `SYSTEM.CNF`. This type configures the host binary itself:
//! which BIOS/disc to load and how the core should run them. Loaded from a
//! TOML file, then overridden by `.env` values and finally by CLI flags —
//! each layer wins over the last.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{EmulatorError, Result};

/// Host-side configuration for a `psrx` run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Path to the PlayStation BIOS image.
    pub bios_path: String,

    /// Path to a CD-ROM image (`.cue`) to load, if any.
    pub disc_path: Option<PathBuf>,

    /// Multiplies the cycle cost `System::step` attributes to each
    /// instruction; values above 1 slow down guest time relative to host
    /// wall-clock, useful for stepping through fast-moving boot code.
    pub cycle_multiplier: u32,

    /// Number of bus cycles to batch before re-checking interrupts/timers
    /// in tight polling loops. See `spec.md` §4.6.
    pub bus_tick_batch: u32,

    /// Log every I/O port read/write at `trace` level.
    pub trace_io: bool,

    /// Render traced I/O with register/field names instead of raw hex.
    pub pretty_trace: bool,

    /// Intercept the BIOS's A0/B0/C0 kernel-call vectors with host HLE
    /// routines (see `system::hle`).
    pub hle_vectors: bool,

    /// Skip the BIOS's own shell/menu and jump straight to the disc's boot
    /// executable via `System::load_game`.
    pub fast_boot: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            bios_path: String::new(),
            disc_path: None,
            cycle_multiplier: 1,
            bus_tick_batch: 32,
            trace_io: false,
            pretty_trace: false,
            hle_vectors: true,
            fast_boot: true,
        }
    }
}

impl EmulatorConfig {
    /// Load a config from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EmulatorError::ConfigError(format!("reading {:?}: {e}", path.as_ref())))?;
        Self::from_toml_str(&text)
    }

    /// Parse a config from a TOML string. Missing keys fall back to
    /// [`EmulatorConfig::default`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EmulatorError::ConfigError(e.to_string()))
    }

    /// Load `.env` (if present) and apply any `PSRX_*` environment
    /// variables on top of the current values. Does not fail if `.env` is
    /// absent; a malformed `.env` file is logged and ignored, since this is
    /// a convenience layer, not the primary config source.
    pub fn apply_env(mut self) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                log::warn!("failed to load .env: {e}");
            }
        }

        if let Ok(v) = std::env::var("PSRX_BIOS_PATH") {
            self.bios_path = v;
        }
        if let Ok(v) = std::env::var("PSRX_DISC_PATH") {
            self.disc_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("PSRX_CYCLE_MULTIPLIER") {
            if let Ok(n) = v.parse() {
                self.cycle_multiplier = n;
            }
        }
        if let Ok(v) = std::env::var("PSRX_BUS_TICK_BATCH") {
            if let Ok(n) = v.parse() {
                self.bus_tick_batch = n;
            }
        }
        if let Ok(v) = std::env::var("PSRX_TRACE_IO") {
            self.trace_io = parse_bool_env(&v, self.trace_io);
        }
        if let Ok(v) = std::env::var("PSRX_PRETTY_TRACE") {
            self.pretty_trace = parse_bool_env(&v, self.pretty_trace);
        }
        if let Ok(v) = std::env::var("PSRX_HLE_VECTORS") {
            self.hle_vectors = parse_bool_env(&v, self.hle_vectors);
        }
        if let Ok(v) = std::env::var("PSRX_FAST_BOOT") {
            self.fast_boot = parse_bool_env(&v, self.fast_boot);
        }

        self
    }
}

fn parse_bool_env(v: &str, fallback: bool) -> bool {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fast_boot_with_hle() {
        let cfg = EmulatorConfig::default();
        assert!(cfg.fast_boot);
        assert!(cfg.hle_vectors);
        assert_eq!(cfg.cycle_multiplier, 1);
        assert_eq!(cfg.bus_tick_batch, 32);
    }

    #[test]
    fn toml_overrides_only_named_fields() {
        let text = r#"
            bios_path = "bios/SCPH1001.BIN"
            disc_path = "games/foo.cue"
            fast_boot = false
        "#;
        let cfg = EmulatorConfig::from_toml_str(text).unwrap();
        assert_eq!(cfg.bios_path, "bios/SCPH1001.BIN");
        assert_eq!(cfg.disc_path, Some(PathBuf::from("games/foo.cue")));
        assert!(!cfg.fast_boot);
        // Untouched fields keep their defaults.
        assert!(cfg.hle_vectors);
        assert_eq!(cfg.cycle_multiplier, 1);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = EmulatorConfig::from_toml_str("bios_path = [").unwrap_err();
        assert!(matches!(err, EmulatorError::ConfigError(_)));
    }
}
