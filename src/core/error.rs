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

//! Emulator error types.

use thiserror::Error;

/// Result type for emulator operations.
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Top-level error type for every fallible host-facing operation.
///
/// Hardware-level anomalies (unaligned access, unmapped reads, CD-ROM
/// protocol violations) never surface here: the core recovers from those
/// internally and logs a warning. Only setup/IO failures reach the host.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("unaligned {}-bit access at address 0x{address:08X}", size * 8)]
    UnalignedAccess { address: u32, size: u32 },

    #[error("invalid memory access at address 0x{address:08X}")]
    InvalidAddress { address: u32 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("BIOS error: {0}")]
    BiosError(String),

    #[error("BIOS not found: {0}")]
    BiosNotFound(String),

    #[error("invalid BIOS size: expected {expected} bytes, got {got} bytes")]
    InvalidBiosSize { expected: usize, got: usize },

    #[error("loader error: {0}")]
    LoaderError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    CdRom(#[from] CdRomError),

    #[error(transparent)]
    Disc(#[from] DiscError),
}

/// CD-ROM controller protocol / setup failures that must propagate to the
/// host rather than simply producing an INT5 response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CdRomError {
    #[error("no disc loaded")]
    NoDisc,

    #[error("file not found on disc: {0}")]
    FileNotFound(String),

    #[error("not an ISO-9660 disc (bad PVD at sector 16)")]
    NotIso9660,
}

/// Disc image loading failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscError {
    #[error("I/O error reading disc image: {0}")]
    Io(String),

    #[error("malformed CUE sheet: {0}")]
    BadCue(String),

    #[error("sector {lba} out of range (disc has {len} sectors)")]
    OutOfRange { lba: i32, len: usize },

    #[error("unsupported disc image format: {0}")]
    UnsupportedFormat(String),
}

impl From<std::io::Error> for DiscError {
    fn from(err: std::io::Error) -> Self {
        DiscError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        let e = EmulatorError::UnalignedAccess {
            address: 0x1000_0001,
            size: 4,
        };
        assert_eq!(
            e.to_string(),
            "unaligned 32-bit access at address 0x10000001"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        let e: EmulatorError = io.into();
        assert!(matches!(e, EmulatorError::IoError(_)));
    }

    #[test]
    fn cdrom_error_wraps_through() {
        let e: EmulatorError = CdRomError::NoDisc.into();
        assert!(matches!(e, EmulatorError::CdRom(CdRomError::NoDisc)));
    }
}
