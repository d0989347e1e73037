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

//! Disc image loading and management
//!
//! Supports both multi-file CUE+BIN images (raw 2352-byte sectors) and
//! single-file `.iso` images (2048-byte Mode 1 data sectors). Both are
//! unified behind [`DiscImage::read_sector_raw`], which returns the bytes
//! actually backing a given LBA plus their sector size, so callers (CD-ROM
//! command/DMA logic) never need to know which format is loaded.

use super::CDPosition;
use crate::core::error::DiscError;

/// Disc image loaded from a `.cue`/`.bin` pair or a single `.iso` file.
#[derive(Debug)]
pub struct DiscImage {
    tracks: Vec<Track>,
    data: Vec<u8>,
    /// Raw sector stride in bytes: 2352 for CUE+BIN, 2048 for a bare ISO.
    sector_size: usize,
}

/// CD-ROM track information.
#[derive(Debug, Clone)]
pub struct Track {
    pub number: u8,
    pub track_type: TrackType,
    pub start_position: CDPosition,
    pub length_sectors: u32,
    pub file_offset: u64,
}

/// CD-ROM track type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Mode1_2352,
    Mode2_2352,
    Audio,
}

impl DiscImage {
    /// Load a disc image. `.cue` paths are parsed as CUE+BIN; any other
    /// extension is treated as a raw single-track `.iso` (2048-byte sectors).
    pub fn load(path: &str) -> Result<Self, DiscError> {
        if path.to_ascii_lowercase().ends_with(".cue") {
            Self::load_cue(path)
        } else {
            Self::load_iso(path)
        }
    }

    fn load_iso(path: &str) -> Result<Self, DiscError> {
        let data = std::fs::read(path)?;
        let length_sectors = (data.len() / 2048) as u32;

        let tracks = vec![Track {
            number: 1,
            track_type: TrackType::Mode1_2352,
            start_position: CDPosition::new(0, 2, 0),
            length_sectors,
            file_offset: 0,
        }];

        log::info!(
            "Loaded ISO image: {} sectors, {} MB",
            length_sectors,
            data.len() / 1024 / 1024
        );

        Ok(Self {
            tracks,
            data,
            sector_size: 2048,
        })
    }

    fn load_cue(cue_path: &str) -> Result<Self, DiscError> {
        let cue_data = std::fs::read_to_string(cue_path)?;
        let bin_path = Self::get_bin_path_from_cue(cue_path, &cue_data)?;

        let mut tracks = Self::parse_cue(&cue_data)?;
        let data = std::fs::read(&bin_path)?;

        Self::calculate_track_lengths(&mut tracks, data.len());

        log::info!(
            "Loaded disc image: {} tracks, {} MB",
            tracks.len(),
            data.len() / 1024 / 1024
        );

        Ok(Self {
            tracks,
            data,
            sector_size: 2352,
        })
    }

    fn get_bin_path_from_cue(cue_path: &str, cue_data: &str) -> Result<String, DiscError> {
        for line in cue_data.lines() {
            let line = line.trim();
            if line.starts_with("FILE") {
                if let Some(start) = line.find('"') {
                    if let Some(end) = line[start + 1..].find('"') {
                        let bin_filename = &line[start + 1..start + 1 + end];
                        let cue_path_obj = std::path::Path::new(cue_path);
                        let bin_path = if let Some(parent) = cue_path_obj.parent() {
                            parent.join(bin_filename)
                        } else {
                            std::path::PathBuf::from(bin_filename)
                        };
                        return Ok(bin_path.to_string_lossy().to_string());
                    }
                }
            }
        }

        Err(DiscError::BadCue(
            "no FILE directive found in .cue file".to_string(),
        ))
    }

    pub(super) fn parse_cue(cue_data: &str) -> Result<Vec<Track>, DiscError> {
        let mut tracks = Vec::new();
        let mut current_track: Option<Track> = None;

        for line in cue_data.lines() {
            let line = line.trim();

            if line.starts_with("TRACK") {
                if let Some(track) = current_track.take() {
                    tracks.push(track);
                }

                let parts: Vec<&str> = line.split_whitespace().collect();
                let track_num = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                let track_type_str = parts.get(2).unwrap_or(&"MODE2/2352");

                current_track = Some(Track {
                    number: track_num,
                    track_type: Self::parse_track_type(track_type_str),
                    start_position: CDPosition::new(0, 0, 0),
                    length_sectors: 0,
                    file_offset: 0,
                });
            } else if line.starts_with("INDEX 01") {
                if let Some(ref mut track) = current_track {
                    let parts: Vec<&str> = line.split_whitespace().collect();
                    if let Some(time_str) = parts.get(2) {
                        track.start_position = Self::parse_msf(time_str)?;
                        track.file_offset =
                            Self::msf_to_sector(&track.start_position) as u64 * 2352;
                    }
                }
            }
        }

        if let Some(track) = current_track {
            tracks.push(track);
        }

        Ok(tracks)
    }

    pub(super) fn parse_msf(msf: &str) -> Result<CDPosition, DiscError> {
        let parts: Vec<&str> = msf.split(':').collect();
        if parts.len() != 3 {
            return Err(DiscError::BadCue(format!("invalid MSF format: '{}'", msf)));
        }

        let minute = parts[0]
            .parse()
            .map_err(|_| DiscError::BadCue(format!("invalid minute in MSF: '{}'", msf)))?;
        let second = parts[1]
            .parse()
            .map_err(|_| DiscError::BadCue(format!("invalid second in MSF: '{}'", msf)))?;
        let sector = parts[2]
            .parse()
            .map_err(|_| DiscError::BadCue(format!("invalid sector in MSF: '{}'", msf)))?;

        Ok(CDPosition {
            minute,
            second,
            sector,
        })
    }

    pub(super) fn parse_track_type(s: &str) -> TrackType {
        match s {
            "MODE1/2352" => TrackType::Mode1_2352,
            "MODE2/2352" => TrackType::Mode2_2352,
            "AUDIO" => TrackType::Audio,
            _ => TrackType::Mode2_2352,
        }
    }

    pub(super) fn calculate_track_lengths(tracks: &mut [Track], file_size: usize) {
        for i in 0..tracks.len() {
            if i + 1 < tracks.len() {
                let next_offset = tracks[i + 1].file_offset;
                let this_offset = tracks[i].file_offset;
                tracks[i].length_sectors = ((next_offset - this_offset) / 2352) as u32;
            } else {
                let this_offset = tracks[i].file_offset;
                tracks[i].length_sectors = ((file_size as u64 - this_offset) / 2352) as u32;
            }
        }
    }

    /// Read a sector given its LBA, returning the raw bytes backing it (as
    /// stored in the image: 2352 bytes for CUE+BIN, 2048 for ISO) and the
    /// sector size used. Returns `Err(OutOfRange)` if the LBA is beyond the
    /// image.
    pub fn read_sector_raw(&self, lba: i32) -> Result<(&[u8], usize), DiscError> {
        if lba < 0 {
            return Err(DiscError::OutOfRange {
                lba,
                len: self.data.len() / self.sector_size.max(1),
            });
        }
        let offset = lba as usize * self.sector_size;
        if offset + self.sector_size > self.data.len() {
            return Err(DiscError::OutOfRange {
                lba,
                len: self.data.len() / self.sector_size.max(1),
            });
        }
        Ok((&self.data[offset..offset + self.sector_size], self.sector_size))
    }

    /// Read a sector at an MSF position, normalized to a 2048-byte data
    /// payload regardless of the backing image's raw sector size (CUE+BIN
    /// 2352-byte sectors have their 12-byte sync + 4-byte header stripped
    /// for Mode 1 sectors; ISO sectors are returned as-is).
    pub fn read_sector(&self, position: &CDPosition) -> Option<&[u8]> {
        let lba = Self::msf_to_sector(position) as i32;
        let (raw, size) = self.read_sector_raw(lba).ok()?;
        if size == 2352 {
            Some(&raw[16..16 + 2048.min(size - 16)])
        } else {
            Some(raw)
        }
    }

    pub(super) fn msf_to_sector(pos: &CDPosition) -> usize {
        let total = (pos.minute as u32 * 60 * 75) + (pos.second as u32 * 75) + pos.sector as u32;
        total.saturating_sub(150) as usize
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn get_track(&self, track_num: u8) -> Option<&Track> {
        self.tracks.iter().find(|t| t.number == track_num)
    }

    pub fn sector_size(&self) -> usize {
        self.sector_size
    }

    pub fn total_sectors(&self) -> usize {
        self.data.len() / self.sector_size.max(1)
    }
}
