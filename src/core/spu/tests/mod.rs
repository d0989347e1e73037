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

//! SPU test modules
//!
//! - `basic`: voice/control register access, key on/off
//! - `adpcm`: ADPCM block decoding
//! - `adsr`: envelope generator stages
//! - `dma`: SPU DMA FIFO interaction
//! - `noise`: noise generator
//! - `reverb`: reverb register plumbing
//! - `voice`: per-voice volume/pitch/address registers

#[cfg(test)]
mod adpcm;


#[cfg(test)]
mod basic;

#[cfg(test)]
mod dma;


#[cfg(test)]
mod reverb;
