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

//! Timer test modules
//!
//! - `basic`: counting, overflow, clock source division
//! - `interrupts`: target/overflow IRQ generation, one-shot vs repeat
//! - `modes`: mode register read/write side effects

#[cfg(test)]
mod basic;

#[cfg(test)]
mod interrupts;

#[cfg(test)]
mod modes;
