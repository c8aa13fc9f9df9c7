// BgpSim: BGP Network Simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Request-scoped generation knobs that are not part of the submitted
//! topology document itself (§5: the core is a pure function of its
//! inputs, so these are passed in explicitly rather than read from the
//! environment).

/// Parameters of one generation request that live outside the topology
/// payload's own fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Scale factor applied by the Coordinate Remapper (§4.7), default 1.0.
    pub coordinate_scale: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { coordinate_scale: 1.0 }
    }
}
