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

//! Emitters (§4.8): deterministic functions of the plan producing the three
//! output artifacts.

pub mod bundles;
pub mod driver;
pub mod report;

use crate::plan::Plan;

/// Every artifact a successful generation request produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Per-category device command bundles.
    pub bundles: bundles::Bundles,
    /// Human-readable allocation report.
    pub report: String,
    /// Simulator driver script.
    pub driver_script: String,
}

/// Run every emitter over `plan`.
pub fn build(plan: &Plan) -> Artifacts {
    Artifacts {
        bundles: bundles::build(plan),
        report: report::build(plan),
        driver_script: driver::build(plan),
    }
}
