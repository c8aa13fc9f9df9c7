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

//! # netplan
//!
//! Deterministic generation of Cisco IOS-style configuration from a
//! user-designed network topology: routers, layer-3 core switches, layer-2
//! switches, endpoint hosts, links, and VLAN definitions go in; per-device
//! command streams, an IP allocation report, and a simulator-placement
//! driver script come out.
//!
//! ## Pipeline
//!
//! [`generate`] runs the stages in a fixed order:
//!
//! 1. [`topology::Topology::build`] normalizes and validates the submitted
//!    nodes/edges/VLANs.
//! 2. [`link_plan::LinkPlan::build`] allocates `/30` backbones between L3
//!    devices via the [`allocator::AddressAllocator`].
//! 3. [`vlan_plan::VlanPlan::build`] allocates one subnet per VLAN.
//! 4. [`routing::solve`] runs direction-respecting BFS per router to
//!    synthesize static routes.
//! 5. [`config_gen`] assembles each device's ordered IOS command stream.
//! 6. [`coords::remap`] translates canvas coordinates into simulator space.
//! 7. [`emit`] renders the three output artifacts from the resulting
//!    [`plan::Plan`].
//!
//! The whole pipeline is a pure, single-threaded computation per request: a
//! fresh [`allocator::AddressAllocator`] and [`topology::Topology`] are
//! built for every call to [`generate`], and nothing is shared across
//! calls.

pub mod allocator;
pub mod config;
pub mod config_gen;
pub mod coords;
pub mod emit;
pub mod error;
pub mod input;
pub mod link_plan;
pub mod ownership;
pub mod physical_models;
pub mod plan;
pub mod routing;
pub mod topology;
pub mod types;
pub mod vlan_plan;

pub use config::GenerationConfig;
pub use emit::Artifacts;
pub use error::{PlanError, PlanResult};
pub use input::TopologyInput;
pub use plan::Plan;

/// Run the full configuration-generation pipeline and render every output
/// artifact for `input`. This is the crate's single entry point: it
/// validates and normalizes the topology, allocates address space, solves
/// routes, builds every device's command stream, remaps coordinates, and
/// emits the three artifacts from §4.8, in that order. Fails fast with the
/// first encountered [`PlanError`]; no partial output is ever returned.
pub fn generate(input: &TopologyInput, config: &GenerationConfig) -> PlanResult<(Plan, Artifacts)> {
    let plan = plan::generate(input, config)?;
    let artifacts = emit::build(&plan);
    Ok((plan, artifacts))
}
