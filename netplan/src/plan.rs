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

//! The generation orchestrator: runs every pipeline stage in the fixed order
//! from §2 and assembles the resulting [`Plan`], the aggregate every emitter
//! consumes.

use std::collections::HashMap;

use ipnet::Ipv4Net;

use crate::allocator::AddressAllocator;
use crate::config::GenerationConfig;
use crate::config_gen::{router, switch, switch_core, DeviceConfig};
use crate::error::{PlanError, PlanResult};
use crate::input::TopologyInput;
use crate::link_plan::LinkPlan;
use crate::physical_models;
use crate::routing;
use crate::topology::Topology;
use crate::types::{Device, DeviceId, DeviceKind, Mode};
use crate::vlan_plan::VlanPlan;

/// Everything a generation request produced: the normalized topology, the
/// address plans, every device's command stream, and remapped positions.
/// Constructed once per request; immutable afterwards.
#[derive(Debug)]
pub struct Plan {
    /// Normalized topology.
    pub topology: Topology,
    /// Backbone allocations.
    pub link_plan: LinkPlan,
    /// VLAN allocations.
    pub vlan_plan: VlanPlan,
    /// Command streams, in submission order.
    pub configs: Vec<DeviceConfig>,
    /// Simulator-space positions, keyed by device id.
    pub positions: HashMap<DeviceId, (f64, f64)>,
    /// Generation mode this plan was built under.
    pub mode: Mode,
}

fn parse_mode(s: &str) -> PlanResult<Mode> {
    match s {
        "digital" => Ok(Mode::Digital),
        "physical" => Ok(Mode::Physical),
        other => Err(PlanError::InvalidTopology(format!("invalid mode: {other}"))),
    }
}

/// Run the full pipeline: validate and normalize the topology, allocate
/// backbones and VLAN subnets, solve routes, build every device's command
/// stream, and remap coordinates. Fails fast with the first error
/// encountered; no partial plan is ever returned.
pub fn generate(input: &TopologyInput, config: &GenerationConfig) -> PlanResult<Plan> {
    let mode = parse_mode(&input.mode)?;
    let topology = Topology::build(input)?;

    if mode == Mode::Physical {
        for device in topology.devices() {
            if !device.kind().is_l3() {
                continue;
            }
            let Some(model) = device.common().model.as_deref() else {
                return Err(PlanError::PhysicalModelMissing { device: device.name().to_string() });
            };
            if let Some(inventory) = physical_models::lookup(model) {
                for iface_type in [crate::types::InterfaceType::FastEthernet, crate::types::InterfaceType::GigabitEthernet] {
                    let Some(capacity) = inventory.capacity(&iface_type) else { continue };
                    let used = topology.interface_count(device.id(), &iface_type) as u32;
                    if used > capacity {
                        return Err(PlanError::InterfaceConflict {
                            device: device.name().to_string(),
                            reason: format!(
                                "model {model} has {capacity} {iface_type} port(s), but {used} are assigned"
                            ),
                        });
                    }
                }
            }
        }
    }

    let base: Ipv4Net = format!("{}.0.0.0/8", input.base_network_octet)
        .parse()
        .map_err(|_| PlanError::InvalidTopology(format!("invalid base octet: {}", input.base_network_octet)))?;
    let mut allocator = AddressAllocator::new(base);

    let link_plan = LinkPlan::build(&topology, &mut allocator)?;
    let vlan_plan = VlanPlan::build(&topology, &mut allocator)?;

    let mut configs = Vec::new();
    for device in topology.devices() {
        let config = match device {
            Device::Router { .. } => {
                let routes = routing::solve(&topology, &link_plan, &vlan_plan, device.id());
                router::build(&topology, &link_plan, &vlan_plan, &routes, device)?
            }
            Device::SwitchCore { .. } => {
                let routes = routing::solve(&topology, &link_plan, &vlan_plan, device.id());
                switch_core::build(&topology, &link_plan, &vlan_plan, &routes, device)?
            }
            Device::Switch { .. } => switch::build(&topology, device)?,
            Device::Host { .. } => continue,
        };
        configs.push(config);
    }

    let device_order: Vec<&DeviceId> = topology.devices().map(|d| d.id()).collect();
    let raw_points: Vec<(f64, f64)> =
        topology.devices().map(|d| (d.common().x, d.common().y)).collect();
    let mapped = crate::coords::remap(&raw_points, config.coordinate_scale);
    let positions: HashMap<DeviceId, (f64, f64)> =
        device_order.into_iter().cloned().zip(mapped).collect();

    Ok(Plan { topology, link_plan, vlan_plan, configs, positions, mode })
}

/// Default physical-model tag by device kind, used by the simulator driver
/// emitter when `mode` is `digital` or a device carries no explicit tag.
pub fn default_model_tag(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::Router => "2811",
        DeviceKind::Switch => "2960-24TT",
        DeviceKind::SwitchCore => "3560-24PS",
        DeviceKind::Host => "PC-PT",
    }
}
