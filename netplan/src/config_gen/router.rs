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

//! Router configurator (§4.6a): backbone interfaces, a single VLAN
//! subinterface trunk toward the first directly-adjacent plain switch, and
//! the terminal static-route block.

use crate::config_gen::command::{format_stream, Block, Submode};
use crate::config_gen::{DeviceConfig, DEFAULT_ENABLE_SECRET};
use crate::error::{PlanError, PlanResult};
use crate::link_plan::LinkPlan;
use crate::ownership::{owned_vlans, primary_l2_interface};
use crate::routing::StaticRoute;
use crate::topology::Topology;
use crate::types::Device;
use crate::vlan_plan::VlanPlan;

/// Build the command stream for a router.
pub fn build(
    topology: &Topology,
    link_plan: &LinkPlan,
    vlan_plan: &VlanPlan,
    routes: &[StaticRoute],
    device: &Device,
) -> PlanResult<DeviceConfig> {
    let Device::Router { common } = device else {
        return Err(PlanError::ConfigBuildFailure {
            device: device.name().to_string(),
            reason: "router configurator invoked on a non-router device".to_string(),
        });
    };

    let mut blocks = Vec::new();

    blocks.push(Block::global(vec![
        format!("hostname {}", common.name),
        format!("enable secret {DEFAULT_ENABLE_SECRET}"),
    ]));

    let primary_iface = primary_l2_interface(topology, &common.id);

    for link_id in topology.incident(&common.id) {
        let link = topology.link(link_id).expect("incident link always resolves");
        let own_iface = if link.from == common.id { &link.from_interface } else { &link.to_interface };
        let neighbor_id = topology.other_end(link, &common.id);
        let neighbor = topology.device(&neighbor_id).expect("validated by Topology::build");

        let mut lines = vec![format!("interface {own_iface}")];
        if neighbor.kind().is_l3() {
            if let Some(backbone) = link_plan.get(link_id) {
                if let Some(addr) = backbone.address_for(&common.id) {
                    lines.push(format!("ip address {} {}", addr, crate::config_gen::netmask(&backbone.network)));
                }
            }
        }
        lines.push("no shutdown".to_string());
        blocks.push(Block::submode(Submode::Interface, lines));
    }

    let owned = owned_vlans(topology, &common.id);

    if let Some(iface) = &primary_iface {
        for vlan_name in &owned {
            let vlan = topology.vlan(vlan_name).expect("owned vlan is always declared");
            let alloc = vlan_plan.get(vlan_name).expect("every declared vlan is allocated");
            blocks.push(Block::submode(
                Submode::Interface,
                vec![
                    format!("interface {iface}.{}", vlan.id),
                    format!("encapsulation dot1Q {}", vlan.id),
                    format!("ip address {} {}", alloc.gateway, crate::config_gen::netmask(&alloc.network)),
                    "no shutdown".to_string(),
                ],
            ));
        }

        for vlan_name in &owned {
            let vlan = topology.vlan(vlan_name).expect("owned vlan is always declared");
            let alloc = vlan_plan.get(vlan_name).expect("every declared vlan is allocated");
            blocks.push(Block::global(vec![format!(
                "ip dhcp excluded-address {} {}",
                alloc.dhcp_excluded_start, alloc.dhcp_excluded_end
            )]));
            blocks.push(Block::submode(
                Submode::DhcpPool,
                vec![
                    format!("ip dhcp pool vlan{}", vlan.id),
                    format!("network {} {}", alloc.network.network(), crate::config_gen::netmask(&alloc.network)),
                    format!("default-router {}", alloc.gateway),
                ],
            ));
        }
    }

    let route_lines = routes
        .iter()
        .map(|r| {
            format!(
                "ip route {} {} {}",
                r.destination.network(),
                r.destination.netmask(),
                r.next_hop
            )
        })
        .collect();
    blocks.push(Block::routes(route_lines));

    Ok(DeviceConfig {
        device: common.id.clone(),
        hostname: common.name.clone(),
        lines: format_stream(&common.name, &blocks),
    })
}
