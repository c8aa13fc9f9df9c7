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

//! L2 switch configurator (§4.6c): VLAN database, access ports, uplink
//! trunks, and an optional SSHv2 management block. No routing, no gateways.

use std::collections::HashSet;

use crate::config_gen::command::{format_stream, Block, Submode};
use crate::config_gen::etherchannel;
use crate::config_gen::{DeviceConfig, DEFAULT_ENABLE_SECRET};
use crate::error::{PlanError, PlanResult};
use crate::topology::Topology;
use crate::types::{Device, DeviceKind, VlanName};

/// Build the command stream for a plain L2 switch.
pub fn build(topology: &Topology, device: &Device) -> PlanResult<DeviceConfig> {
    let Device::Switch { common, computers, management } = device else {
        return Err(PlanError::ConfigBuildFailure {
            device: device.name().to_string(),
            reason: "switch configurator invoked on a non-switch device".to_string(),
        });
    };

    let mut blocks = Vec::new();

    blocks.push(Block::global(vec![
        format!("hostname {}", common.name),
        format!("enable secret {DEFAULT_ENABLE_SECRET}"),
    ]));

    let mut local_vlans: Vec<VlanName> = Vec::new();
    let mut seen: HashSet<VlanName> = HashSet::new();
    for computer in computers {
        if seen.insert(computer.vlan.clone()) {
            local_vlans.push(computer.vlan.clone());
        }
    }
    for vlan_name in &local_vlans {
        let vlan = topology.vlan(vlan_name).expect("validated by Topology::build");
        blocks.push(Block::submode(
            Submode::Vlan,
            vec![format!("vlan {}", vlan.id), format!("name {}", vlan.name)],
        ));
    }

    for computer in computers {
        let vlan = topology.vlan(&computer.vlan).expect("validated by Topology::build");
        blocks.push(Block::submode(
            Submode::Interface,
            vec![
                format!("interface {}{}", computer.port_type, computer.port_number),
                format!("switchport access vlan {}", vlan.id),
                "no shutdown".to_string(),
            ],
        ));
    }

    for link_id in topology.incident(&common.id) {
        let link = topology.link(link_id).expect("incident link always resolves");
        if link.is_etherchannel() {
            blocks.extend(etherchannel::device_blocks(link, &common.id)?);
            continue;
        }
        let own_iface = if link.from == common.id { &link.from_interface } else { &link.to_interface };
        let neighbor_id = topology.other_end(link, &common.id);
        let neighbor = topology.device(&neighbor_id).expect("validated by Topology::build");
        if neighbor.kind() == DeviceKind::Host {
            continue;
        }
        blocks.push(Block::submode(
            Submode::Interface,
            vec![
                format!("interface {own_iface}"),
                "switchport trunk encapsulation dot1q".to_string(),
                "switchport mode trunk".to_string(),
                "no shutdown".to_string(),
            ],
        ));
    }

    if let Some(mgmt) = management {
        blocks.push(Block::global(vec![
            format!("ip domain-name {}", mgmt.domain_name),
            "crypto key generate rsa modulus 1024".to_string(),
            "ip ssh version 2".to_string(),
            format!("username {} secret {}", mgmt.username, mgmt.secret),
        ]));
        blocks.push(Block::submode(
            Submode::Line,
            vec!["line vty 0 4".to_string(), "login local".to_string(), "transport input ssh".to_string()],
        ));
    }

    Ok(DeviceConfig {
        device: common.id.clone(),
        hostname: common.name.clone(),
        lines: format_stream(&common.name, &blocks),
    })
}
