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

//! VLAN ownership (§3 invariants, §9 open question): shared between the
//! routing solver and the device configurators so both agree on which L3
//! device is the gateway for a VLAN.
//!
//! An L3 device (router or switch_core) owns a VLAN if it is directly
//! attached to an endpoint that carries it: its own `computers[]` (switch_core
//! only — routers never carry computers directly), a directly-adjacent plain
//! switch's `computers[]`, or a directly-adjacent host's vlan reference.
//! A router attached to a switch_core does not inherit the core's VLANs —
//! ownership never crosses an L3 hop.

use crate::topology::Topology;
use crate::types::{Device, DeviceId, DeviceKind, VlanName};

/// VLANs owned by `device`, in a stable, first-seen order: the device's own
/// computers first, then each incident link in submission order.
pub fn owned_vlans(topology: &Topology, device: &DeviceId) -> Vec<VlanName> {
    let mut seen = std::collections::HashSet::new();
    let mut owned = Vec::new();

    if let Some(d) = topology.device(device) {
        for computer in d.computers() {
            if seen.insert(computer.vlan.clone()) {
                owned.push(computer.vlan.clone());
            }
        }
    }

    for link_id in topology.incident(device) {
        let link = topology.link(link_id).expect("incident link always resolves");
        let neighbor_id = topology.other_end(link, device);
        let Some(neighbor) = topology.device(&neighbor_id) else { continue };
        match neighbor {
            Device::Switch { computers, .. } => {
                for computer in computers {
                    if seen.insert(computer.vlan.clone()) {
                        owned.push(computer.vlan.clone());
                    }
                }
            }
            Device::Host { vlan: Some(v), .. } => {
                if seen.insert(v.clone()) {
                    owned.push(v.clone());
                }
            }
            _ => {}
        }
    }

    owned
}

/// The router's primary L2-facing physical interface: the first incident
/// link, in submission order, to a plain switch. All VLAN subinterfaces for
/// every directly-adjacent plain switch live on this single interface,
/// regardless of which link actually carried the VLAN.
pub fn primary_l2_interface(
    topology: &Topology,
    router: &DeviceId,
) -> Option<crate::types::InterfaceBinding> {
    for link_id in topology.incident(router) {
        let link = topology.link(link_id).expect("incident link always resolves");
        let neighbor_id = topology.other_end(link, router);
        let Some(neighbor) = topology.device(&neighbor_id) else { continue };
        if neighbor.kind() == DeviceKind::Switch {
            let binding = if link.from == *router { &link.from_interface } else { &link.to_interface };
            return Some(binding.clone());
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{
        ComputerInput, EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput, TopologyInput,
        VlanInput,
    };

    fn vlan(name: &str, id: u16) -> VlanInput {
        VlanInput { name: name.to_string(), id, prefix: 24, is_native: false }
    }

    #[test]
    fn router_owns_only_adjacent_plain_switch_vlans() {
        let input = TopologyInput {
            nodes: vec![
                NodeInput {
                    id: "r1".into(),
                    label: "R1".into(),
                    x: 0.0,
                    y: 0.0,
                    data: NodeData {
                        device_type: "router".into(),
                        name: "R1".into(),
                        model: None,
                        computers: vec![],
                        vlan: None,
                        management: None,
                    },
                },
                NodeInput {
                    id: "sw1".into(),
                    label: "SW1".into(),
                    x: 0.0,
                    y: 0.0,
                    data: NodeData {
                        device_type: "switch".into(),
                        name: "SW1".into(),
                        model: None,
                        computers: vec![ComputerInput {
                            name: "PC1".into(),
                            port_type: "FastEthernet".into(),
                            port_number: "0/5".into(),
                            vlan: "VLAN10".into(),
                        }],
                        vlan: None,
                        management: None,
                    },
                },
                NodeInput {
                    id: "swc1".into(),
                    label: "SWC1".into(),
                    x: 0.0,
                    y: 0.0,
                    data: NodeData {
                        device_type: "switch_core".into(),
                        name: "SWC1".into(),
                        model: None,
                        computers: vec![ComputerInput {
                            name: "PC2".into(),
                            port_type: "FastEthernet".into(),
                            port_number: "0/6".into(),
                            vlan: "VLAN30".into(),
                        }],
                        vlan: None,
                        management: None,
                    },
                },
            ],
            edges: vec![
                EdgeInput {
                    id: "e1".into(),
                    from: "r1".into(),
                    to: "sw1".into(),
                    data: EdgeData {
                        from_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                        to_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/1".into() },
                        routing_direction: "none".to_string(),
                        connection_type: "normal".to_string(),
                        ether_channel: None,
                    },
                },
                EdgeInput {
                    id: "e2".into(),
                    from: "r1".into(),
                    to: "swc1".into(),
                    data: EdgeData {
                        from_interface: IfaceInput { iface_type: "GigabitEthernet".into(), number: "0/0".into() },
                        to_interface: IfaceInput { iface_type: "GigabitEthernet".into(), number: "0/0".into() },
                        routing_direction: "bidirectional".to_string(),
                        connection_type: "normal".to_string(),
                        ether_channel: None,
                    },
                },
            ],
            vlans: vec![vlan("VLAN10", 10), vlan("VLAN30", 30)],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let r1 = DeviceId("r1".into());
        let owned = owned_vlans(&topo, &r1);
        assert_eq!(owned, vec![VlanName("VLAN10".into())]);

        let swc1 = DeviceId("swc1".into());
        let owned_core = owned_vlans(&topo, &swc1);
        assert_eq!(owned_core, vec![VlanName("VLAN30".into())]);
    }
}
