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

//! Link Planner (§4.3): allocates a `/30` backbone network for every routed
//! link between two L3 devices, assigning the lower host address to the
//! higher-priority endpoint (router before switch_core).

use std::collections::HashMap;

use ipnet::Ipv4Net;
use log::debug;

use crate::allocator::AddressAllocator;
use crate::error::PlanResult;
use crate::types::{DeviceId, LinkId, RoutingDirection};

/// One endpoint's address on a routed backbone link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEndpoint {
    /// Device at this end.
    pub device: DeviceId,
    /// Host address assigned to this end.
    pub address: std::net::Ipv4Addr,
}

/// A `/30` backbone network between two L3 devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackboneLink {
    /// The originating link id this backbone was allocated for.
    pub link: LinkId,
    /// The `/30` network.
    pub network: Ipv4Net,
    /// Lower-priority-number endpoint (gets the first usable host address).
    pub primary: LinkEndpoint,
    /// Other endpoint (gets the second usable host address).
    pub secondary: LinkEndpoint,
}

impl BackboneLink {
    /// The address assigned to `device` on this backbone, if it is an endpoint.
    pub fn address_for(&self, device: &DeviceId) -> Option<std::net::Ipv4Addr> {
        if self.primary.device == *device {
            Some(self.primary.address)
        } else if self.secondary.device == *device {
            Some(self.secondary.address)
        } else {
            None
        }
    }

    /// The other endpoint's device and address, given one known endpoint.
    pub fn other(&self, device: &DeviceId) -> Option<&LinkEndpoint> {
        if self.primary.device == *device {
            Some(&self.secondary)
        } else if self.secondary.device == *device {
            Some(&self.primary)
        } else {
            None
        }
    }
}

/// Every backbone network allocated for the topology, keyed by link id.
#[derive(Debug, Clone, Default)]
pub struct LinkPlan {
    backbones: HashMap<LinkId, BackboneLink>,
}

impl LinkPlan {
    /// Walk every link between two L3 devices whose `routingDirection` is
    /// not `none` (a direction of `none` marks a physical-only trunk
    /// extension between L3 devices, carrying no route and no backbone) and
    /// allocate a backbone network for each, in submission order.
    pub fn build(topology: &crate::topology::Topology, allocator: &mut AddressAllocator) -> PlanResult<Self> {
        let mut backbones = HashMap::new();
        for link in topology.links() {
            let from_device = topology.device(&link.from).expect("validated by Topology::build");
            let to_device = topology.device(&link.to).expect("validated by Topology::build");
            if !from_device.kind().is_l3() || !to_device.kind().is_l3() {
                continue;
            }
            if link.routing_direction == RoutingDirection::None {
                continue;
            }

            let net = allocator.allocate(30)?;
            let mut hosts = net.hosts();
            let first = hosts.next().expect("/30 always has two usable hosts");
            let second = hosts.next().expect("/30 always has two usable hosts");

            let from_key = (from_device.kind().address_priority(), from_device.name());
            let to_key = (to_device.kind().address_priority(), to_device.name());
            let (primary_device, primary_addr, secondary_device, secondary_addr) = if from_key <= to_key {
                (link.from.clone(), first, link.to.clone(), second)
            } else {
                (link.to.clone(), first, link.from.clone(), second)
            };

            debug!(
                "backbone {} allocated for link {}: {} <-> {}",
                net, link.id, primary_device, secondary_device
            );

            backbones.insert(
                link.id.clone(),
                BackboneLink {
                    link: link.id.clone(),
                    network: net,
                    primary: LinkEndpoint { device: primary_device, address: primary_addr },
                    secondary: LinkEndpoint { device: secondary_device, address: secondary_addr },
                },
            );
        }
        Ok(Self { backbones })
    }

    /// Look up the backbone allocated for a link, if any.
    pub fn get(&self, link: &LinkId) -> Option<&BackboneLink> {
        self.backbones.get(link)
    }

    /// Every backbone link, unordered.
    pub fn all(&self) -> impl Iterator<Item = &BackboneLink> {
        self.backbones.values()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput, TopologyInput};
    use crate::topology::Topology;

    fn node(id: &str, name: &str, kind: &str) -> NodeInput {
        NodeInput {
            id: id.to_string(),
            label: name.to_string(),
            x: 0.0,
            y: 0.0,
            data: NodeData {
                device_type: kind.to_string(),
                name: name.to_string(),
                model: None,
                computers: vec![],
                vlan: None,
                management: None,
            },
        }
    }

    fn edge(id: &str, from: &str, to: &str) -> EdgeInput {
        EdgeInput {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            data: EdgeData {
                from_interface: IfaceInput { iface_type: "GigabitEthernet".into(), number: "0/0".into() },
                to_interface: IfaceInput { iface_type: "GigabitEthernet".into(), number: "0/0".into() },
                routing_direction: "bidirectional".to_string(),
                connection_type: "normal".to_string(),
                ether_channel: None,
            },
        }
    }

    #[test]
    fn router_gets_lower_address_than_switch_core() {
        let input = TopologyInput {
            nodes: vec![node("n1", "R1", "router"), node("n2", "SC1", "switch_core")],
            edges: vec![edge("e1", "n2", "n1")],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let plan = LinkPlan::build(&topo, &mut alloc).unwrap();
        let link_id = LinkId("e1".into());
        let backbone = plan.get(&link_id).unwrap();
        assert_eq!(backbone.primary.device, DeviceId("n1".into()));
        assert_eq!(backbone.network, "19.0.0.0/30".parse().unwrap());
    }

    #[test]
    fn skips_links_not_between_two_l3_devices() {
        let input = TopologyInput {
            nodes: vec![node("n1", "R1", "router"), node("n2", "SW1", "switch")],
            edges: vec![edge("e1", "n1", "n2")],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let plan = LinkPlan::build(&topo, &mut alloc).unwrap();
        assert!(plan.get(&LinkId("e1".into())).is_none());
    }
}
