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

//! Routing Solver (§4.5): direction-respecting BFS from each router over the
//! routed-link adjacency, producing static-route records whose next-hop is
//! always a directly connected neighbor.

use std::collections::{HashSet, VecDeque};
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use log::debug;

use crate::link_plan::LinkPlan;
use crate::ownership::owned_vlans;
use crate::topology::Topology;
use crate::types::DeviceId;
use crate::vlan_plan::VlanPlan;

/// One synthesized static route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    /// Destination network.
    pub destination: Ipv4Net,
    /// Next-hop IP: always a directly connected neighbor of the owning router.
    pub next_hop: Ipv4Addr,
}

/// Compute every static route for `router`, in deterministic discovery order.
pub fn solve(
    topology: &Topology,
    link_plan: &LinkPlan,
    vlan_plan: &VlanPlan,
    router: &DeviceId,
) -> Vec<StaticRoute> {
    let mut visited: HashSet<DeviceId> = HashSet::new();
    visited.insert(router.clone());
    let mut first_hop: std::collections::HashMap<DeviceId, Ipv4Addr> = std::collections::HashMap::new();
    let mut visit_order: Vec<DeviceId> = vec![router.clone()];

    let mut queue = VecDeque::new();
    queue.push_back(router.clone());

    let mut directly_connected: HashSet<Ipv4Net> = HashSet::new();
    for link_id in topology.incident(router) {
        if let Some(backbone) = link_plan.get(link_id) {
            directly_connected.insert(backbone.network);
        }
    }
    for vlan in owned_vlans(topology, router) {
        if let Some(alloc) = vlan_plan.get(&vlan) {
            directly_connected.insert(alloc.network);
        }
    }

    while let Some(v) = queue.pop_front() {
        for edge in topology.out_neighbors(&v) {
            let Some(backbone) = link_plan.get(&edge.link) else { continue };
            let w = edge.neighbor.clone();
            if w == *router || visited.contains(&w) {
                continue;
            }
            let hop_ip = if v == *router {
                backbone.address_for(&w).expect("backbone link endpoint must resolve")
            } else {
                *first_hop.get(&v).expect("non-root visited node always has a recorded first hop")
            };
            visited.insert(w.clone());
            first_hop.insert(w.clone(), hop_ip);
            visit_order.push(w.clone());
            queue.push_back(w);
        }
    }

    let mut known: Vec<StaticRoute> = Vec::new();
    let mut known_set: HashSet<Ipv4Net> = HashSet::new();

    for node in &visit_order {
        if node == router {
            continue;
        }
        let next_hop = first_hop[node];

        for link_id in topology.incident(node) {
            let Some(backbone) = link_plan.get(link_id) else { continue };
            if directly_connected.contains(&backbone.network) || known_set.contains(&backbone.network) {
                continue;
            }
            known_set.insert(backbone.network);
            known.push(StaticRoute { destination: backbone.network, next_hop });
        }

        for vlan in owned_vlans(topology, node) {
            let Some(alloc) = vlan_plan.get(&vlan) else { continue };
            if directly_connected.contains(&alloc.network) || known_set.contains(&alloc.network) {
                continue;
            }
            known_set.insert(alloc.network);
            known.push(StaticRoute { destination: alloc.network, next_hop });
        }
    }

    debug!("router {} resolved {} static routes", router, known.len());
    known
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::allocator::AddressAllocator;
    use crate::input::{EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput, TopologyInput};

    fn router_node(id: &str, name: &str) -> NodeInput {
        NodeInput {
            id: id.to_string(),
            label: name.to_string(),
            x: 0.0,
            y: 0.0,
            data: NodeData {
                device_type: "router".to_string(),
                name: name.to_string(),
                model: None,
                computers: vec![],
                vlan: None,
                management: None,
            },
        }
    }

    fn directed_edge(id: &str, from: &str, to: &str) -> EdgeInput {
        EdgeInput {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            data: EdgeData {
                from_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                to_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/1".into() },
                routing_direction: "from-to".to_string(),
                connection_type: "normal".to_string(),
                ether_channel: None,
            },
        }
    }

    #[test]
    fn line_topology_respects_direction() {
        // R1 -> R2 -> R3, unidirectional.
        let input = TopologyInput {
            nodes: vec![router_node("r1", "R1"), router_node("r2", "R2"), router_node("r3", "R3")],
            edges: vec![directed_edge("e1", "r1", "r2"), directed_edge("e2", "r2", "r3")],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let link_plan = LinkPlan::build(&topo, &mut alloc).unwrap();
        let vlan_plan = VlanPlan::build(&topo, &mut alloc).unwrap();

        let r1 = DeviceId("r1".into());
        let r2 = DeviceId("r2".into());
        let r3 = DeviceId("r3".into());

        let routes_r1 = solve(&topo, &link_plan, &vlan_plan, &r1);
        assert_eq!(routes_r1.len(), 1);
        let bb2 = link_plan.get(&crate::types::LinkId("e2".into())).unwrap();
        assert_eq!(routes_r1[0].destination, bb2.network);

        let routes_r2 = solve(&topo, &link_plan, &vlan_plan, &r2);
        assert!(routes_r2.is_empty());

        let routes_r3 = solve(&topo, &link_plan, &vlan_plan, &r3);
        assert!(routes_r3.is_empty());
    }

    #[test]
    fn two_routers_no_self_route() {
        let input = TopologyInput {
            nodes: vec![router_node("r1", "R1"), router_node("r2", "R2")],
            edges: vec![{
                let mut e = directed_edge("e1", "r1", "r2");
                e.data.routing_direction = "bidirectional".to_string();
                e
            }],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let link_plan = LinkPlan::build(&topo, &mut alloc).unwrap();
        let vlan_plan = VlanPlan::build(&topo, &mut alloc).unwrap();
        let r1 = DeviceId("r1".into());
        assert!(solve(&topo, &link_plan, &vlan_plan, &r1).is_empty());
    }
}
