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

//! Human-readable allocation report (§4.8): one four-line block per
//! backbone subnet and per VLAN subnet.

use crate::plan::Plan;

/// Render the allocation report for `plan`.
pub fn build(plan: &Plan) -> String {
    let mut out = String::new();

    out.push_str("Backbone Allocations\n");
    for link in plan.topology.links() {
        let Some(backbone) = plan.link_plan.get(&link.id) else { continue };
        out.push_str(&format!("{}\n", backbone.network));
        out.push_str(&format!("{}\n", backbone.primary.address));
        out.push('\n');
        out.push_str(&format!("{}\n", backbone.secondary.address));
    }

    out.push_str("VLAN Allocations\n");
    for vlan in plan.topology.vlans() {
        let Some(alloc) = plan.vlan_plan.get(&vlan.name) else { continue };
        out.push_str(&format!("{}\n", alloc.network));
        out.push_str(&format!("{}\n", alloc.gateway));
        out.push('\n');
        out.push_str(&format!("{}\n", alloc.network.broadcast()));
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::allocator::AddressAllocator;
    use crate::input::{EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput, TopologyInput, VlanInput};
    use crate::link_plan::LinkPlan;
    use crate::topology::Topology;
    use crate::vlan_plan::VlanPlan;
    use std::collections::HashMap;

    #[test]
    fn four_line_blocks_per_backbone_and_vlan() {
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
                    id: "r2".into(),
                    label: "R2".into(),
                    x: 0.0,
                    y: 0.0,
                    data: NodeData {
                        device_type: "router".into(),
                        name: "R2".into(),
                        model: None,
                        computers: vec![],
                        vlan: None,
                        management: None,
                    },
                },
            ],
            edges: vec![EdgeInput {
                id: "e1".into(),
                from: "r1".into(),
                to: "r2".into(),
                data: EdgeData {
                    from_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                    to_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                    routing_direction: "bidirectional".to_string(),
                    connection_type: "normal".to_string(),
                    ether_channel: None,
                },
            }],
            vlans: vec![VlanInput { name: "VLAN10".into(), id: 10, prefix: 24, is_native: false }],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topology = Topology::build(&input).unwrap();
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let link_plan = LinkPlan::build(&topology, &mut alloc).unwrap();
        let vlan_plan = VlanPlan::build(&topology, &mut alloc).unwrap();
        let plan = Plan {
            topology,
            link_plan,
            vlan_plan,
            configs: vec![],
            positions: HashMap::new(),
            mode: crate::types::Mode::Digital,
        };
        let report = build(&plan);
        assert!(report.contains("19.0.0.0/30"));
        assert!(report.contains("19.0.0.1"));
        assert!(report.contains("19.0.0.2"));
    }
}
