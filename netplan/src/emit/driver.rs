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

//! Simulator driver script (§4.8, §6): `addDevice`/`configureIosDevice`
//! statements consumable by the external network simulator, plus
//! link-creation statements mirroring the submitted graph.

use std::collections::HashMap;

use crate::config_gen::DeviceConfig;
use crate::plan::{self, Plan};
use crate::types::DeviceId;

/// Escape a string for embedding inside a double-quoted JS-style argument.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Join a device's command stream into the single-line, `\n`-escaped string
/// `configureIosDevice` expects.
fn escape_stream(lines: &[String]) -> String {
    escape(&lines.join("\n"))
}

/// Build the simulator driver script for `plan`.
pub fn build(plan: &Plan) -> String {
    let mut out = String::new();

    for device in plan.topology.devices() {
        let (x, y) = plan
            .positions
            .get(device.id())
            .copied()
            .unwrap_or((crate::coords::TARGET_CX, crate::coords::TARGET_CY));
        let model = device
            .common()
            .model
            .clone()
            .unwrap_or_else(|| plan::default_model_tag(device.kind()).to_string());
        out.push_str(&format!(
            "addDevice(\"{}\", \"{}\", {}, {});\n",
            escape(device.name()),
            escape(&model),
            x,
            y
        ));
    }

    let configs_by_device: HashMap<&DeviceId, &DeviceConfig> =
        plan.configs.iter().map(|c| (&c.device, c)).collect();
    for device in plan.topology.devices() {
        let Some(config) = configs_by_device.get(device.id()) else { continue };
        out.push_str(&format!(
            "configureIosDevice(\"{}\", \"{}\");\n",
            escape(&config.hostname),
            escape_stream(&config.lines)
        ));
    }

    for link in plan.topology.links() {
        let from = plan.topology.device(&link.from).expect("validated by Topology::build");
        let to = plan.topology.device(&link.to).expect("validated by Topology::build");
        out.push_str(&format!(
            "addLink(\"{}\", \"{}\", \"{}\", \"{}\", \"{}\");\n",
            escape(from.name()),
            escape(to.name()),
            escape(&link.from_interface.to_string()),
            escape(&link.to_interface.to_string()),
            escape(to.name())
        ));
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::input::{EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput, TopologyInput};

    fn router(id: &str, name: &str) -> NodeInput {
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

    #[test]
    fn empty_topology_yields_empty_script() {
        let input = TopologyInput {
            nodes: vec![],
            edges: vec![],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let plan = crate::plan::generate(&input, &GenerationConfig::default()).unwrap();
        assert_eq!(build(&plan), "");
    }

    #[test]
    fn emits_add_device_and_configure_ios_device_per_router() {
        let input = TopologyInput {
            nodes: vec![router("n1", "R1"), router("n2", "R2")],
            edges: vec![EdgeInput {
                id: "e1".into(),
                from: "n1".into(),
                to: "n2".into(),
                data: EdgeData {
                    from_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                    to_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                    routing_direction: "bidirectional".to_string(),
                    connection_type: "normal".to_string(),
                    ether_channel: None,
                },
            }],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let plan = crate::plan::generate(&input, &GenerationConfig::default()).unwrap();
        let script = build(&plan);
        assert!(script.contains("addDevice(\"R1\", \"2811\""));
        assert!(script.contains("configureIosDevice(\"R1\","));
        assert!(script.contains("addLink(\"R1\", \"R2\""));
    }
}
