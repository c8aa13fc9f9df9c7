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

//! Topology Graph (§4.2): normalizes the submitted nodes/edges into an
//! in-memory graph keyed by stable ids, with submission-order-preserving
//! neighbor indices. Owns `Devices` and `Links`; incident-edge lists store
//! ids, not references, so the structure has no cycles to resolve.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::error::{PlanError, PlanResult};
use crate::input::TopologyInput;
use crate::types::{
    Device, DeviceId, DeviceKind, InterfaceBinding, Link, LinkId, RoutingDirection, Vlan,
    VlanName,
};

/// A single direction-respecting out-edge in the adjacency index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutEdge {
    /// Neighbor reached by this edge.
    pub neighbor: DeviceId,
    /// The link id that carries this edge.
    pub link: LinkId,
}

/// Normalized, validated topology. Constructed once per request; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Topology {
    devices: HashMap<DeviceId, Device>,
    device_order: Vec<DeviceId>,
    name_to_id: HashMap<String, DeviceId>,
    links: HashMap<LinkId, Link>,
    link_order: Vec<LinkId>,
    incident: HashMap<DeviceId, Vec<LinkId>>,
    out_neighbors: HashMap<DeviceId, Vec<OutEdge>>,
    vlans: HashMap<VlanName, Vlan>,
    vlan_order: Vec<VlanName>,
    used_interfaces: HashMap<DeviceId, HashSet<InterfaceBinding>>,
}

impl Topology {
    /// Normalize and validate a raw request payload.
    pub fn build(input: &TopologyInput) -> PlanResult<Self> {
        let mut devices = HashMap::new();
        let mut device_order = Vec::new();
        let mut name_to_id: HashMap<String, DeviceId> = HashMap::new();

        for node in &input.nodes {
            let id = DeviceId(node.id.clone());
            if name_to_id.contains_key(&node.data.name) {
                return Err(PlanError::InvalidTopology(format!(
                    "duplicate device name: {}",
                    node.data.name
                )));
            }
            let common = crate::types::DeviceCommon {
                id: id.clone(),
                name: node.data.name.clone(),
                x: node.x,
                y: node.y,
                model: node.data.model.clone(),
            };
            let device = match node.data.device_type.as_str() {
                "router" => Device::Router { common },
                "switch_core" => Device::SwitchCore {
                    common,
                    computers: node
                        .data
                        .computers
                        .iter()
                        .cloned()
                        .map(|c| c.into_computer_port())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(PlanError::InvalidTopology)?,
                },
                "switch" => Device::Switch {
                    common,
                    computers: node
                        .data
                        .computers
                        .iter()
                        .cloned()
                        .map(|c| c.into_computer_port())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(PlanError::InvalidTopology)?,
                    management: node.data.management.clone(),
                },
                "host" => Device::Host {
                    common,
                    vlan: node.data.vlan.clone().map(VlanName),
                },
                other => {
                    return Err(PlanError::InvalidTopology(format!(
                        "unknown device type: {other}"
                    )))
                }
            };
            name_to_id.insert(node.data.name.clone(), id.clone());
            device_order.push(id.clone());
            devices.insert(id, device);
        }

        let mut links = HashMap::new();
        let mut link_order = Vec::new();
        let mut incident: HashMap<DeviceId, Vec<LinkId>> = HashMap::new();
        let mut out_neighbors: HashMap<DeviceId, Vec<OutEdge>> = HashMap::new();
        let mut used_interfaces: HashMap<DeviceId, HashSet<InterfaceBinding>> = HashMap::new();

        for edge in &input.edges {
            let id = LinkId(edge.id.clone());
            let from = DeviceId(edge.from.clone());
            let to = DeviceId(edge.to.clone());
            if !devices.contains_key(&from) {
                return Err(PlanError::InvalidTopology(format!(
                    "edge {} references unknown device {}",
                    edge.id, edge.from
                )));
            }
            if !devices.contains_key(&to) {
                return Err(PlanError::InvalidTopology(format!(
                    "edge {} references unknown device {}",
                    edge.id, edge.to
                )));
            }

            let from_interface = edge
                .data
                .from_interface
                .clone()
                .into_binding()
                .map_err(PlanError::InvalidTopology)?;
            let to_interface = edge
                .data
                .to_interface
                .clone()
                .into_binding()
                .map_err(PlanError::InvalidTopology)?;
            let connection = edge.data.connection().map_err(PlanError::InvalidTopology)?;
            let routing_direction =
                edge.data.routing_direction().map_err(PlanError::InvalidTopology)?;

            if matches!(connection, crate::types::Connection::EtherChannel(_)) {
                for (endpoint, device) in [(&from, &devices[&from]), (&to, &devices[&to])] {
                    if !matches!(device.kind(), DeviceKind::Switch | DeviceKind::SwitchCore) {
                        return Err(PlanError::InterfaceConflict {
                            device: device.name().to_string(),
                            reason: format!(
                                "etherchannel link {} requires a switch or switch_core endpoint, but {} is a {:?}",
                                edge.id,
                                endpoint,
                                device.kind()
                            ),
                        });
                    }
                }
            }

            register_interfaces(&mut used_interfaces, &from, &connection, true, &from_interface)?;
            register_interfaces(&mut used_interfaces, &to, &connection, false, &to_interface)?;

            let link = Link {
                id: id.clone(),
                from: from.clone(),
                to: to.clone(),
                from_interface,
                to_interface,
                connection,
                routing_direction,
            };

            incident.entry(from.clone()).or_default().push(id.clone());
            incident.entry(to.clone()).or_default().push(id.clone());

            match routing_direction {
                RoutingDirection::Bidirectional => {
                    out_neighbors.entry(from.clone()).or_default().push(OutEdge {
                        neighbor: to.clone(),
                        link: id.clone(),
                    });
                    out_neighbors.entry(to.clone()).or_default().push(OutEdge {
                        neighbor: from.clone(),
                        link: id.clone(),
                    });
                }
                RoutingDirection::FromTo => {
                    out_neighbors.entry(from.clone()).or_default().push(OutEdge {
                        neighbor: to.clone(),
                        link: id.clone(),
                    });
                }
                RoutingDirection::ToFrom => {
                    out_neighbors.entry(to.clone()).or_default().push(OutEdge {
                        neighbor: from.clone(),
                        link: id.clone(),
                    });
                }
                RoutingDirection::None => {}
            }

            link_order.push(id.clone());
            links.insert(id, link);
        }

        // register computer ports against the used-interface set, discarding
        // any stale client-side cache the submission might carry alongside.
        for (id, device) in &devices {
            for computer in device.computers() {
                let binding = InterfaceBinding {
                    iface_type: computer.port_type.clone(),
                    number: computer.port_number.clone(),
                };
                if !used_interfaces.entry(id.clone()).or_default().insert(binding) {
                    return Err(PlanError::InterfaceConflict {
                        device: device.name().to_string(),
                        reason: format!(
                            "port {}{} used by more than one endpoint",
                            computer.port_type, computer.port_number
                        ),
                    });
                }
            }
        }

        let mut vlans = HashMap::new();
        let mut vlan_order = Vec::new();
        let mut native_seen = false;
        for v in &input.vlans {
            let name = VlanName(v.name.clone());
            if vlans.contains_key(&name) {
                return Err(PlanError::InvalidVlan {
                    vlan: v.name.clone(),
                    reason: "duplicate vlan name".to_string(),
                });
            }
            if !(8..=30).contains(&v.prefix) {
                return Err(PlanError::InvalidVlan {
                    vlan: v.name.clone(),
                    reason: format!("prefix length {} out of range [8,30]", v.prefix),
                });
            }
            if v.is_native {
                if native_seen {
                    return Err(PlanError::InvalidVlan {
                        vlan: v.name.clone(),
                        reason: "more than one native vlan declared".to_string(),
                    });
                }
                native_seen = true;
            }
            vlan_order.push(name.clone());
            vlans.insert(
                name.clone(),
                Vlan {
                    id: v.id,
                    name,
                    prefix_len: v.prefix,
                    is_native: v.is_native,
                },
            );
        }

        // every vlan referenced by a computer port or a directly-attached host
        // must be declared.
        for device in devices.values() {
            for computer in device.computers() {
                if !vlans.contains_key(&computer.vlan) {
                    return Err(PlanError::InvalidTopology(format!(
                        "device {} references undeclared vlan {}",
                        device.name(),
                        computer.vlan
                    )));
                }
            }
            if let Device::Host { vlan: Some(v), .. } = device {
                if !vlans.contains_key(v) {
                    return Err(PlanError::InvalidTopology(format!(
                        "device {} references undeclared vlan {}",
                        device.name(),
                        v
                    )));
                }
            }
        }

        debug!(
            "topology built: {} devices, {} links, {} vlans",
            device_order.len(),
            link_order.len(),
            vlan_order.len()
        );

        Ok(Self {
            devices,
            device_order,
            name_to_id,
            links,
            link_order,
            incident,
            out_neighbors,
            vlans,
            vlan_order,
            used_interfaces,
        })
    }

    /// Devices, in submission order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.device_order.iter().map(move |id| &self.devices[id])
    }

    /// Look up a device by id.
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Look up a device id by its unique name.
    pub fn device_id_by_name(&self, name: &str) -> Option<&DeviceId> {
        self.name_to_id.get(name)
    }

    /// Links, in submission order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.link_order.iter().map(move |id| &self.links[id])
    }

    /// Look up a link by id.
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// Links incident to `device`, in submission order.
    pub fn incident(&self, device: &DeviceId) -> &[LinkId] {
        self.incident.get(device).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Direction-respecting out-neighbors of `device`.
    pub fn out_neighbors(&self, device: &DeviceId) -> &[OutEdge] {
        self.out_neighbors.get(device).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// VLANs, in declaration order.
    pub fn vlans(&self) -> impl Iterator<Item = &Vlan> {
        self.vlan_order.iter().map(move |name| &self.vlans[name])
    }

    /// Look up a VLAN by name.
    pub fn vlan(&self, name: &VlanName) -> Option<&Vlan> {
        self.vlans.get(name)
    }

    /// Routers and core switches, in submission order.
    pub fn l3_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices().filter(|d| d.kind().is_l3())
    }

    /// The other endpoint of `link`, given one known endpoint.
    pub fn other_end(&self, link: &Link, known: &DeviceId) -> DeviceId {
        if &link.from == known {
            link.to.clone()
        } else {
            link.from.clone()
        }
    }

    /// Every interface bound on `device`, by any edge endpoint or computer
    /// port (EtherChannel ranges already expanded to their members). Used by
    /// the physical-mode interface catalogue to check inventory limits.
    pub fn used_interfaces(&self, device: &DeviceId) -> impl Iterator<Item = &InterfaceBinding> {
        self.used_interfaces.get(device).into_iter().flatten()
    }

    /// Count of interfaces bound on `device` whose type is `iface_type`.
    pub fn interface_count(&self, device: &DeviceId, iface_type: &crate::types::InterfaceType) -> usize {
        self.used_interfaces(device).filter(|b| &b.iface_type == iface_type).count()
    }
}

fn register_interfaces(
    used: &mut HashMap<DeviceId, HashSet<InterfaceBinding>>,
    device: &DeviceId,
    connection: &crate::types::Connection,
    is_from: bool,
    single: &InterfaceBinding,
) -> PlanResult<()> {
    let entry = used.entry(device.clone()).or_default();
    let bindings: Vec<InterfaceBinding> = match connection {
        crate::types::Connection::EtherChannel(ec) => {
            let range = if is_from { &ec.from_range } else { &ec.to_range };
            range.members()
        }
        crate::types::Connection::Normal => vec![single.clone()],
    };
    for binding in bindings {
        if !entry.insert(binding.clone()) {
            return Err(PlanError::InterfaceConflict {
                device: device.to_string(),
                reason: format!("interface {binding} assigned to more than one endpoint"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{EdgeData, EdgeInput, IfaceInput, NodeData, NodeInput};

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

    fn bidir_edge(id: &str, from: &str, to: &str) -> EdgeInput {
        EdgeInput {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            data: EdgeData {
                from_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                to_interface: IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() },
                routing_direction: "bidirectional".to_string(),
                connection_type: "normal".to_string(),
                ether_channel: None,
            },
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let input = TopologyInput {
            nodes: vec![router("n1", "R1"), router("n2", "R1")],
            edges: vec![],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let err = Topology::build(&input).unwrap_err();
        assert!(matches!(err, PlanError::InvalidTopology(_)));
    }

    #[test]
    fn rejects_unknown_edge_endpoint() {
        let input = TopologyInput {
            nodes: vec![router("n1", "R1")],
            edges: vec![bidir_edge("e1", "n1", "missing")],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let err = Topology::build(&input).unwrap_err();
        assert!(matches!(err, PlanError::InvalidTopology(_)));
    }

    #[test]
    fn builds_bidirectional_adjacency() {
        let input = TopologyInput {
            nodes: vec![router("n1", "R1"), router("n2", "R2")],
            edges: vec![bidir_edge("e1", "n1", "n2")],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let topo = Topology::build(&input).unwrap();
        let n1 = DeviceId("n1".into());
        let n2 = DeviceId("n2".into());
        assert_eq!(topo.out_neighbors(&n1).len(), 1);
        assert_eq!(topo.out_neighbors(&n2).len(), 1);
        assert_eq!(topo.out_neighbors(&n1)[0].neighbor, n2);
    }

    #[test]
    fn detects_duplicate_interface_on_same_device() {
        let mut e2 = bidir_edge("e2", "n1", "n2");
        e2.data.from_interface = IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() };
        let input = TopologyInput {
            nodes: vec![router("n1", "R1"), router("n2", "R2"), router("n3", "R3")],
            edges: vec![bidir_edge("e1", "n1", "n2"), {
                let mut e = bidir_edge("e2", "n1", "n3");
                e.data.from_interface = IfaceInput { iface_type: "FastEthernet".into(), number: "0/0".into() };
                e
            }],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let err = Topology::build(&input).unwrap_err();
        assert!(matches!(err, PlanError::InterfaceConflict { .. }));
    }

    #[test]
    fn rejects_etherchannel_with_a_router_endpoint() {
        let mut e1 = bidir_edge("e1", "n1", "n2");
        e1.data.connection_type = "etherchannel".to_string();
        e1.data.ether_channel = Some(crate::input::EtherChannelInput {
            protocol: "lacp".to_string(),
            group: 1,
            from_range: "FastEthernet0/1-3".to_string(),
            to_range: "FastEthernet0/1-3".to_string(),
        });
        let input = TopologyInput {
            nodes: vec![router("n1", "R1"), router("n2", "R2")],
            edges: vec![e1],
            vlans: vec![],
            base_network_octet: 19,
            mode: "digital".into(),
        };
        let err = Topology::build(&input).unwrap_err();
        assert!(matches!(err, PlanError::InterfaceConflict { .. }));
    }
}
