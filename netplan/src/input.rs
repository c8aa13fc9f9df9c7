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

//! Wire shape of the request payload (§6), decoupled from the internal,
//! tagged-variant [`crate::types::Device`] model.

use serde::{Deserialize, Serialize};

use crate::types::{
    ComputerPort, Connection, EtherChannelProtocol, EtherChannelSpec, InterfaceBinding,
    InterfaceRange, ManagementCredentials, RoutingDirection, VlanName,
};

/// Raw node entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeInput {
    /// Stable identifier.
    pub id: String,
    /// Canvas label (unused by the core; kept for round-tripping).
    #[serde(default)]
    pub label: String,
    /// Canvas X coordinate.
    pub x: f64,
    /// Canvas Y coordinate.
    pub y: f64,
    /// Device-kind-specific payload.
    pub data: NodeData,
}

/// `data` field of a node entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeData {
    /// `router`, `switch_core`, `switch`, or `host`.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Unique human label.
    pub name: String,
    /// Physical-model tag, required in physical mode.
    #[serde(default)]
    pub model: Option<String>,
    /// Endpoints attached by port (switches and core switches).
    #[serde(default)]
    pub computers: Vec<ComputerInput>,
    /// VLAN reference (hosts attached directly by edge).
    #[serde(default)]
    pub vlan: Option<String>,
    /// Optional SSHv2 management block (L2 switches).
    #[serde(default)]
    pub management: Option<ManagementCredentials>,
}

/// One entry of a switch's `computers[]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComputerInput {
    /// Human label of the attached end-station.
    pub name: String,
    /// Interface type string, e.g. `FastEthernet`.
    pub port_type: String,
    /// Dotted interface path, e.g. `0/5`.
    pub port_number: String,
    /// VLAN name this access port carries.
    pub vlan: String,
}

impl ComputerInput {
    pub(crate) fn into_computer_port(self) -> Result<ComputerPort, String> {
        Ok(ComputerPort {
            name: self.name,
            port_type: parse_iface_type(&self.port_type),
            port_number: crate::types::InterfacePath::parse(&self.port_number)?,
            vlan: VlanName(self.vlan),
        })
    }
}

/// Raw edge entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeInput {
    /// Stable identifier.
    pub id: String,
    /// Source node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
    /// Link payload.
    pub data: EdgeData,
}

/// `data` field of an edge entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeData {
    /// Interface bound on `from`.
    pub from_interface: IfaceInput,
    /// Interface bound on `to`.
    pub to_interface: IfaceInput,
    /// `bidirectional`, `from-to`, `to-from`, or `none`.
    pub routing_direction: String,
    /// `normal` or `etherchannel`.
    pub connection_type: String,
    /// Present iff `connection_type` is `etherchannel`.
    #[serde(default)]
    pub ether_channel: Option<EtherChannelInput>,
}

/// `{type, number}` interface reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IfaceInput {
    /// Interface type string.
    #[serde(rename = "type")]
    pub iface_type: String,
    /// Dotted interface path.
    pub number: String,
}

impl IfaceInput {
    pub(crate) fn into_binding(self) -> Result<InterfaceBinding, String> {
        Ok(InterfaceBinding {
            iface_type: parse_iface_type(&self.iface_type),
            number: crate::types::InterfacePath::parse(&self.number)?,
        })
    }
}

/// EtherChannel parameters of an edge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EtherChannelInput {
    /// `lacp` or `pagp`.
    pub protocol: String,
    /// Channel-group number.
    pub group: u32,
    /// Member range on `from`, e.g. `0/1-3`.
    pub from_range: String,
    /// Member range on `to`, e.g. `0/1-3`.
    pub to_range: String,
}

fn parse_iface_range(s: &str) -> Result<InterfaceRange, String> {
    // Split at the last occurrence of a digit run followed by '-', e.g.
    // "FastEthernet0/1-3" -> type "FastEthernet", path "0/1", end 3.
    let dash = s.rfind('-').ok_or_else(|| format!("invalid interface range: {s}"))?;
    let (head, tail) = s.split_at(dash);
    let end_last_segment: u32 = tail[1..]
        .parse()
        .map_err(|_| format!("invalid interface range: {s}"))?;
    let type_end = head
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("invalid interface range: {s}"))?;
    let (type_str, path_str) = head.split_at(type_end);
    Ok(InterfaceRange {
        iface_type: parse_iface_type(type_str),
        start: crate::types::InterfacePath::parse(path_str)?,
        end_last_segment,
    })
}

fn parse_iface_type(s: &str) -> crate::types::InterfaceType {
    use crate::types::InterfaceType::*;
    match s {
        "FastEthernet" => FastEthernet,
        "GigabitEthernet" => GigabitEthernet,
        "Ethernet" => Ethernet,
        other => Other(other.to_string()),
    }
}

impl EdgeData {
    pub(crate) fn routing_direction(&self) -> Result<RoutingDirection, String> {
        Ok(match self.routing_direction.as_str() {
            "bidirectional" => RoutingDirection::Bidirectional,
            "from-to" => RoutingDirection::FromTo,
            "to-from" => RoutingDirection::ToFrom,
            "none" => RoutingDirection::None,
            other => return Err(format!("invalid routing direction: {other}")),
        })
    }

    pub(crate) fn connection(&self) -> Result<Connection, String> {
        match self.connection_type.as_str() {
            "normal" => Ok(Connection::Normal),
            "etherchannel" => {
                let ec = self
                    .ether_channel
                    .as_ref()
                    .ok_or_else(|| "etherchannel link missing etherChannel payload".to_string())?;
                let protocol = match ec.protocol.as_str() {
                    "lacp" => EtherChannelProtocol::Lacp,
                    "pagp" => EtherChannelProtocol::Pagp,
                    other => return Err(format!("invalid etherchannel protocol: {other}")),
                };
                let from_range = parse_iface_range(&ec.from_range)?;
                let to_range = parse_iface_range(&ec.to_range)?;
                if from_range.len() != to_range.len() {
                    return Err(format!(
                        "etherchannel ranges of different length: {} vs {}",
                        from_range.len(),
                        to_range.len()
                    ));
                }
                Ok(Connection::EtherChannel(EtherChannelSpec {
                    protocol,
                    group: ec.group,
                    from_range,
                    to_range,
                }))
            }
            other => Err(format!("invalid connection type: {other}")),
        }
    }
}

/// Raw VLAN declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VlanInput {
    /// Unique human label.
    pub name: String,
    /// Numeric VLAN id.
    pub id: u16,
    /// IPv4 prefix length (8-30).
    pub prefix: u8,
    /// At most one VLAN may be native.
    #[serde(default)]
    pub is_native: bool,
}

/// Generation mode string, `digital` (default) or `physical`.
fn default_mode() -> String {
    "digital".to_string()
}

fn default_base_octet() -> u8 {
    19
}

/// Whole request payload, as received from the collaborator HTTP layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopologyInput {
    /// Devices.
    pub nodes: Vec<NodeInput>,
    /// Links.
    pub edges: Vec<EdgeInput>,
    /// VLAN declarations.
    #[serde(default)]
    pub vlans: Vec<VlanInput>,
    /// First octet of the base `/8` block, default 19.
    #[serde(default = "default_base_octet")]
    pub base_network_octet: u8,
    /// `digital` (default) or `physical`.
    #[serde(default = "default_mode")]
    pub mode: String,
}
