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

//! Core data model: devices, links, and VLANs, modeled as tagged variants so
//! every configurator branch over device kind is exhaustive.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque device identifier as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub String);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Stable, opaque link identifier as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LinkId(pub String);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique VLAN label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VlanName(pub String);

impl fmt::Display for VlanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VlanName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Discriminant of [`Device`], used where only the kind matters (priority
/// ordering, routed-link eligibility).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Layer-3 router.
    Router,
    /// Layer-3 core switch (owns VLAN gateways for its L2 domain).
    SwitchCore,
    /// Plain layer-2 switch.
    Switch,
    /// Endpoint host or server.
    Host,
}

impl DeviceKind {
    /// A link is routed only if both endpoints are L3 (router or core switch).
    pub fn is_l3(self) -> bool {
        matches!(self, DeviceKind::Router | DeviceKind::SwitchCore)
    }

    /// Priority used to decide which endpoint of a routed link gets the
    /// numerically lower host address: router before switch_core.
    pub fn address_priority(self) -> u8 {
        match self {
            DeviceKind::Router => 0,
            DeviceKind::SwitchCore => 1,
            DeviceKind::Switch => 2,
            DeviceKind::Host => 3,
        }
    }
}

/// One endpoint attached to a switch by port, not by graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerPort {
    /// Human label of the attached end-station.
    pub name: String,
    /// Interface type the end-station is plugged into.
    pub port_type: InterfaceType,
    /// Interface path, e.g. `0/5`.
    pub port_number: InterfacePath,
    /// VLAN the access port carries.
    pub vlan: VlanName,
}

/// Optional SSHv2 management credentials on an L2 switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementCredentials {
    /// Domain name used to generate the RSA host key.
    pub domain_name: String,
    /// Local user name.
    pub username: String,
    /// Local user secret.
    pub secret: String,
}

/// Fields shared by every device kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCommon {
    /// Stable identifier.
    pub id: DeviceId,
    /// Unique human label.
    pub name: String,
    /// Canvas X coordinate.
    pub x: f64,
    /// Canvas Y coordinate.
    pub y: f64,
    /// Physical-model tag, required when generating in physical mode.
    pub model: Option<String>,
}

/// A node in the submitted topology, tagged by kind so every configurator is
/// exhaustive over the four device kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Device {
    /// Layer-3 router.
    Router {
        /// Shared fields.
        #[serde(flatten)]
        common: DeviceCommon,
    },
    /// Layer-3 core switch.
    SwitchCore {
        /// Shared fields.
        #[serde(flatten)]
        common: DeviceCommon,
        /// End-stations attached by port.
        #[serde(default)]
        computers: Vec<ComputerPort>,
    },
    /// Plain layer-2 switch.
    Switch {
        /// Shared fields.
        #[serde(flatten)]
        common: DeviceCommon,
        /// End-stations attached by port.
        #[serde(default)]
        computers: Vec<ComputerPort>,
        /// Optional SSHv2 management block.
        #[serde(default)]
        management: Option<ManagementCredentials>,
    },
    /// Endpoint host or server.
    Host {
        /// Shared fields.
        #[serde(flatten)]
        common: DeviceCommon,
        /// VLAN this host belongs to, if attached directly by edge.
        #[serde(default)]
        vlan: Option<VlanName>,
    },
}

impl Device {
    /// Fields shared across every variant.
    pub fn common(&self) -> &DeviceCommon {
        match self {
            Device::Router { common } => common,
            Device::SwitchCore { common, .. } => common,
            Device::Switch { common, .. } => common,
            Device::Host { common, .. } => common,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &DeviceId {
        &self.common().id
    }

    /// Unique human label.
    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// Discriminant of this device.
    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::Router { .. } => DeviceKind::Router,
            Device::SwitchCore { .. } => DeviceKind::SwitchCore,
            Device::Switch { .. } => DeviceKind::Switch,
            Device::Host { .. } => DeviceKind::Host,
        }
    }

    /// End-stations attached by port, if this device kind carries any.
    pub fn computers(&self) -> &[ComputerPort] {
        match self {
            Device::SwitchCore { computers, .. } => computers,
            Device::Switch { computers, .. } => computers,
            _ => &[],
        }
    }
}

/// Interface type of a physical or logical interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum InterfaceType {
    /// `FastEthernet`.
    FastEthernet,
    /// `GigabitEthernet`.
    GigabitEthernet,
    /// `Ethernet`.
    Ethernet,
    /// Any other vendor-specific interface type, kept verbatim.
    Other(String),
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceType::FastEthernet => write!(f, "FastEthernet"),
            InterfaceType::GigabitEthernet => write!(f, "GigabitEthernet"),
            InterfaceType::Ethernet => write!(f, "Ethernet"),
            InterfaceType::Other(s) => write!(f, "{s}"),
        }
    }
}

/// A dotted interface path such as `0/1` or `1/0/3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfacePath(pub Vec<u32>);

impl InterfacePath {
    /// Parse a dotted path like `0/1` or `1/0/3`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts = s
            .split('/')
            .map(|p| p.parse::<u32>().map_err(|_| format!("invalid interface path: {s}")))
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err(format!("invalid interface path: {s}"));
        }
        Ok(Self(parts))
    }

    /// Build a path by replacing the final segment, used when expanding an
    /// EtherChannel range into its member interfaces.
    pub fn with_last(&self, value: u32) -> Self {
        let mut parts = self.0.clone();
        if let Some(last) = parts.last_mut() {
            *last = value;
        } else {
            parts.push(value);
        }
        Self(parts)
    }

    /// The final segment, e.g. `3` in `0/3`.
    pub fn last(&self) -> u32 {
        *self.0.last().unwrap_or(&0)
    }
}

impl fmt::Display for InterfacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("/")
        )
    }
}

impl TryFrom<String> for InterfacePath {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InterfacePath> for String {
    fn from(value: InterfacePath) -> Self {
        value.to_string()
    }
}

/// `{type, number}` interface binding, as assigned to one endpoint of a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceBinding {
    /// Interface type.
    pub iface_type: InterfaceType,
    /// Dotted interface path.
    pub number: InterfacePath,
}

impl fmt::Display for InterfaceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.iface_type, self.number)
    }
}

/// LACP or PAgP EtherChannel protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EtherChannelProtocol {
    /// LACP: `active`/`passive` modes.
    Lacp,
    /// PAgP: `desirable`/`auto` modes.
    Pagp,
}

/// An inclusive, contiguous range of interfaces of a single type, e.g. `0/1-3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRange {
    /// Interface type shared by every member.
    pub iface_type: InterfaceType,
    /// Path to the first member, e.g. `0/1`.
    pub start: InterfacePath,
    /// Last segment of the last member (inclusive), e.g. `3` for `0/1-3`.
    pub end_last_segment: u32,
}

impl InterfaceRange {
    /// Number of interfaces spanned by this range.
    pub fn len(&self) -> u32 {
        self.end_last_segment.saturating_sub(self.start.last()) + 1
    }

    /// Whether the range spans zero interfaces (never constructed, kept for
    /// API completeness).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the range into its member interface bindings, in ascending order.
    pub fn members(&self) -> Vec<InterfaceBinding> {
        (self.start.last()..=self.end_last_segment)
            .map(|n| InterfaceBinding {
                iface_type: self.iface_type.clone(),
                number: self.start.with_last(n),
            })
            .collect()
    }

    /// Cisco `interface range` argument, e.g. `FastEthernet0/1-3`.
    pub fn range_spec(&self) -> String {
        format!("{}{}-{}", self.iface_type, self.start, self.end_last_segment)
    }
}

/// EtherChannel parameters carried by a link whose `connection_type` is
/// `etherchannel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtherChannelSpec {
    /// LACP or PAgP.
    pub protocol: EtherChannelProtocol,
    /// Channel-group number.
    pub group: u32,
    /// Member range on the `from` endpoint.
    pub from_range: InterfaceRange,
    /// Member range on the `to` endpoint.
    pub to_range: InterfaceRange,
}

/// Whether a link is a plain connection or an EtherChannel bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Connection {
    /// A single physical or routed link.
    Normal,
    /// A bundle of member interfaces aggregated into a channel-group.
    EtherChannel(EtherChannelSpec),
}

/// Direction in which static routes may be synthesized across a link. Carries
/// no meaning for physical connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingDirection {
    /// Routes synthesized in both directions.
    Bidirectional,
    /// Routes synthesized only from `from` towards `to`.
    FromTo,
    /// Routes synthesized only from `to` towards `from`.
    ToFrom,
    /// Physical connector only; no routes are synthesized.
    None,
}

/// An edge of the submitted topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Stable identifier.
    pub id: LinkId,
    /// Source endpoint.
    pub from: DeviceId,
    /// Destination endpoint.
    pub to: DeviceId,
    /// Interface bound to `from` on this link.
    pub from_interface: InterfaceBinding,
    /// Interface bound to `to` on this link.
    pub to_interface: InterfaceBinding,
    /// Normal or EtherChannel.
    pub connection: Connection,
    /// Direction in which static routes may traverse this link.
    pub routing_direction: RoutingDirection,
}

impl Link {
    /// Whether this link is eligible for a backbone `/30`, i.e. it is not an
    /// EtherChannel bundle to be routed as one of its member interfaces (a
    /// link is either routed as a single subnet or it is an EtherChannel
    /// connector at layer 2 — never both).
    pub fn is_etherchannel(&self) -> bool {
        matches!(self.connection, Connection::EtherChannel(_))
    }
}

/// A declared VLAN. Carries an explicit numeric id in addition to its unique
/// name, since Cisco `vlan`/`encapsulation dot1Q` commands require a numeric
/// identifier distinct from the human label (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vlan {
    /// Numeric VLAN id (1-4094).
    pub id: u16,
    /// Unique human label.
    pub name: VlanName,
    /// IPv4 prefix length for the VLAN subnet (8-30).
    pub prefix_len: u8,
    /// At most one VLAN in a request may be native.
    pub is_native: bool,
}

/// Generation mode: digital uses a generic interface catalogue; physical
/// requires a `model` tag per device and constrains interface inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generic, unconstrained interface catalogue.
    Digital,
    /// Physical-model-driven interface inventory.
    Physical,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Digital
    }
}
