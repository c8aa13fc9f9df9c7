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

//! EtherChannel composer (§4.6d): the member-range and port-channel blocks
//! shared by both endpoints of a bundled link, whichever switch or L3 core
//! configurator is assembling them.

use crate::config_gen::command::{Block, Submode};
use crate::error::{PlanError, PlanResult};
use crate::types::{Connection, DeviceId, EtherChannelProtocol, Link};

/// The two blocks (`interface range` + `interface Port-channel`) one
/// endpoint of `link` contributes to its own command stream.
pub fn device_blocks(link: &Link, device: &DeviceId) -> PlanResult<Vec<Block>> {
    let Connection::EtherChannel(ec) = &link.connection else {
        return Err(PlanError::ConfigBuildFailure {
            device: device.to_string(),
            reason: "etherchannel composer invoked on a non-etherchannel link".to_string(),
        });
    };

    let is_from_side = link.from == *device;
    let range = if is_from_side { &ec.from_range } else { &ec.to_range };
    let mode = match (ec.protocol, is_from_side) {
        (EtherChannelProtocol::Lacp, true) => "active",
        (EtherChannelProtocol::Lacp, false) => "passive",
        (EtherChannelProtocol::Pagp, true) => "desirable",
        (EtherChannelProtocol::Pagp, false) => "auto",
    };

    Ok(vec![
        Block::submode(
            Submode::Interface,
            vec![format!("interface range {}", range.range_spec()), format!("channel-group {} mode {mode}", ec.group)],
        ),
        Block::submode(
            Submode::Interface,
            vec![
                format!("interface Port-channel{}", ec.group),
                "switchport mode trunk".to_string(),
                "no shutdown".to_string(),
            ],
        ),
    ])
}
