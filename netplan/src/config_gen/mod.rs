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

//! Device Configurators (§4.6): four variants converting plans into ordered
//! IOS command lists with correct mode transitions.

pub mod command;
pub mod etherchannel;
pub mod router;
pub mod switch;
pub mod switch_core;

use crate::types::DeviceId;

/// The fully-assembled command stream for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// The device this stream configures.
    pub device: DeviceId,
    /// Unique human label, used as the CLI stream's leading line and as the
    /// per-category bundle banner.
    pub hostname: String,
    /// The fully transition-formatted command lines.
    pub lines: Vec<String>,
}

/// Render `prefix_len` as a dotted-decimal subnet mask, e.g. `24` -> `255.255.255.0`.
pub(crate) fn netmask(net: &ipnet::Ipv4Net) -> std::net::Ipv4Addr {
    net.netmask()
}

/// Default enable-secret line shared by every device kind. No secret is
/// carried by the submitted data model, so a fixed placeholder is emitted;
/// `management` credentials on L2 switches carry the only per-device secret.
pub(crate) const DEFAULT_ENABLE_SECRET: &str = "cisco";
