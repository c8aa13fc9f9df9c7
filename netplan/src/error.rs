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

//! Error taxonomy for the configuration-generation pipeline.

use thiserror::Error;

/// Every way a generation request can fail. Each variant names the offending
/// device, VLAN, or link by its label so the collaborator layer can surface a
/// single, human-readable diagnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The graph references an unknown id, two devices share a name, or an
    /// edge endpoint does not exist.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A VLAN prefix is out of range, too long to host DHCP, or more than one
    /// VLAN is marked native.
    #[error("invalid vlan {vlan}: {reason}")]
    InvalidVlan {
        /// Name of the offending VLAN.
        vlan: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Two link endpoints on the same device share `{type, number}`, or an
    /// EtherChannel range collides with an existing assignment.
    #[error("interface conflict on {device}: {reason}")]
    InterfaceConflict {
        /// Name of the device carrying the conflicting interfaces.
        device: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The allocator could not satisfy a request for a `/{prefix_len}`
    /// network from the configured base block.
    #[error("address space exhausted: no free /{prefix_len} network remains in {base}")]
    AddressExhausted {
        /// Requested prefix length.
        prefix_len: u8,
        /// Base network the request was drawn from.
        base: String,
    },

    /// `mode` is `physical` but a routed device lacks a `model` tag.
    #[error("device {device} has no model tag, required in physical mode")]
    PhysicalModelMissing {
        /// Name of the device missing a model tag.
        device: String,
    },

    /// A configurator encountered an internally inconsistent plan. This
    /// indicates a bug in the pipeline rather than a malformed request.
    #[error("internal configuration build failure on {device}: {reason}")]
    ConfigBuildFailure {
        /// Name of the device being configured when the inconsistency was found.
        device: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Convenience alias used throughout the crate.
pub type PlanResult<T> = Result<T, PlanError>;
