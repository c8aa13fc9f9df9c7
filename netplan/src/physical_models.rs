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

//! Physical-mode interface inventory (SPEC_FULL supplement to §6): in
//! digital mode every device exposes an unbounded supply of interfaces; in
//! physical mode, a device's declared `model` tag constrains how many
//! interfaces of each type it actually has.

use crate::types::InterfaceType;

/// Physical interface counts carried by one device model.
#[derive(Debug, Clone, Copy)]
pub struct ModelInventory {
    /// Number of `FastEthernet` ports.
    pub fast_ethernet: u32,
    /// Number of `GigabitEthernet` ports.
    pub gigabit_ethernet: u32,
}

impl ModelInventory {
    /// Capacity of this model for `iface_type`, or `None` for a type the
    /// model does not carry at all (an `Other` vendor-specific type is
    /// treated as unconstrained, since the catalogue only tracks the two
    /// standard Cisco families).
    pub fn capacity(&self, iface_type: &InterfaceType) -> Option<u32> {
        match iface_type {
            InterfaceType::FastEthernet => Some(self.fast_ethernet),
            InterfaceType::GigabitEthernet => Some(self.gigabit_ethernet),
            InterfaceType::Ethernet | InterfaceType::Other(_) => None,
        }
    }
}

/// Look up the interface inventory for a physical-mode `model` tag. Covers
/// the default model tags of §6 plus a couple of common lab models seen
/// alongside them; an unrecognized model is treated as unconstrained.
pub fn lookup(model: &str) -> Option<ModelInventory> {
    match model {
        "2811" => Some(ModelInventory { fast_ethernet: 2, gigabit_ethernet: 0 }),
        "1841" => Some(ModelInventory { fast_ethernet: 2, gigabit_ethernet: 0 }),
        "2960-24TT" => Some(ModelInventory { fast_ethernet: 24, gigabit_ethernet: 2 }),
        "3560-24PS" => Some(ModelInventory { fast_ethernet: 24, gigabit_ethernet: 2 }),
        "3650-24PS" => Some(ModelInventory { fast_ethernet: 0, gigabit_ethernet: 24 }),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_model_constrains_fast_ethernet() {
        let inv = lookup("2811").unwrap();
        assert_eq!(inv.capacity(&InterfaceType::FastEthernet), Some(2));
    }

    #[test]
    fn unknown_model_is_unconstrained() {
        assert!(lookup("made-up-model").is_none());
    }

    #[test]
    fn vendor_specific_type_is_unconstrained() {
        let inv = lookup("2811").unwrap();
        assert_eq!(inv.capacity(&InterfaceType::Other("Serial".into())), None);
    }
}
