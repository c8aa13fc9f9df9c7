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

//! VLAN Planner (§4.4): allocates one subnet per declared VLAN. The gateway
//! is always the last usable host; the DHCP exclusion range is fixed policy
//! (first ten usable hosts, clamped to what the subnet actually has).

use std::collections::HashMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use log::debug;

use crate::allocator::AddressAllocator;
use crate::error::PlanResult;
use crate::types::VlanName;

/// Fixed DHCP exclusion policy: the first ten usable hosts.
const DHCP_EXCLUSION_COUNT: usize = 10;

/// The subnet, gateway, and DHCP exclusion range allocated for one VLAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanAllocation {
    /// The VLAN this allocation belongs to.
    pub vlan: VlanName,
    /// The subnet drawn from the base block.
    pub network: Ipv4Net,
    /// Default gateway address: the subnet's last usable host.
    pub gateway: Ipv4Addr,
    /// First address of the DHCP exclusion range.
    pub dhcp_excluded_start: Ipv4Addr,
    /// Last address of the DHCP exclusion range (inclusive).
    pub dhcp_excluded_end: Ipv4Addr,
}

/// Every VLAN's allocation, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct VlanPlan {
    allocations: HashMap<VlanName, VlanAllocation>,
}

impl VlanPlan {
    /// Allocate a subnet for every declared VLAN, in declaration order.
    pub fn build(topology: &crate::topology::Topology, allocator: &mut AddressAllocator) -> PlanResult<Self> {
        let mut allocations = HashMap::new();
        for vlan in topology.vlans() {
            let network = allocator.allocate(vlan.prefix_len)?;
            let hosts: Vec<Ipv4Addr> = network.hosts().collect();
            let gateway = *hosts.last().expect("a /30 or shorter prefix has at least one usable host");
            let excluded_count = hosts.len().min(DHCP_EXCLUSION_COUNT);
            let dhcp_excluded_start = hosts[0];
            let dhcp_excluded_end = hosts[excluded_count - 1];

            debug!(
                "vlan {} allocated {} gateway {} excluded {}..={}",
                vlan.name, network, gateway, dhcp_excluded_start, dhcp_excluded_end
            );

            allocations.insert(
                vlan.name.clone(),
                VlanAllocation {
                    vlan: vlan.name.clone(),
                    network,
                    gateway,
                    dhcp_excluded_start,
                    dhcp_excluded_end,
                },
            );
        }
        Ok(Self { allocations })
    }

    /// Look up a VLAN's allocation by name.
    pub fn get(&self, vlan: &VlanName) -> Option<&VlanAllocation> {
        self.allocations.get(vlan)
    }

    /// Every VLAN allocation, unordered.
    pub fn all(&self) -> impl Iterator<Item = &VlanAllocation> {
        self.allocations.values()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::{TopologyInput, VlanInput};
    use crate::topology::Topology;

    fn topology_with_vlans(vlans: Vec<VlanInput>) -> Topology {
        let input = TopologyInput {
            nodes: vec![],
            edges: vec![],
            vlans,
            base_network_octet: 19,
            mode: "digital".into(),
        };
        Topology::build(&input).unwrap()
    }

    #[test]
    fn gateway_is_last_usable_host() {
        let topo = topology_with_vlans(vec![VlanInput {
            name: "VLAN10".into(),
            id: 10,
            prefix: 24,
            is_native: false,
        }]);
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let plan = VlanPlan::build(&topo, &mut alloc).unwrap();
        let a = plan.get(&VlanName("VLAN10".into())).unwrap();
        assert_eq!(a.network, "19.0.0.0/24".parse().unwrap());
        assert_eq!(a.gateway, "19.0.0.254".parse::<Ipv4Addr>().unwrap());
    }

    #[test]
    fn slash_30_clamps_exclusion_to_two_hosts() {
        let topo = topology_with_vlans(vec![VlanInput {
            name: "VLAN20".into(),
            id: 20,
            prefix: 30,
            is_native: false,
        }]);
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let plan = VlanPlan::build(&topo, &mut alloc).unwrap();
        let a = plan.get(&VlanName("VLAN20".into())).unwrap();
        assert_eq!(a.dhcp_excluded_start, "19.0.0.1".parse::<Ipv4Addr>().unwrap());
        assert_eq!(a.dhcp_excluded_end, "19.0.0.2".parse::<Ipv4Addr>().unwrap());
        assert_eq!(a.gateway, "19.0.0.2".parse::<Ipv4Addr>().unwrap());
    }

    #[test]
    fn exclusion_clamps_to_ten_on_large_subnet() {
        let topo = topology_with_vlans(vec![VlanInput {
            name: "VLAN30".into(),
            id: 30,
            prefix: 16,
            is_native: false,
        }]);
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let plan = VlanPlan::build(&topo, &mut alloc).unwrap();
        let a = plan.get(&VlanName("VLAN30".into())).unwrap();
        assert_eq!(a.dhcp_excluded_start, "19.0.0.1".parse::<Ipv4Addr>().unwrap());
        assert_eq!(a.dhcp_excluded_end, "19.0.0.10".parse::<Ipv4Addr>().unwrap());
    }
}
