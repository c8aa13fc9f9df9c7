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

//! Address Allocator (§4.1): hands out non-overlapping `/N` networks drawn
//! from a configurable base block, in canonical ascending order.

use ipnet::Ipv4Net;

use crate::error::{PlanError, PlanResult};

/// Allocates non-overlapping IPv4 subnets of a requested prefix length from a
/// base block. Constructed fresh per generation request; never shared
/// across requests (§5).
#[derive(Debug, Clone)]
pub struct AddressAllocator {
    base: Ipv4Net,
    used: Vec<Ipv4Net>,
}

impl AddressAllocator {
    /// Create a new allocator over `base` with no subnets marked used.
    pub fn new(base: Ipv4Net) -> Self {
        Self { base, used: Vec::new() }
    }

    /// The base block this allocator draws from.
    pub fn base(&self) -> Ipv4Net {
        self.base
    }

    /// Hand out the first non-overlapping `/prefix_len` network within the
    /// base block, in ascending network-address order, and mark it used.
    pub fn allocate(&mut self, prefix_len: u8) -> PlanResult<Ipv4Net> {
        if prefix_len < self.base.prefix_len() {
            return Err(PlanError::AddressExhausted {
                prefix_len,
                base: self.base.to_string(),
            });
        }
        let candidates = self.base.subnets(prefix_len).map_err(|_| PlanError::AddressExhausted {
            prefix_len,
            base: self.base.to_string(),
        })?;
        for candidate in candidates {
            if !self.used.iter().any(|u| overlaps(u, &candidate)) {
                self.used.push(candidate);
                return Ok(candidate);
            }
        }
        Err(PlanError::AddressExhausted {
            prefix_len,
            base: self.base.to_string(),
        })
    }

    /// Mark an externally-known network as used, so future allocations avoid it.
    pub fn mark_used(&mut self, net: Ipv4Net) {
        self.used.push(net);
    }

    /// Every subnet allocated so far, in the order they were handed out.
    pub fn allocated(&self) -> &[Ipv4Net] {
        &self.used
    }
}

/// Two networks overlap iff one contains the other's network address.
fn overlaps(a: &Ipv4Net, b: &Ipv4Net) -> bool {
    a.contains(&b.network()) || b.contains(&a.network())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocates_ascending_non_overlapping() {
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        let a = alloc.allocate(30).unwrap();
        let b = alloc.allocate(30).unwrap();
        assert_eq!(a, "19.0.0.0/30".parse().unwrap());
        assert_eq!(b, "19.0.0.4/30".parse().unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn avoids_marked_used() {
        let mut alloc = AddressAllocator::new("19.0.0.0/8".parse().unwrap());
        alloc.mark_used("19.0.0.0/30".parse().unwrap());
        let a = alloc.allocate(30).unwrap();
        assert_eq!(a, "19.0.0.4/30".parse().unwrap());
    }

    #[test]
    fn rejects_prefix_shorter_than_base() {
        let mut alloc = AddressAllocator::new("19.0.0.0/16".parse().unwrap());
        let err = alloc.allocate(8).unwrap_err();
        assert!(matches!(err, PlanError::AddressExhausted { .. }));
    }

    #[test]
    fn exhausts_when_base_is_full() {
        let mut alloc = AddressAllocator::new("19.0.0.0/31".parse().unwrap());
        alloc.allocate(31).unwrap();
        let err = alloc.allocate(31).unwrap_err();
        assert!(matches!(err, PlanError::AddressExhausted { .. }));
    }

    #[test]
    fn no_overlap_across_many_allocations() {
        let mut alloc = AddressAllocator::new("19.0.0.0/16".parse().unwrap());
        let mut nets = Vec::new();
        for _ in 0..20 {
            nets.push(alloc.allocate(24).unwrap());
        }
        for i in 0..nets.len() {
            for j in (i + 1)..nets.len() {
                assert!(!overlaps(&nets[i], &nets[j]));
            }
        }
    }
}
