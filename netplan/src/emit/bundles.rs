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

//! Per-category device bundles: plain-text files concatenating device
//! configs of one kind, each preceded by a banner line bearing the device
//! name.

use crate::config_gen::DeviceConfig;
use crate::plan::Plan;
use crate::types::DeviceKind;

/// The four text bundles produced for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bundles {
    /// Routers only.
    pub routers: String,
    /// L3 core switches only.
    pub switch_cores: String,
    /// Plain L2 switches only.
    pub switches: String,
    /// Every configured device, in submission order.
    pub all: String,
}

/// Build the four bundles, in submission order within each.
pub fn build(plan: &Plan) -> Bundles {
    let mut out = Bundles::default();
    for config in &plan.configs {
        let kind = plan
            .topology
            .device(&config.device)
            .map(|d| d.kind())
            .expect("every configured device resolves in the topology");
        let section = render(config);
        match kind {
            DeviceKind::Router => out.routers.push_str(&section),
            DeviceKind::SwitchCore => out.switch_cores.push_str(&section),
            DeviceKind::Switch => out.switches.push_str(&section),
            DeviceKind::Host => {}
        }
        out.all.push_str(&section);
    }
    out
}

fn render(config: &DeviceConfig) -> String {
    let mut section = format!("! ==== {} ====\n", config.hostname);
    for line in &config.lines {
        section.push_str(line);
        section.push('\n');
    }
    section
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_plan_yields_banner_only_bundles() {
        let out = Bundles::default();
        assert_eq!(out.all, "");
        assert_eq!(out.routers, "");
    }

    #[test]
    fn render_ends_each_line_with_a_single_newline() {
        let config = DeviceConfig {
            device: crate::types::DeviceId("r1".into()),
            hostname: "R1".into(),
            lines: vec!["R1".into(), "enable".into()],
        };
        let rendered = render(&config);
        assert_eq!(rendered, "! ==== R1 ====\nR1\nenable\n");
    }
}
