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

//! Thin command-line front end for [`netplan`]: reads a topology document
//! from disk, runs the generation pipeline, and writes the resulting
//! artifacts to an output directory. Carries no pipeline logic of its own —
//! parsing the request payload and serving it over HTTP are the
//! collaborator layer's job (`spec.md` §1); this binary exists only to make
//! the library runnable end-to-end from a terminal.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use netplan::{GenerationConfig, PlanError};
use serde_json::json;

/// Generate Cisco IOS configuration, an IP allocation report, and a
/// simulator driver script from a network topology document.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the topology JSON document (§6 input payload).
    input: PathBuf,
    /// Directory the output artifacts are written into. Created if missing.
    #[arg(long, short, default_value = "out")]
    output: PathBuf,
    /// Scale factor for the Coordinate Remapper (§4.7).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

fn main() {
    pretty_env_logger::init_timed();

    let args = Cli::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(&args.input)?;
    let input: netplan::TopologyInput = serde_json::from_str(&raw)?;

    let config = GenerationConfig { coordinate_scale: args.scale };
    let (plan, artifacts) = netplan::generate(&input, &config).map_err(format_plan_error)?;

    fs::create_dir_all(&args.output)?;
    fs::write(args.output.join("routers.txt"), &artifacts.bundles.routers)?;
    fs::write(args.output.join("switch_cores.txt"), &artifacts.bundles.switch_cores)?;
    fs::write(args.output.join("switches.txt"), &artifacts.bundles.switches)?;
    fs::write(args.output.join("all.txt"), &artifacts.bundles.all)?;
    fs::write(args.output.join("report.txt"), &artifacts.report)?;
    fs::write(args.output.join("driver.js"), &artifacts.driver_script)?;
    fs::write(args.output.join("plan.json"), serde_json::to_string_pretty(&plan_summary(&plan))?)?;

    info!(
        "generated configuration for {} device(s) into {}",
        plan.configs.len(),
        args.output.display()
    );
    Ok(())
}

/// Wrap a [`PlanError`] so its `Display` form carries the category it came
/// from, matching §7's "surfaced with a single categorized error".
fn format_plan_error(err: PlanError) -> Box<dyn std::error::Error> {
    Box::<dyn std::error::Error>::from(err.to_string())
}

/// A machine-readable summary of the plan's address allocations, additive
/// to the three required artifacts (SPEC_FULL "Data Model Serialization").
/// Built from the public plan accessors rather than by deriving
/// `Serialize` on [`netplan::Plan`] itself, which owns the full topology
/// graph and is not meant to round-trip.
fn plan_summary(plan: &netplan::Plan) -> serde_json::Value {
    let backbones: Vec<_> = plan
        .link_plan
        .all()
        .map(|b| {
            json!({
                "network": b.network.to_string(),
                "primary": { "device": b.primary.device.0, "address": b.primary.address.to_string() },
                "secondary": { "device": b.secondary.device.0, "address": b.secondary.address.to_string() },
            })
        })
        .collect();

    let vlans: Vec<_> = plan
        .vlan_plan
        .all()
        .map(|v| {
            json!({
                "vlan": v.vlan.0,
                "network": v.network.to_string(),
                "gateway": v.gateway.to_string(),
                "dhcp_excluded_start": v.dhcp_excluded_start.to_string(),
                "dhcp_excluded_end": v.dhcp_excluded_end.to_string(),
            })
        })
        .collect();

    let devices: Vec<_> = plan
        .configs
        .iter()
        .map(|c| json!({ "device": c.device.0, "hostname": c.hostname }))
        .collect();

    json!({
        "mode": match plan.mode {
            netplan::types::Mode::Digital => "digital",
            netplan::types::Mode::Physical => "physical",
        },
        "backbones": backbones,
        "vlans": vlans,
        "devices": devices,
    })
}
