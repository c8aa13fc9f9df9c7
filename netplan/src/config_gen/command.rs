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

//! Command stream assembly (§9 design note, replacing source-observed
//! string concatenation): a device config is an ordered sequence of
//! [`Block`]s; [`format_stream`] is the single pass that inserts the
//! `exit`/`enable`/`conf t` transitions the CLI formatter contract (§6)
//! requires, instead of each configurator tracking mode by hand.

/// The submode a block's lines are entered into, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submode {
    /// `interface ...` / `interface range ...`.
    Interface,
    /// `vlan <id>`.
    Vlan,
    /// `ip dhcp pool ...`.
    DhcpPool,
    /// `line vty ...`.
    Line,
}

/// One contiguous run of command lines, optionally entered via a submode.
#[derive(Debug, Clone)]
pub struct Block {
    /// The submode these lines execute in, `None` for global-config lines.
    pub submode: Option<Submode>,
    /// The command lines of this block, including the entry line (e.g.
    /// `interface FastEthernet0/0`) when `submode` is set.
    pub lines: Vec<String>,
    /// Marks the terminal static-routes block: preceded by exactly one
    /// `exit`+`enable` (no `conf t`) rather than the submode transition.
    pub terminal_routes: bool,
}

impl Block {
    /// A plain, non-submode block of global configuration lines.
    pub fn global(lines: Vec<String>) -> Self {
        Self { submode: None, lines, terminal_routes: false }
    }

    /// A block entered via `submode`, e.g. an interface or VLAN stanza.
    pub fn submode(submode: Submode, lines: Vec<String>) -> Self {
        Self { submode: Some(submode), lines, terminal_routes: false }
    }

    /// The terminal `ip route` block.
    pub fn routes(lines: Vec<String>) -> Self {
        Self { submode: None, lines, terminal_routes: true }
    }
}

/// Assemble a device's full command stream: `<hostname>`, `enable`, `conf t`,
/// then every block in order, with transitions inserted per the formatter
/// contract, then collapse duplicate consecutive `exit`/`enable` lines.
pub fn format_stream(hostname: &str, blocks: &[Block]) -> Vec<String> {
    let mut lines = vec![hostname.to_string(), "enable".to_string(), "conf t".to_string()];
    let mut last_submode: Option<Submode> = None;
    let mut routes_seen = false;

    for block in blocks {
        if block.terminal_routes {
            if !routes_seen {
                lines.push("exit".to_string());
                lines.push("enable".to_string());
                routes_seen = true;
            }
            lines.extend(block.lines.iter().cloned());
            last_submode = None;
            continue;
        }

        if last_submode.is_some() && block.submode.is_some() {
            lines.push("exit".to_string());
            lines.push("enable".to_string());
            lines.push("conf t".to_string());
        } else if last_submode.is_some() && block.submode.is_none() {
            lines.push("exit".to_string());
        }

        lines.extend(block.lines.iter().cloned());
        last_submode = block.submode;
    }

    collapse_duplicate_transitions(lines)
}

/// Collapse adjacent duplicate `exit` or `enable` lines, per the formatter
/// contract's last rule.
fn collapse_duplicate_transitions(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if (line == "exit" || line == "enable") && out.last() == Some(&line) {
            continue;
        }
        out.push(line);
    }
    out
}
