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

//! Coordinate Remapper (§4.7): translates canvas positions into the
//! simulator's coordinate space, centered on the submitted bounding box and
//! clamped to the simulator's valid range.

/// Target center of the simulator's coordinate space.
pub const TARGET_CX: f64 = 2000.0;
pub const TARGET_CY: f64 = 2000.0;

/// Simulator-valid coordinate bounds.
const X_MIN: f64 = -7500.0;
const X_MAX: f64 = 11500.0;
const Y_MIN: f64 = -1600.0;
const Y_MAX: f64 = 5600.0;

/// Remap a set of canvas positions into simulator space, in the same order
/// they were supplied, at the given `scale` (1.0 preserves relative
/// distances; the mapping is otherwise a pure translation).
pub fn remap(points: &[(f64, f64)], scale: f64) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }

    let min_x = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let centroid_x = (min_x + max_x) / 2.0;
    let centroid_y = (min_y + max_y) / 2.0;

    points
        .iter()
        .map(|(x, y)| {
            let mapped_x = (x - centroid_x) * scale + TARGET_CX;
            let mapped_y = (y - centroid_y) * scale + TARGET_CY;
            (mapped_x.clamp(X_MIN, X_MAX), mapped_y.clamp(Y_MIN, Y_MAX))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(remap(&[], 1.0).is_empty());
    }

    #[test]
    fn single_point_maps_to_target_center() {
        let out = remap(&[(10.0, 20.0)], 1.0);
        assert_eq!(out, vec![(TARGET_CX, TARGET_CY)]);
    }

    #[test]
    fn centroid_translation_preserves_relative_distance_at_scale_one() {
        let out = remap(&[(0.0, 0.0), (100.0, 0.0)], 1.0);
        assert_eq!(out[1].0 - out[0].0, 100.0);
        assert_eq!(out[0].1, out[1].1);
    }

    #[test]
    fn scale_factor_is_applied_around_centroid() {
        let out = remap(&[(0.0, 0.0), (100.0, 0.0)], 2.0);
        assert_eq!(out[1].0 - out[0].0, 200.0);
    }

    #[test]
    fn clamps_to_simulator_bounds() {
        let out = remap(&[(0.0, 0.0), (1_000_000.0, 0.0)], 1.0);
        assert!(out.iter().all(|(x, _)| *x <= X_MAX && *x >= X_MIN));
    }
}
