// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use crate::skeleton::{joint_distance, Joint};

/// Maps the spacing between the two hands to an intensity value by dividing
/// the world-space distance by the configured normalizer. The result is
/// unclamped unless `clamp` is set: the instrument's tuning accepts values
/// above 1.0, so clamping is opt-in configuration.
pub fn hand_intensity(left: &Joint, right: &Joint, normalizer: f32, clamp: bool) -> f32 {
    let value = joint_distance(left, right) / normalizer;
    if clamp {
        value.clamp(0.0, 1.0)
    } else {
        value
    }
}

/// Maps the knee-to-foot vertical offset, normalized by the estimated body
/// height, to a brightness value in [0, 1]. A raised knee darkens less:
/// the normalized offset is clamped and inverted. Returns `None` while the
/// height estimate is uncalibrated (zero or negative).
pub fn knee_brightness(knee: &Joint, foot: &Joint, height: f32) -> Option<f32> {
    if height <= 0.0 {
        return None;
    }

    let value = 3.0 * (knee.position[1] - foot.position[1]).abs() / height;
    Some(1.0 - value.clamp(0.0, 1.0))
}
