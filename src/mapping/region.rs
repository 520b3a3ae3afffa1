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

/// The number of equal-width horizontal regions the frame is divided into.
pub const REGION_COUNT: usize = 12;

/// Quantizes a horizontal depth coordinate into a region index.
///
/// The coordinate is mirrored first (the capture device reports a mirrored
/// image), then floor-divided into `REGION_COUNT` equal bins: a coordinate
/// exactly on a bin boundary belongs to the higher bin. Coordinates at or
/// beyond the frame edges clamp to the outermost bins.
pub fn quantize(x: f32, frame_width: f32) -> usize {
    let mirrored = frame_width - x;
    if mirrored <= 0.0 {
        return 0;
    }

    let bin = (REGION_COUNT as f32 * mirrored / frame_width).floor() as usize;
    bin.min(REGION_COUNT - 1)
}

#[cfg(test)]
mod test {
    use super::*;

    const WIDTH: f32 = 640.0;

    /// Quantizes a mirrored coordinate directly, for readability: feeding
    /// `WIDTH - x'` through the mirror yields `x'`.
    fn region_of(mirrored: f32) -> usize {
        quantize(WIDTH - mirrored, WIDTH)
    }

    #[test]
    fn test_edges() {
        assert_eq!(0, region_of(0.0));
        assert_eq!(11, region_of(WIDTH - f32::EPSILON * WIDTH));
        // Out-of-frame coordinates clamp to the outermost bins.
        assert_eq!(0, region_of(-10.0));
        assert_eq!(11, region_of(WIDTH));
        assert_eq!(11, region_of(WIDTH + 50.0));
    }

    #[test]
    fn test_bin_boundaries() {
        let bin_width = WIDTH / REGION_COUNT as f32;
        for i in 1..REGION_COUNT {
            assert_eq!(
                i,
                region_of(i as f32 * bin_width + 0.5),
                "above boundary {}",
                i
            );
            assert_eq!(
                i - 1,
                region_of(i as f32 * bin_width - 0.5),
                "below boundary {}",
                i
            );
        }
    }

    #[test]
    fn test_monotonic() {
        let mut last = 0;
        let mut x = 0.0;
        while x < WIDTH {
            let region = region_of(x);
            assert!(region >= last, "region decreased at x' = {}", x);
            last = region;
            x += 0.25;
        }
        assert_eq!(11, last);
    }

    #[test]
    fn test_mirroring() {
        // A foot near the left edge of the raw image lands in the
        // rightmost region.
        assert_eq!(11, quantize(1.0, WIDTH));
        assert_eq!(0, quantize(WIDTH - 1.0, WIDTH));
    }
}
