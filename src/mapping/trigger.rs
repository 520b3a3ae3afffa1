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

/// The two tracked limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Foot {
    Left,
    Right,
}

/// An accepted region transition: the region the foot left, if it had
/// claimed one, and the region it now occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// The foot's previous region, to be released with a note-off.
    pub released: Option<usize>,
    /// The newly claimed region, to be sounded with a note-on.
    pub pressed: usize,
}

/// A two-token occupancy set over the regions. Each foot claims at most one
/// region; a region claimed by either foot cannot be claimed again, and a
/// foot staying within its region produces nothing. Both slots start unset.
#[derive(Debug, Default)]
pub struct TriggerState {
    regions: [Option<usize>; 2],
}

impl TriggerState {
    /// Creates a trigger state with both feet unset.
    pub fn new() -> TriggerState {
        TriggerState::default()
    }

    /// Observes a quantized region for one foot. Returns the transition to
    /// emit, or `None` if the region is already claimed by either foot.
    pub fn observe(&mut self, foot: Foot, region: usize) -> Option<Trigger> {
        let (own, other) = match foot {
            Foot::Left => (0, 1),
            Foot::Right => (1, 0),
        };

        if self.regions[own] == Some(region) || self.regions[other] == Some(region) {
            return None;
        }

        let released = self.regions[own].replace(region);
        Some(Trigger {
            released,
            pressed: region,
        })
    }

    /// The region currently occupied by the given foot.
    pub fn region(&self, foot: Foot) -> Option<usize> {
        match foot {
            Foot::Left => self.regions[0],
            Foot::Right => self.regions[1],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_first_claim_emits_no_release() {
        let mut state = TriggerState::new();
        assert_eq!(
            Some(Trigger {
                released: None,
                pressed: 3
            }),
            state.observe(Foot::Left, 3)
        );
        assert_eq!(Some(3), state.region(Foot::Left));
        assert_eq!(None, state.region(Foot::Right));
    }

    #[test]
    fn test_staying_in_region_is_silent() {
        let mut state = TriggerState::new();
        state.observe(Foot::Left, 3);
        assert_eq!(None, state.observe(Foot::Left, 3));
        assert_eq!(None, state.observe(Foot::Left, 3));
    }

    #[test]
    fn test_region_collision_is_rejected() {
        let mut state = TriggerState::new();
        state.observe(Foot::Left, 3);
        // The right foot cannot claim the left foot's region.
        assert_eq!(None, state.observe(Foot::Right, 3));
        assert_eq!(None, state.region(Foot::Right));
        assert_eq!(Some(3), state.region(Foot::Left));
    }

    #[test]
    fn test_moving_releases_previous_region() {
        let mut state = TriggerState::new();
        state.observe(Foot::Right, 5);
        assert_eq!(
            Some(Trigger {
                released: Some(5),
                pressed: 8
            }),
            state.observe(Foot::Right, 8)
        );
        // The vacated region is claimable again.
        assert_eq!(
            Some(Trigger {
                released: None,
                pressed: 5
            }),
            state.observe(Foot::Left, 5)
        );
    }

    #[test]
    fn test_scripted_sequence() {
        // [L:3, R:5, L:5 (collision), R:3 (collision), L:7] must leave
        // {L:7, R:5} having accepted exactly three transitions with one
        // release (region 3, when the left foot moves to 7).
        let mut state = TriggerState::new();
        let script = [
            (Foot::Left, 3),
            (Foot::Right, 5),
            (Foot::Left, 5),
            (Foot::Right, 3),
            (Foot::Left, 7),
        ];

        let emitted: Vec<Trigger> = script
            .into_iter()
            .filter_map(|(foot, region)| state.observe(foot, region))
            .collect();

        assert_eq!(
            vec![
                Trigger {
                    released: None,
                    pressed: 3
                },
                Trigger {
                    released: None,
                    pressed: 5
                },
                Trigger {
                    released: Some(3),
                    pressed: 7
                },
            ],
            emitted
        );
        assert_eq!(Some(7), state.region(Foot::Left));
        assert_eq!(Some(5), state.region(Foot::Right));
    }

    #[test]
    fn test_feet_never_share_a_region() {
        let mut state = TriggerState::new();
        for (foot, region) in [
            (Foot::Left, 0),
            (Foot::Right, 0),
            (Foot::Right, 1),
            (Foot::Left, 1),
            (Foot::Left, 2),
            (Foot::Right, 2),
        ] {
            state.observe(foot, region);
            let (l, r) = (state.region(Foot::Left), state.region(Foot::Right));
            if l.is_some() {
                assert_ne!(l, r);
            }
        }
    }
}
