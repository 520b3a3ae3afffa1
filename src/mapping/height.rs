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
use crate::skeleton::{joint_distance, JointKind, Skeleton};

/// Estimates body scale as the sum of adjacent-joint distances along the
/// head-to-right-foot chain. The torso-to-right-hip segment is counted
/// twice: the brightness mapping was tuned against the doubled value, so it
/// is kept as-is.
pub fn estimate(skeleton: &Skeleton) -> f32 {
    let segments = [
        (JointKind::Head, JointKind::Neck),
        (JointKind::Neck, JointKind::Torso),
        (JointKind::Torso, JointKind::RightHip),
        (JointKind::Torso, JointKind::RightHip),
        (JointKind::RightHip, JointKind::RightKnee),
        (JointKind::RightKnee, JointKind::RightFoot),
    ];

    segments
        .iter()
        .map(|(a, b)| joint_distance(skeleton.joint(*a), skeleton.joint(*b)))
        .sum()
}

#[cfg(test)]
mod test {
    use crate::skeleton::Joint;

    use super::*;

    /// A skeleton standing on the y axis with 100-unit segments along the
    /// measured chain.
    fn upright_skeleton() -> Skeleton {
        let mut skeleton = Skeleton::default();
        let chain = [
            (JointKind::Head, 500.0),
            (JointKind::Neck, 400.0),
            (JointKind::Torso, 300.0),
            (JointKind::RightHip, 200.0),
            (JointKind::RightKnee, 100.0),
            (JointKind::RightFoot, 0.0),
        ];
        for (kind, y) in chain {
            skeleton.set_joint(
                kind,
                Joint {
                    position: [0.0, y, 0.0],
                    ..Joint::default()
                },
            );
        }
        skeleton
    }

    #[test]
    fn test_estimate_doubles_torso_hip_segment() {
        // Five 100-unit segments plus the duplicated torso-hip term.
        assert_eq!(600.0, estimate(&upright_skeleton()));
    }

    #[test]
    fn test_estimate_ignores_unrelated_joints() {
        let mut skeleton = upright_skeleton();
        skeleton.set_joint(
            JointKind::LeftHand,
            Joint {
                position: [9000.0, 9000.0, 9000.0],
                ..Joint::default()
            },
        );
        assert_eq!(600.0, estimate(&skeleton));
    }
}
