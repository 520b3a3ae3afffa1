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
use serde::Deserialize;

/// The skeletal landmarks reported by the capture backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    Head,
    Neck,
    Torso,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftHand,
    RightHand,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftFoot,
    RightFoot,
}

impl JointKind {
    /// All joint kinds, in storage order. Per-joint processing iterates this
    /// table rather than branching per joint.
    pub const ALL: [JointKind; 15] = [
        JointKind::Head,
        JointKind::Neck,
        JointKind::Torso,
        JointKind::LeftShoulder,
        JointKind::RightShoulder,
        JointKind::LeftElbow,
        JointKind::RightElbow,
        JointKind::LeftHand,
        JointKind::RightHand,
        JointKind::LeftHip,
        JointKind::RightHip,
        JointKind::LeftKnee,
        JointKind::RightKnee,
        JointKind::LeftFoot,
        JointKind::RightFoot,
    ];

    /// The joint's index into per-skeleton storage.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single estimated joint. The world position is in capture units
/// (millimetre scale) and is used for distance computations; the projected
/// coordinates are depth-pixel coordinates produced by the backend's
/// projection and are used for region quantization and display scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Joint {
    /// World-space position.
    pub position: [f32; 3],
    /// Depth-pixel coordinates.
    pub projected: [f32; 2],
    /// The backend's certainty in this estimate, in [0, 1].
    pub confidence: f32,
}

/// Euclidean distance between two joints' world positions.
pub fn joint_distance(a: &Joint, b: &Joint) -> f32 {
    let dx = a.position[0] - b.position[0];
    let dy = a.position[1] - b.position[1];
    let dz = a.position[2] - b.position[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// One user's full set of estimated joints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Skeleton {
    joints: [Joint; 15],
}

impl Skeleton {
    /// Creates a skeleton from per-joint data in `JointKind::ALL` order.
    pub fn new(joints: [Joint; 15]) -> Skeleton {
        Skeleton { joints }
    }

    /// The estimate for the given joint.
    pub fn joint(&self, kind: JointKind) -> &Joint {
        &self.joints[kind.index()]
    }

    /// Replaces the estimate for the given joint.
    pub fn set_joint(&mut self, kind: JointKind, joint: Joint) {
        self.joints[kind.index()] = joint;
    }
}

/// The backend's skeletal tracking state for one user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkeletonState {
    /// No skeleton is being tracked for this user.
    #[default]
    None,
    /// The backend is calibrating and has no usable joints yet.
    Calibrating,
    /// The skeleton is fully tracked.
    Tracked,
}

/// Per-user data within one frame. The lifecycle flags are independent, not
/// mutually exclusive: a newly detected user is typically also visible.
#[derive(Clone, Debug, Default)]
pub struct UserData {
    /// The backend's identifier for this user.
    pub id: u64,
    /// Whether this user was first detected on this frame.
    pub is_new: bool,
    /// Whether this user is currently visible in the frame.
    pub is_visible: bool,
    /// Whether the backend has given up tracking this user.
    pub is_lost: bool,
    /// The skeletal tracking state.
    pub skeleton_state: SkeletonState,
    /// The user's skeleton. Only meaningful when tracked.
    pub skeleton: Skeleton,
}

/// One polled frame: the depth frame's pixel dimensions plus every user the
/// backend reports. Immutable once read; superseded each poll.
#[derive(Clone, Debug, Default)]
pub struct SkeletonFrame {
    /// The depth frame width in pixels.
    pub width: f32,
    /// The depth frame height in pixels.
    pub height: f32,
    /// All users in the frame.
    pub users: Vec<UserData>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_joint_kind_indices_match_table_order() {
        for (i, kind) in JointKind::ALL.iter().enumerate() {
            assert_eq!(i, kind.index());
        }
    }

    #[test]
    fn test_joint_distance() {
        let a = Joint {
            position: [0.0, 0.0, 0.0],
            ..Joint::default()
        };
        let b = Joint {
            position: [3.0, 4.0, 0.0],
            ..Joint::default()
        };
        assert_eq!(5.0, joint_distance(&a, &b));
        assert_eq!(5.0, joint_distance(&b, &a));
        assert_eq!(0.0, joint_distance(&a, &a));
    }

    #[test]
    fn test_skeleton_joint_access() {
        let mut skeleton = Skeleton::default();
        let joint = Joint {
            position: [1.0, 2.0, 3.0],
            projected: [4.0, 5.0],
            confidence: 0.9,
        };
        skeleton.set_joint(JointKind::LeftFoot, joint);
        assert_eq!(&joint, skeleton.joint(JointKind::LeftFoot));
        assert_eq!(&Joint::default(), skeleton.joint(JointKind::RightFoot));
    }
}
