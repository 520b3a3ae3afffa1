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
use parking_lot::Mutex;

use crate::skeleton::JointKind;

/// A joint position scaled to [-1, 1] display coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledJoint {
    pub x: f32,
    pub y: f32,
}

impl ScaledJoint {
    /// Scales depth-pixel coordinates into [-1, 1], flipping y so that up is
    /// positive.
    pub fn from_depth(x: f32, y: f32, frame_width: f32, frame_height: f32) -> ScaledJoint {
        ScaledJoint {
            x: x / frame_width * 2.0 - 1.0,
            y: 1.0 - y / frame_height * 2.0,
        }
    }
}

/// The scaled joint set a render consumer draws from. Joints the tracker has
/// not yet seen with sufficient confidence are unset.
#[derive(Clone, Debug, Default)]
pub struct ScaledSkeleton {
    joints: [Option<ScaledJoint>; 15],
    /// Whether a user should be drawn at all.
    pub draw_user: bool,
}

impl ScaledSkeleton {
    /// The scaled position of the given joint, if known.
    pub fn joint(&self, kind: JointKind) -> Option<ScaledJoint> {
        self.joints[kind.index()]
    }
}

struct Inner {
    skeleton: ScaledSkeleton,
    needs_render: bool,
}

/// The shared joint buffer between the tracking worker (writer) and render
/// consumers (readers). The lock is held for a whole frame's batch of joint
/// updates, so a reader never observes a mix of two frames' values.
pub struct SkeletonView {
    inner: Mutex<Inner>,
}

impl Default for SkeletonView {
    fn default() -> SkeletonView {
        SkeletonView::new()
    }
}

impl SkeletonView {
    /// Creates an empty view.
    pub fn new() -> SkeletonView {
        SkeletonView {
            inner: Mutex::new(Inner {
                skeleton: ScaledSkeleton::default(),
                needs_render: false,
            }),
        }
    }

    /// Applies one frame's batch of joint updates under a single lock
    /// acquisition.
    pub fn push_frame(&self, updates: &[(JointKind, ScaledJoint)]) {
        if updates.is_empty() {
            return;
        }

        let mut inner = self.inner.lock();
        for (kind, joint) in updates {
            inner.skeleton.joints[kind.index()] = Some(*joint);
        }
        inner.needs_render = true;
    }

    /// Marks the tracked user as drawable.
    pub fn mark_user_active(&self) {
        self.inner.lock().skeleton.draw_user = true;
    }

    /// Marks the tracked user as gone. The consumer needs one more render to
    /// clear it from the screen.
    pub fn mark_user_inactive(&self) {
        let mut inner = self.inner.lock();
        inner.skeleton.draw_user = false;
        inner.needs_render = true;
    }

    /// Whether new data has arrived since the last render. Consumers poll
    /// this and skip the frame when false rather than waiting.
    pub fn needs_render(&self) -> bool {
        self.inner.lock().needs_render
    }

    /// Returns the current scaled skeleton and clears the needs-render flag.
    pub fn snapshot(&self) -> ScaledSkeleton {
        let mut inner = self.inner.lock();
        inner.needs_render = false;
        inner.skeleton.clone()
    }
}
