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
use std::{
    error::Error,
    fmt, fs,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use parking_lot::Mutex;
use serde::Deserialize;

use crate::skeleton::{Joint, JointKind, Skeleton, SkeletonFrame, SkeletonState, UserData};

const DEFAULT_FRAME_RATE: f32 = 30.0;

/// A YAML representation of a frame recording.
#[derive(Deserialize)]
struct Recording {
    /// The depth frame width in pixels.
    width: f32,
    /// The depth frame height in pixels.
    height: f32,
    /// Playback rate in frames per second.
    frame_rate: Option<f32>,
    /// The recorded frames, replayed in a loop.
    frames: Vec<RecordedFrame>,
}

#[derive(Deserialize)]
struct RecordedFrame {
    users: Vec<RecordedUser>,
}

#[derive(Deserialize)]
struct RecordedUser {
    id: u64,
    #[serde(default)]
    new: bool,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    lost: bool,
    #[serde(default)]
    tracked: bool,
    #[serde(default)]
    joints: Vec<RecordedJoint>,
}

#[derive(Deserialize)]
struct RecordedJoint {
    kind: JointKind,
    position: [f32; 3],
    projected: [f32; 2],
    confidence: f32,
}

fn default_visible() -> bool {
    true
}

impl RecordedUser {
    fn to_user_data(&self) -> UserData {
        let mut skeleton = Skeleton::default();
        for joint in self.joints.iter() {
            skeleton.set_joint(
                joint.kind,
                Joint {
                    position: joint.position,
                    projected: joint.projected,
                    confidence: joint.confidence,
                },
            );
        }

        UserData {
            id: self.id,
            is_new: self.new,
            is_visible: self.visible,
            is_lost: self.lost,
            skeleton_state: if self.tracked {
                SkeletonState::Tracked
            } else {
                SkeletonState::None
            },
            skeleton,
        }
    }
}

/// A device that replays a recorded frame sequence in a loop at the
/// recording's frame rate.
pub struct Device {
    name: String,
    open: AtomicBool,
    frames: Vec<SkeletonFrame>,
    frame_interval: Duration,
    cursor: Mutex<usize>,
}

impl Device {
    /// Loads a recording from the given YAML file.
    pub fn load(path: &str) -> Result<Device, Box<dyn Error>> {
        let recording: Recording = serde_yml::from_str(&fs::read_to_string(path)?)?;
        if recording.frames.is_empty() {
            return Err(format!("recording {} contains no frames", path).into());
        }

        let frame_rate = recording.frame_rate.unwrap_or(DEFAULT_FRAME_RATE);
        if frame_rate <= 0.0 {
            return Err(format!("recording {} has a non-positive frame rate", path).into());
        }

        let frames = recording
            .frames
            .iter()
            .map(|frame| SkeletonFrame {
                width: recording.width,
                height: recording.height,
                users: frame.users.iter().map(RecordedUser::to_user_data).collect(),
            })
            .collect();

        Ok(Device {
            name: format!("replay:{}", path),
            open: AtomicBool::new(false),
            frames,
            frame_interval: Duration::from_secs_f32(1.0 / frame_rate),
            cursor: Mutex::new(0),
        })
    }
}

impl super::Device for Device {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(&self) -> Result<(), Box<dyn Error>> {
        self.open.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn close(&self) {
        self.open.store(false, Ordering::Relaxed);
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    fn poll_frame(&self) -> Result<SkeletonFrame, Box<dyn Error>> {
        if !self.is_open() {
            return Err("device is not open".into());
        }

        thread::sleep(self.frame_interval);

        let mut cursor = self.cursor.lock();
        let frame = self.frames[*cursor % self.frames.len()].clone();
        *cursor += 1;
        Ok(frame)
    }

    fn start_skeleton_tracking(&self, _user_id: u64) -> Result<(), Box<dyn Error>> {
        // Recordings already carry their tracking states.
        Ok(())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Replay)", self.name)
    }
}
