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
    collections::VecDeque,
    error::Error,
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use parking_lot::Mutex;

use crate::skeleton::SkeletonFrame;

/// A mock device. Delivers scripted frames and records tracking requests.
#[derive(Clone)]
pub struct Device {
    name: String,
    open: Arc<AtomicBool>,
    frames: Arc<Mutex<VecDeque<SkeletonFrame>>>,
    tracked_users: Arc<Mutex<Vec<u64>>>,
}

impl Device {
    /// Gets the given mock device.
    pub fn get(name: &str) -> Device {
        Device {
            name: name.to_string(),
            open: Arc::new(AtomicBool::new(false)),
            frames: Arc::new(Mutex::new(VecDeque::new())),
            tracked_users: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[cfg(test)]
    /// Queues a frame for the next poll.
    pub fn push_frame(&self, frame: SkeletonFrame) {
        self.frames.lock().push_back(frame);
    }

    #[cfg(test)]
    /// The users the tracker asked the backend to begin tracking.
    pub fn tracked_users(&self) -> Vec<u64> {
        self.tracked_users.lock().clone()
    }

    #[cfg(test)]
    /// Whether all queued frames have been polled.
    pub fn drained(&self) -> bool {
        self.frames.lock().is_empty()
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

        match self.frames.lock().pop_front() {
            Some(frame) => Ok(frame),
            None => {
                // Keep the polling loop from spinning while the script
                // runs dry.
                thread::sleep(Duration::from_millis(1));
                Err("no frame available".into())
            }
        }
    }

    fn start_skeleton_tracking(&self, user_id: u64) -> Result<(), Box<dyn Error>> {
        self.tracked_users.lock().push(user_id);
        Ok(())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Mock)", self.name)
    }
}
