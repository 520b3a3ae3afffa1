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
use std::{error::Error, fmt, sync::Arc};

use crate::skeleton::SkeletonFrame;

mod mock;
mod replay;

/// A capture source that delivers skeleton frames.
pub trait Device: fmt::Display + Send + Sync {
    /// Returns the name of the device.
    fn name(&self) -> String;

    /// Opens the device. Must be called before polling.
    fn open(&self) -> Result<(), Box<dyn Error>>;

    /// Closes the device.
    fn close(&self);

    /// Whether the device is currently open.
    fn is_open(&self) -> bool;

    /// Blocks until the next skeleton frame is available and returns it.
    fn poll_frame(&self) -> Result<SkeletonFrame, Box<dyn Error>>;

    /// Asks the backend to begin skeletal tracking for the given user.
    fn start_skeleton_tracking(&self, user_id: u64) -> Result<(), Box<dyn Error>>;
}

/// Lists the capture devices this build can open. Physical sensor
/// enumeration belongs to a vendor backend; this build knows recordings
/// and mocks.
pub fn list_devices() -> Vec<String> {
    vec![
        "replay:<recording.yaml>".to_string(),
        "mock".to_string(),
    ]
}

/// Gets a device with the given name.
pub fn get_device(name: &str) -> Result<Arc<dyn Device>, Box<dyn Error>> {
    if name.starts_with("mock") {
        return Ok(Arc::new(mock::Device::get(name)));
    }

    if let Some(path) = name.strip_prefix("replay:") {
        return Ok(Arc::new(replay::Device::load(path)?));
    }

    Err(format!("unknown capture device '{}'", name).into())
}

#[cfg(test)]
pub mod test {
    pub use super::mock::Device;
}
