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
use std::{error::Error, fs, path::Path};

use crate::{osc, tracker as trackerloop};

mod error;
mod tracker;

pub use error::ConfigError;
pub use tracker::Tracker;

/// Parses a tracker configuration from a YAML file.
pub fn load_tracker(path: &Path) -> Result<Tracker, ConfigError> {
    Ok(serde_yml::from_str(&fs::read_to_string(path)?)?)
}

/// Initializes a tracker from the given configuration: builds the sink,
/// opens the capture device, and installs the configured note map. Control
/// output starts enabled; tracking is not yet started.
pub fn init_tracker(config: &Tracker) -> Result<trackerloop::Tracker, Box<dyn Error>> {
    let sink = osc::get_sink(config.osc().host(), config.osc().port())?;
    let tracker = trackerloop::Tracker::new(sink, config.mapping().to_settings());

    tracker.open_device(config.capture_device())?;

    let note_map = config.note_map();
    tracker.set_note_map(
        note_map.scale(),
        note_map.tonality(),
        note_map.key(),
        note_map.octave(),
    )?;
    tracker.set_control_enabled(true);

    Ok(tracker)
}
