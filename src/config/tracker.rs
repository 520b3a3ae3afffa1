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

use crate::tracker::MappingSettings;

const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;
const DEFAULT_HAND_DISTANCE_NORMALIZER: f32 = 1800.0;
const DEFAULT_NOTE_ON_VELOCITY: i32 = 90;
const DEFAULT_NOTE_OFF_VELOCITY: i32 = 0;

/// A YAML representation of the tracker configuration.
#[derive(Deserialize, Clone)]
pub struct Tracker {
    /// The capture device to open, e.g. "replay:performance.yaml".
    capture_device: String,

    /// The OSC destination.
    osc: Osc,

    /// The note map to install.
    note_map: NoteMap,

    /// Mapping constants. Every field has a default.
    mapping: Option<Mapping>,
}

impl Tracker {
    /// The capture device name.
    pub fn capture_device(&self) -> &str {
        &self.capture_device
    }

    /// The OSC destination configuration.
    pub fn osc(&self) -> &Osc {
        &self.osc
    }

    /// The note map configuration.
    pub fn note_map(&self) -> &NoteMap {
        &self.note_map
    }

    /// The mapping constants.
    pub fn mapping(&self) -> Mapping {
        self.mapping.clone().unwrap_or_default()
    }
}

/// A YAML representation of the OSC destination.
#[derive(Deserialize, Clone)]
pub struct Osc {
    /// The destination host.
    host: String,

    /// The destination port.
    port: u16,
}

impl Osc {
    /// The destination host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The destination port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// A YAML representation of the note map configuration. Names are parsed
/// when the map is built, so unrecognized names surface there rather than
/// at deserialization.
#[derive(Deserialize, Clone)]
pub struct NoteMap {
    /// The scale kind: Diatonic, Pentatonic, or Chromatic.
    scale: String,

    /// The tonality: Major or Minor.
    tonality: String,

    /// The key name, sharp or flat spellings.
    key: String,

    /// The octave offset.
    octave: i32,
}

impl NoteMap {
    /// The scale name.
    pub fn scale(&self) -> &str {
        &self.scale
    }

    /// The tonality name.
    pub fn tonality(&self) -> &str {
        &self.tonality
    }

    /// The key name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The octave offset.
    pub fn octave(&self) -> i32 {
        self.octave
    }
}

/// A YAML representation of the mapping constants.
#[derive(Deserialize, Clone, Default)]
pub struct Mapping {
    /// Joints at or below this confidence are ignored.
    confidence_threshold: Option<f32>,

    /// Divisor converting hand spacing to intensity.
    hand_distance_normalizer: Option<f32>,

    /// Velocity for note-on messages.
    note_on_velocity: Option<i32>,

    /// Velocity for note-off messages.
    note_off_velocity: Option<i32>,

    /// Whether hand-distance intensity is clamped to [0, 1].
    clamp_intensity: Option<bool>,
}

impl Mapping {
    /// Resolves the configuration into runtime settings, applying defaults.
    pub fn to_settings(&self) -> MappingSettings {
        MappingSettings {
            confidence_threshold: self
                .confidence_threshold
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            hand_distance_normalizer: self
                .hand_distance_normalizer
                .unwrap_or(DEFAULT_HAND_DISTANCE_NORMALIZER),
            note_on_velocity: self.note_on_velocity.unwrap_or(DEFAULT_NOTE_ON_VELOCITY),
            note_off_velocity: self.note_off_velocity.unwrap_or(DEFAULT_NOTE_OFF_VELOCITY),
            clamp_intensity: self.clamp_intensity.unwrap_or(false),
        }
    }
}
