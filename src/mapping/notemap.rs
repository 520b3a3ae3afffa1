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
use std::str::FromStr;

use super::region::REGION_COUNT;

/// Scale intervals above the base note. The base note itself is region 0, so
/// each table carries the eleven remaining degrees.
const DIATONIC_MAJOR: [i32; 11] = [2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19];
const DIATONIC_MINOR: [i32; 11] = [2, 3, 5, 7, 8, 10, 12, 14, 15, 17, 19];
const PENTATONIC_MAJOR: [i32; 11] = [2, 4, 7, 9, 12, 14, 16, 19, 21, 24, 26];
const PENTATONIC_MINOR: [i32; 11] = [3, 5, 7, 10, 12, 15, 17, 19, 22, 24, 27];
const CHROMATIC: [i32; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Errors raised while building a note map from configuration strings. The
/// previously built map stays in effect when these occur.
#[derive(Debug, thiserror::Error)]
pub enum NoteMapError {
    #[error("unrecognized scale \"{0}\"")]
    UnknownScale(String),
    #[error("unrecognized tonality \"{0}\"")]
    UnknownTonality(String),
    #[error("unrecognized key \"{0}\"")]
    UnknownKey(String),
}

/// The supported scale kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Diatonic,
    Pentatonic,
    Chromatic,
}

impl FromStr for Scale {
    type Err = NoteMapError;

    fn from_str(s: &str) -> Result<Scale, NoteMapError> {
        match s.to_lowercase().as_str() {
            "diatonic" => Ok(Scale::Diatonic),
            "pentatonic" => Ok(Scale::Pentatonic),
            "chromatic" => Ok(Scale::Chromatic),
            _ => Err(NoteMapError::UnknownScale(s.to_string())),
        }
    }
}

/// The supported tonalities. Ignored for the chromatic scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tonality {
    Major,
    Minor,
}

impl FromStr for Tonality {
    type Err = NoteMapError;

    fn from_str(s: &str) -> Result<Tonality, NoteMapError> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Tonality::Major),
            "minor" => Ok(Tonality::Minor),
            _ => Err(NoteMapError::UnknownTonality(s.to_string())),
        }
    }
}

/// A key name resolved to its chromatic pitch class (C = 0 through B = 11).
/// Accepts sharp and flat spellings case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pitch_class: i32,
}

impl Key {
    /// The key's chromatic pitch class.
    pub fn pitch_class(&self) -> i32 {
        self.pitch_class
    }
}

impl FromStr for Key {
    type Err = NoteMapError;

    fn from_str(s: &str) -> Result<Key, NoteMapError> {
        let pitch_class = match s.to_lowercase().as_str() {
            "c" => 0,
            "c#" | "db" => 1,
            "d" => 2,
            "d#" | "eb" => 3,
            "e" => 4,
            "f" => 5,
            "f#" | "gb" => 6,
            "g" => 7,
            "g#" | "ab" => 8,
            "a" => 9,
            "a#" | "bb" => 10,
            "b" => 11,
            _ => return Err(NoteMapError::UnknownKey(s.to_string())),
        };
        Ok(Key { pitch_class })
    }
}

/// The table translating a region index into an absolute note number. Built
/// whole from a scale configuration and replaced atomically; read-only while
/// tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteMap {
    notes: [i32; REGION_COUNT],
}

impl NoteMap {
    /// Builds the note map for the given scale configuration. Region 0 is
    /// the base note; regions 1 through 11 follow the scale's interval
    /// table.
    pub fn build(scale: Scale, tonality: Tonality, key: Key, octave: i32) -> NoteMap {
        let intervals = match (scale, tonality) {
            (Scale::Diatonic, Tonality::Major) => DIATONIC_MAJOR,
            (Scale::Diatonic, Tonality::Minor) => DIATONIC_MINOR,
            (Scale::Pentatonic, Tonality::Major) => PENTATONIC_MAJOR,
            (Scale::Pentatonic, Tonality::Minor) => PENTATONIC_MINOR,
            (Scale::Chromatic, _) => CHROMATIC,
        };

        let base = key.pitch_class() + octave * 12;
        let mut notes = [base; REGION_COUNT];
        for (note, interval) in notes.iter_mut().skip(1).zip(intervals) {
            *note = base + interval;
        }

        NoteMap { notes }
    }

    /// Parses the configuration strings and builds the note map. Any
    /// unrecognized name is rejected without producing a partial map.
    pub fn from_names(
        scale: &str,
        tonality: &str,
        key: &str,
        octave: i32,
    ) -> Result<NoteMap, NoteMapError> {
        Ok(NoteMap::build(
            scale.parse()?,
            tonality.parse()?,
            key.parse()?,
            octave,
        ))
    }

    /// The note number for the given region.
    pub fn note(&self, region: usize) -> i32 {
        self.notes[region]
    }

    /// All twelve note numbers, indexed by region.
    pub fn notes(&self) -> &[i32; REGION_COUNT] {
        &self.notes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_diatonic_major_c() -> Result<(), NoteMapError> {
        let map = NoteMap::from_names("Diatonic", "Major", "C", 0)?;
        assert_eq!(
            &[0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19],
            map.notes()
        );
        Ok(())
    }

    #[test]
    fn test_all_interval_tables() -> Result<(), NoteMapError> {
        // Base of 0 exposes the raw interval tables.
        let cases: [(&str, &str, [i32; 12]); 5] = [
            (
                "Diatonic",
                "Major",
                [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19],
            ),
            (
                "Diatonic",
                "Minor",
                [0, 2, 3, 5, 7, 8, 10, 12, 14, 15, 17, 19],
            ),
            (
                "Pentatonic",
                "Major",
                [0, 2, 4, 7, 9, 12, 14, 16, 19, 21, 24, 26],
            ),
            (
                "Pentatonic",
                "Minor",
                [0, 3, 5, 7, 10, 12, 15, 17, 19, 22, 24, 27],
            ),
            ("Chromatic", "Major", [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]),
        ];

        for (scale, tonality, expected) in cases {
            let map = NoteMap::from_names(scale, tonality, "C", 0)?;
            assert_eq!(&expected, map.notes(), "{} {}", scale, tonality);
        }
        Ok(())
    }

    #[test]
    fn test_chromatic_ignores_tonality() -> Result<(), NoteMapError> {
        assert_eq!(
            NoteMap::from_names("Chromatic", "Major", "C", 0)?,
            NoteMap::from_names("Chromatic", "Minor", "C", 0)?,
        );
        Ok(())
    }

    #[test]
    fn test_key_and_octave_offsets() -> Result<(), NoteMapError> {
        // E in octave 4 under pentatonic minor is the instrument's default
        // register: base 4 + 48 = 52.
        let map = NoteMap::from_names("Pentatonic", "Minor", "E", 4)?;
        assert_eq!(
            &[52, 55, 57, 59, 62, 64, 67, 69, 71, 74, 76, 79],
            map.notes()
        );

        // Negative octaves shift below the pitch class.
        let map = NoteMap::from_names("Chromatic", "Major", "D", -1)?;
        assert_eq!(2 - 12, map.note(0));
        Ok(())
    }

    #[test]
    fn test_enharmonic_and_case_insensitive_keys() -> Result<(), NoteMapError> {
        assert_eq!(
            NoteMap::from_names("Diatonic", "Major", "C#", 0)?,
            NoteMap::from_names("diatonic", "MAJOR", "db", 0)?,
        );
        assert_eq!(
            NoteMap::from_names("Pentatonic", "Minor", "Bb", 2)?,
            NoteMap::from_names("Pentatonic", "minor", "a#", 2)?,
        );
        Ok(())
    }

    #[test]
    fn test_unrecognized_names_are_rejected() {
        assert!(matches!(
            NoteMap::from_names("Dorian", "Major", "C", 0),
            Err(NoteMapError::UnknownScale(_))
        ));
        assert!(matches!(
            NoteMap::from_names("Diatonic", "Mixolydian", "C", 0),
            Err(NoteMapError::UnknownTonality(_))
        ));
        assert!(matches!(
            NoteMap::from_names("Diatonic", "Major", "H", 0),
            Err(NoteMapError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_rebuild_is_deterministic() -> Result<(), NoteMapError> {
        let first = NoteMap::from_names("Pentatonic", "Minor", "Eb", 3)?;
        let second = NoteMap::from_names("Pentatonic", "Minor", "Eb", 3)?;
        assert_eq!(first, second);
        Ok(())
    }
}
