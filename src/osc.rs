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

use rosc::{OscMessage, OscPacket, OscType};

#[cfg(test)]
mod mock;
mod udp;

/// The note-on status marker expected by the receiving instrument as the
/// first argument of note messages. Note-offs are note-ons with velocity 0.
const NOTE_ON_STATUS: i32 = 144;

/// A control message understood by the receiving instrument.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Sounds or releases a note. Velocity 0 releases.
    Note { note: i32, velocity: i32 },
    /// Sets the intensity quality of a sounding note.
    Intensity { note: i32, value: f32 },
    /// Sets the brightness quality of a sounding note.
    Brightness { note: i32, value: f32 },
    /// Force-clears all sustained notes.
    AllNotesOff,
}

impl Message {
    /// The message's OSC address.
    pub fn path(&self) -> &'static str {
        match self {
            Message::Note { .. } => "/control/note",
            Message::Intensity { .. } => "/control/quality/intensity",
            Message::Brightness { .. } => "/control/quality/brightness",
            Message::AllNotesOff => "/control/allnotesoff",
        }
    }

    /// Encodes the message as an OSC packet.
    pub fn to_packet(&self) -> OscPacket {
        let args = match *self {
            Message::Note { note, velocity } => vec![
                OscType::Int(NOTE_ON_STATUS),
                OscType::Int(note),
                OscType::Int(velocity),
            ],
            Message::Intensity { note, value } => {
                vec![OscType::Int(0), OscType::Int(note), OscType::Float(value)]
            }
            Message::Brightness { note, value } => {
                vec![OscType::Int(0), OscType::Int(note), OscType::Float(value)]
            }
            Message::AllNotesOff => vec![],
        };

        OscPacket::Message(OscMessage {
            addr: self.path().to_string(),
            args,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Message::Note { note, velocity } => {
                write!(f, "{} {} {} {}", self.path(), NOTE_ON_STATUS, note, velocity)
            }
            Message::Intensity { note, value } | Message::Brightness { note, value } => {
                write!(f, "{} 0 {} {}", self.path(), note, value)
            }
            Message::AllNotesOff => write!(f, "{}", self.path()),
        }
    }
}

/// A transport that delivers control messages to the instrument.
pub trait Sink: fmt::Display + Send + Sync {
    /// Sends one control message.
    fn send(&self, message: &Message) -> Result<(), Box<dyn Error>>;
}

/// Gets a UDP sink for the given destination.
pub fn get_sink(host: &str, port: u16) -> Result<Arc<dyn Sink>, Box<dyn Error>> {
    Ok(Arc::new(udp::Sink::connect(host, port)?))
}
