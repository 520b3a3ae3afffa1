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

use parking_lot::Mutex;

use super::Message;

/// A mock sink. Records every message instead of transmitting.
#[derive(Clone, Default)]
pub struct Sink {
    sent: Arc<Mutex<Vec<Message>>>,
}

impl Sink {
    /// Creates an empty mock sink.
    pub fn new() -> Sink {
        Sink::default()
    }

    #[cfg(test)]
    /// All messages sent so far, in order.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().clone()
    }

    #[cfg(test)]
    /// The number of sent messages matching the predicate.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Message) -> bool,
    {
        self.sent.lock().iter().filter(|m| predicate(m)).count()
    }
}

impl super::Sink for Sink {
    fn send(&self, message: &Message) -> Result<(), Box<dyn Error>> {
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock sink")
    }
}
