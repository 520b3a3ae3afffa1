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
use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

struct Inner {
    highlighted: HashSet<i32>,
    analog: HashMap<i32, f32>,
    needs_render: bool,
}

/// State backing the keyboard visualizer: which keys are sounding and the
/// latest continuous value applied to each. Written by the tracking worker,
/// read by a render consumer on its own schedule.
pub struct KeyboardView {
    inner: Mutex<Inner>,
}

impl Default for KeyboardView {
    fn default() -> KeyboardView {
        KeyboardView::new()
    }
}

impl KeyboardView {
    /// Creates an empty view.
    pub fn new() -> KeyboardView {
        KeyboardView {
            inner: Mutex::new(Inner {
                highlighted: HashSet::new(),
                analog: HashMap::new(),
                needs_render: false,
            }),
        }
    }

    /// Highlights or unhighlights the key for a note.
    pub fn set_highlighted_key(&self, note: i32, highlighted: bool) {
        let mut inner = self.inner.lock();
        if highlighted {
            inner.highlighted.insert(note);
        } else {
            inner.highlighted.remove(&note);
        }
        inner.needs_render = true;
    }

    /// Sets the analog value drawn over a key.
    pub fn set_analog_value(&self, note: i32, value: f32) {
        let mut inner = self.inner.lock();
        inner.analog.insert(note, value);
        inner.needs_render = true;
    }

    /// Clears all analog values.
    pub fn clear_analog_data(&self) {
        let mut inner = self.inner.lock();
        inner.analog.clear();
        inner.needs_render = true;
    }

    /// Clears all highlighted keys.
    pub fn clear_highlighted_keys(&self) {
        let mut inner = self.inner.lock();
        inner.highlighted.clear();
        inner.needs_render = true;
    }

    /// Whether the key for a note is highlighted.
    pub fn highlighted(&self, note: i32) -> bool {
        self.inner.lock().highlighted.contains(&note)
    }

    /// The analog value for a note, if one has been set.
    pub fn analog_value(&self, note: i32) -> Option<f32> {
        self.inner.lock().analog.get(&note).copied()
    }

    /// Whether new data has arrived since the last render.
    pub fn needs_render(&self) -> bool {
        self.inner.lock().needs_render
    }

    /// Clears the needs-render flag after a consumer has drawn.
    pub fn mark_rendered(&self) {
        self.inner.lock().needs_render = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_highlight_and_analog_values() {
        let view = KeyboardView::new();
        assert!(!view.highlighted(52));
        assert_eq!(None, view.analog_value(52));

        view.set_highlighted_key(52, true);
        view.set_analog_value(52, 0.8);
        assert!(view.highlighted(52));
        assert_eq!(Some(0.8), view.analog_value(52));

        view.set_highlighted_key(52, false);
        assert!(!view.highlighted(52));
    }

    #[test]
    fn test_clear() {
        let view = KeyboardView::new();
        view.set_highlighted_key(52, true);
        view.set_highlighted_key(55, true);
        view.set_analog_value(52, 1.0);

        view.clear_analog_data();
        view.clear_highlighted_keys();
        assert!(!view.highlighted(52));
        assert!(!view.highlighted(55));
        assert_eq!(None, view.analog_value(52));
    }

    #[test]
    fn test_needs_render() {
        let view = KeyboardView::new();
        assert!(!view.needs_render());

        view.set_analog_value(52, 0.5);
        assert!(view.needs_render());

        view.mark_rendered();
        assert!(!view.needs_render());
    }
}
