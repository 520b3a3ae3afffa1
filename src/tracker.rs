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
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use parking_lot::Mutex;
use tracing::{error, info, span, Level};

use crate::{
    capture,
    display::{KeyboardView, ScaledJoint, SkeletonView},
    mapping::{continuous, height, region, Foot, NoteMap, NoteMapError, TriggerState},
    osc,
    skeleton::{Joint, JointKind, Skeleton, SkeletonFrame, SkeletonState},
};

/// Sequencing errors for tracker operations. None change tracker state.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("no device is open")]
    NoDeviceOpen,
    #[error("already tracking")]
    AlreadyTracking,
    #[error("not currently tracking")]
    NotTracking,
}

/// The mapping constants the worker runs with. Fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct MappingSettings {
    /// Joints at or below this confidence are ignored.
    pub confidence_threshold: f32,
    /// Divisor converting hand spacing in capture units to intensity.
    pub hand_distance_normalizer: f32,
    /// Velocity for note-on messages.
    pub note_on_velocity: i32,
    /// Velocity for note-off messages.
    pub note_off_velocity: i32,
    /// Whether hand-distance intensity is clamped to [0, 1].
    pub clamp_intensity: bool,
}

impl Default for MappingSettings {
    fn default() -> MappingSettings {
        MappingSettings {
            confidence_threshold: 0.6,
            hand_distance_normalizer: 1800.0,
            note_on_velocity: 90,
            note_off_velocity: 0,
            clamp_intensity: false,
        }
    }
}

/// The tracking loop. Owns the capture device exclusively, runs at most one
/// worker thread, and is the sole emitter to the control message sink.
pub struct Tracker {
    device: Mutex<Option<Arc<dyn capture::Device>>>,
    sink: Arc<dyn osc::Sink>,
    skeleton_view: Arc<SkeletonView>,
    keyboard_view: Arc<KeyboardView>,
    note_map: Arc<Mutex<NoteMap>>,
    settings: MappingSettings,
    control_enabled: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Tracker {
    /// Creates a tracker emitting to the given sink. The note map starts at
    /// the instrument's default register (E pentatonic minor, octave 4)
    /// until configured otherwise.
    pub fn new(sink: Arc<dyn osc::Sink>, settings: MappingSettings) -> Tracker {
        let note_map = NoteMap::from_names("Pentatonic", "Minor", "E", 4)
            .expect("default note map names are valid");

        Tracker {
            device: Mutex::new(None),
            sink,
            skeleton_view: Arc::new(SkeletonView::new()),
            keyboard_view: Arc::new(KeyboardView::new()),
            note_map: Arc::new(Mutex::new(note_map)),
            settings,
            control_enabled: Arc::new(AtomicBool::new(false)),
            stop: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// The shared joint buffer render consumers read from.
    pub fn skeleton_view(&self) -> Arc<SkeletonView> {
        self.skeleton_view.clone()
    }

    /// The keyboard visualizer state.
    pub fn keyboard_view(&self) -> Arc<KeyboardView> {
        self.keyboard_view.clone()
    }

    /// Resolves and opens the named capture device. Rejected while tracking;
    /// any previously open device is closed first.
    pub fn open_device(&self, name: &str) -> Result<(), Box<dyn Error>> {
        self.attach_device(capture::get_device(name)?)
    }

    /// Opens and takes exclusive ownership of the given device.
    pub fn attach_device(&self, device: Arc<dyn capture::Device>) -> Result<(), Box<dyn Error>> {
        if self.is_tracking() {
            return Err(Box::new(TrackerError::AlreadyTracking));
        }

        device.open()?;
        info!(device = device.name(), "Capture device open.");

        let mut current = self.device.lock();
        if let Some(previous) = current.take() {
            previous.close();
        }
        *current = Some(device);
        Ok(())
    }

    /// Closes the capture device, if one is open. Rejected while tracking.
    pub fn close_device(&self) -> Result<(), TrackerError> {
        if self.is_tracking() {
            return Err(TrackerError::AlreadyTracking);
        }

        if let Some(device) = self.device.lock().take() {
            device.close();
        }
        Ok(())
    }

    /// Whether the worker thread is running.
    pub fn is_tracking(&self) -> bool {
        self.worker.lock().is_some()
    }

    /// Builds and atomically swaps in a new note map. On error the previous
    /// map stays in effect.
    pub fn set_note_map(
        &self,
        scale: &str,
        tonality: &str,
        key: &str,
        octave: i32,
    ) -> Result<(), NoteMapError> {
        let map = NoteMap::from_names(scale, tonality, key, octave)?;
        *self.note_map.lock() = map;
        Ok(())
    }

    /// The current note map.
    pub fn note_map(&self) -> NoteMap {
        *self.note_map.lock()
    }

    /// Enables or disables control message emission. Joint data still flows
    /// to the render views while disabled.
    pub fn set_control_enabled(&self, enabled: bool) {
        self.control_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Starts the worker thread. Fails if no device is open or a worker is
    /// already running.
    pub fn begin_tracking(&self) -> Result<(), TrackerError> {
        let device = match self.device.lock().as_ref() {
            Some(device) => device.clone(),
            None => return Err(TrackerError::NoDeviceOpen),
        };

        let mut worker = self.worker.lock();
        if worker.is_some() {
            return Err(TrackerError::AlreadyTracking);
        }

        self.stop.store(false, Ordering::Relaxed);
        let loop_state = Worker {
            device,
            sink: self.sink.clone(),
            skeleton_view: self.skeleton_view.clone(),
            keyboard_view: self.keyboard_view.clone(),
            note_map: self.note_map.clone(),
            settings: self.settings,
            control_enabled: self.control_enabled.clone(),
            stop: self.stop.clone(),
            trigger: TriggerState::new(),
            height_estimate: 0.0,
            user_in_frame: false,
        };
        *worker = Some(thread::spawn(move || loop_state.run()));
        Ok(())
    }

    /// Stops the worker thread. Emits the all-notes-off panic, sets the stop
    /// flag, and joins the worker before returning.
    pub fn stop_tracking(&self) -> Result<(), TrackerError> {
        let handle = match self.worker.lock().take() {
            Some(handle) => handle,
            None => return Err(TrackerError::NotTracking),
        };

        if let Err(e) = self.sink.send(&osc::Message::AllNotesOff) {
            error!(err = e.as_ref(), "Error sending all notes off.");
        }
        self.keyboard_view.clear_analog_data();
        self.keyboard_view.clear_highlighted_keys();

        self.stop.store(true, Ordering::Relaxed);
        if handle.join().is_err() {
            error!("Tracking worker panicked.");
        }
        Ok(())
    }
}

/// The per-worker state. The worker thread is the sole writer of trigger
/// state and the height estimate, and the sole sender to the sink.
struct Worker {
    device: Arc<dyn capture::Device>,
    sink: Arc<dyn osc::Sink>,
    skeleton_view: Arc<SkeletonView>,
    keyboard_view: Arc<KeyboardView>,
    note_map: Arc<Mutex<NoteMap>>,
    settings: MappingSettings,
    control_enabled: Arc<AtomicBool>,
    stop: Arc<AtomicBool>,
    trigger: TriggerState,
    /// Body-scale estimate; zero until a user is detected.
    height_estimate: f32,
    /// Tracks the visible/not-visible edge so the panic message is sent
    /// once per exit, not every absent frame.
    user_in_frame: bool,
}

impl Worker {
    fn run(mut self) {
        let span = span!(Level::INFO, "tracking loop");
        let _enter = span.enter();

        info!(device = self.device.name(), "Tracking started.");
        while !self.stop.load(Ordering::Relaxed) {
            let frame = match self.device.poll_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!(err = e.as_ref(), "Frame poll failed, retrying.");
                    continue;
                }
            };
            self.process_frame(&frame);
        }
        info!("Tracking ended.");
    }

    fn control_enabled(&self) -> bool {
        self.control_enabled.load(Ordering::Relaxed)
    }

    fn process_frame(&mut self, frame: &SkeletonFrame) {
        for user in frame.users.iter() {
            if user.is_lost {
                self.skeleton_view.mark_user_inactive();
                info!(user = user.id, "User lost.");
                if self.control_enabled() {
                    self.emit_panic();
                }
            }

            if !user.is_visible {
                self.skeleton_view.mark_user_inactive();
                if self.user_in_frame {
                    if self.control_enabled() {
                        self.emit_panic();
                    }
                    self.user_in_frame = false;
                }
            } else {
                self.skeleton_view.mark_user_active();
                self.user_in_frame = true;
            }

            if user.is_new {
                if let Err(e) = self.device.start_skeleton_tracking(user.id) {
                    error!(
                        user = user.id,
                        err = e.as_ref(),
                        "Error starting skeletal tracking."
                    );
                }
                self.skeleton_view.mark_user_active();
                self.height_estimate = height::estimate(&user.skeleton);
                self.user_in_frame = true;
                info!(
                    user = user.id,
                    height = self.height_estimate,
                    "New user."
                );
            } else if user.skeleton_state == SkeletonState::Tracked {
                self.track_skeleton(frame, &user.skeleton);
            }
        }
    }

    fn track_skeleton(&mut self, frame: &SkeletonFrame, skeleton: &Skeleton) {
        // One pass over the joint table: confidence gate, scale to display
        // coordinates, and push the whole batch under a single lock.
        let mut updates: Vec<(JointKind, ScaledJoint)> = Vec::with_capacity(JointKind::ALL.len());
        for kind in JointKind::ALL {
            let joint = skeleton.joint(kind);
            if joint.confidence > self.settings.confidence_threshold {
                updates.push((
                    kind,
                    ScaledJoint::from_depth(
                        joint.projected[0],
                        joint.projected[1],
                        frame.width,
                        frame.height,
                    ),
                ));
            }
        }
        self.skeleton_view.push_frame(&updates);

        if !self.control_enabled() {
            return;
        }

        let threshold = self.settings.confidence_threshold;
        let confident = |kind: JointKind| -> Option<&Joint> {
            let joint = skeleton.joint(kind);
            (joint.confidence > threshold).then_some(joint)
        };

        if let Some(foot) = confident(JointKind::LeftFoot) {
            self.track_foot(Foot::Left, foot.projected[0], frame.width);
        }
        if let Some(foot) = confident(JointKind::RightFoot) {
            self.track_foot(Foot::Right, foot.projected[0], frame.width);
        }

        // Hand spacing needs confident estimates for both hands.
        if let (Some(left), Some(right)) =
            (confident(JointKind::LeftHand), confident(JointKind::RightHand))
        {
            self.track_hands(left, right);
        }

        // The brightness mapping reads the right knee against the left
        // foot, matching the instrument's calibration.
        if let (Some(knee), Some(foot)) =
            (confident(JointKind::RightKnee), confident(JointKind::LeftFoot))
        {
            self.track_right_knee(knee, foot);
        }
    }

    fn track_foot(&mut self, foot: Foot, x: f32, frame_width: f32) {
        let quantized = region::quantize(x, frame_width);
        if let Some(trigger) = self.trigger.observe(foot, quantized) {
            let map = *self.note_map.lock();
            if let Some(released) = trigger.released {
                self.send_note(map.note(released), self.settings.note_off_velocity);
            }
            let note = map.note(trigger.pressed);
            self.send_note(note, self.settings.note_on_velocity);
            self.send_intensity(note, 1.0);
        }
    }

    fn track_hands(&mut self, left: &Joint, right: &Joint) {
        let value = continuous::hand_intensity(
            left,
            right,
            self.settings.hand_distance_normalizer,
            self.settings.clamp_intensity,
        );

        let map = *self.note_map.lock();
        for side in [Foot::Left, Foot::Right] {
            if let Some(occupied) = self.trigger.region(side) {
                self.send_intensity(map.note(occupied), value);
            }
        }
    }

    fn track_right_knee(&mut self, knee: &Joint, foot: &Joint) {
        let value = match continuous::knee_brightness(knee, foot, self.height_estimate) {
            Some(value) => value,
            // Uncalibrated height; skip this frame's brightness.
            None => return,
        };

        let map = *self.note_map.lock();
        for side in [Foot::Left, Foot::Right] {
            if let Some(occupied) = self.trigger.region(side) {
                self.send_brightness(map.note(occupied), value);
            }
        }
    }

    fn send_note(&self, note: i32, velocity: i32) {
        self.send(&osc::Message::Note { note, velocity });
        self.keyboard_view.set_highlighted_key(note, velocity != 0);
        if velocity == 0 {
            self.keyboard_view.set_analog_value(note, 0.0);
        }
    }

    fn send_intensity(&self, note: i32, value: f32) {
        self.send(&osc::Message::Intensity { note, value });
        self.keyboard_view.set_analog_value(note, value);
    }

    fn send_brightness(&self, note: i32, value: f32) {
        self.send(&osc::Message::Brightness { note, value });
    }

    fn emit_panic(&self) {
        self.send(&osc::Message::AllNotesOff);
        self.keyboard_view.clear_analog_data();
        self.keyboard_view.clear_highlighted_keys();
    }

    fn send(&self, message: &osc::Message) {
        if let Err(e) = self.sink.send(message) {
            error!(err = e.as_ref(), %message, "Error sending control message.");
        }
    }
}
