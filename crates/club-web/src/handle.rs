use crate::frame::SharedSession;
use club_core::{ControllerEvent, CONTROLLER_SLOTS};
use glam::{Mat4, Vec3};
use wasm_bindgen::prelude::*;

/// JavaScript-facing handle to the running club. XR input glue feeds
/// controller events and poses through it; tooling can read state back.
#[wasm_bindgen]
pub struct ClubHandle {
    session: SharedSession,
}

impl ClubHandle {
    pub(crate) fn new(session: SharedSession) -> Self {
        Self { session }
    }

    fn event(&self, slot: usize, event: ControllerEvent) -> Option<Vec3> {
        self.session.borrow_mut().controller_event(slot, event)
    }
}

#[wasm_bindgen]
impl ClubHandle {
    /// Start (or retry) audio. Call from a user gesture.
    pub fn start_audio(&self) {
        self.session.borrow_mut().start_audio();
    }

    pub fn stop_audio(&self) {
        self.session.borrow_mut().stop_audio();
    }

    pub fn is_playing(&self) -> bool {
        self.session.borrow().audio.is_playing()
    }

    /// The stream element has buffered enough to start playing.
    pub fn stream_ready(&self) -> bool {
        self.session.borrow().audio.stream().is_stream_ready()
    }

    /// Last audio error, if any, as display text.
    pub fn last_error(&self) -> Option<String> {
        self.session
            .borrow()
            .audio
            .last_error()
            .map(ToString::to_string)
    }

    /// Audio level applied on the latest frame, in [0, 1].
    pub fn audio_level(&self) -> f32 {
        self.session.borrow().effects.signals().audio_level
    }

    pub fn controller_slots(&self) -> usize {
        CONTROLLER_SLOTS
    }

    pub fn controller_connected(&self, slot: usize) {
        self.event(slot, ControllerEvent::Connected);
    }

    pub fn controller_disconnected(&self, slot: usize) {
        self.event(slot, ControllerEvent::Disconnected);
    }

    pub fn select_start(&self, slot: usize) {
        self.event(slot, ControllerEvent::SelectStart);
    }

    /// Returns the new rig position `[x, y, z]` when the release teleported.
    pub fn select_end(&self, slot: usize) -> Option<Vec<f32>> {
        self.event(slot, ControllerEvent::SelectEnd)
            .map(|p| p.to_array().to_vec())
    }

    /// Controller pose in tracking space (relative to the rig) as 16
    /// column-major floats.
    pub fn set_controller_pose(&self, slot: usize, matrix: &[f32]) -> Result<(), JsValue> {
        let cols: &[f32; 16] = matrix
            .try_into()
            .map_err(|_| JsValue::from_str("pose must have 16 elements"))?;
        self.session
            .borrow_mut()
            .set_controller_tracked_pose(slot, Mat4::from_cols_array(cols));
        Ok(())
    }

    pub fn marker_position(&self) -> Option<Vec<f32>> {
        self.session
            .borrow()
            .locomotion
            .marker()
            .position()
            .map(|p| p.to_array().to_vec())
    }

    pub fn rig_position(&self) -> Vec<f32> {
        self.session
            .borrow()
            .locomotion
            .rig()
            .position
            .to_array()
            .to_vec()
    }

    pub fn surface_lost(&self) {
        self.session.borrow_mut().on_surface_lost();
    }

    pub fn surface_restored(&self) {
        self.session.borrow_mut().on_surface_restored();
    }

    pub fn is_suspended(&self) -> bool {
        self.session.borrow().is_suspended()
    }

    pub fn frames(&self) -> f64 {
        self.session.borrow().frames() as f64
    }
}
