use crate::scene::view_state::ViewState;
use crate::ui::trackball::{PointerInput, Trackball, TrackballEvent};
use log::{debug, info};
use nalgebra::Vector3;

/// Minimum time between two accepted mode toggles, in seconds.
pub const TOGGLE_DEBOUNCE_SECS: f64 = 0.2;

/// Keyboard state for one frame. Movement keys are "held", the toggles are
/// "pressed this frame".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// W, toward the viewer.
    pub forward: bool,
    /// S, away from the viewer.
    pub backward: bool,
    pub toggle_mode: bool,
    pub toggle_help: bool,
    pub quit: bool,
}

impl KeyState {
    /// Sum of the held movement keys; opposite keys cancel out.
    pub fn movement(&self) -> Vector3<f32> {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vector3::new(
            axis(self.left, self.right),
            axis(self.down, self.up),
            axis(self.backward, self.forward),
        )
    }
}

/// Everything the controls read in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub pointer: PointerInput,
    /// Wheel notches, positive grows the model.
    pub scroll_notches: f32,
    pub keys: KeyState,
    /// Seconds since the application started.
    pub time: f64,
}

/// Accepts an event at most once every `threshold` seconds.
#[derive(Debug, Clone)]
pub struct Debounce {
    threshold: f64,
    last: Option<f64>,
}

impl Debounce {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    pub fn accept(&mut self, now: f64) -> bool {
        if self.last.is_none_or(|last| now - last >= self.threshold) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }
}

/// What [`Controls::apply`] changed outside the view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlOutcome {
    pub quit: bool,
    pub trackball: TrackballEvent,
}

/// Keyboard, wheel and trackball handling on top of [`ViewState`].
#[derive(Debug, Clone)]
pub struct Controls {
    pub trackball: Trackball,
    mode_debounce: Debounce,
    pub show_help: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub fn new() -> Self {
        Self {
            trackball: Trackball::new(),
            mode_debounce: Debounce::new(TOGGLE_DEBOUNCE_SECS),
            show_help: false,
        }
    }

    pub fn apply(&mut self, state: &mut ViewState, input: &InputFrame) -> ControlOutcome {
        let trackball = self.trackball.update(&mut state.rotation, &input.pointer);

        state.apply_scroll(input.scroll_notches);

        let movement = input.keys.movement();
        if movement != Vector3::zeros() {
            state.nudge(&movement);
        }

        if input.keys.toggle_mode && self.mode_debounce.accept(input.time) {
            state.toggle_mode();
            info!("Visualization mode: {}", state.mode.label());
        }

        if input.keys.toggle_help {
            self.show_help = !self.show_help;
            debug!("Controls help visible: {}", self.show_help);
        }

        ControlOutcome {
            quit: input.keys.quit,
            trackball,
        }
    }

    /// Drops any drag and restores the identity orientation.
    pub fn reset_rotation(&mut self, state: &mut ViewState) {
        self.trackball.reset();
        state.reset_rotation();
    }
}
