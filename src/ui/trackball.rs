//! Virtual trackball: turns 2-D drag samples into an accumulated 3-D rotation.
//!
//! Each drag frame projects the previous and current pointer positions onto a
//! unit hemisphere and rotates along the great circle between them. Deltas are
//! composed on the left so they act in view space: dragging right always turns
//! the model the same way on screen, whatever its current orientation.

use crate::core::math::transform::screen_to_ndc;
use log::trace;
use nalgebra::{Point2, Unit, UnitQuaternion, Vector2, Vector3};

/// Below this angle or axis length a drag frame is treated as no motion.
pub const ROTATION_EPSILON: f32 = 1e-6;

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Window position in pixels, `None` when the pointer left the window.
    pub position: Option<Point2<f32>>,
    pub primary_down: bool,
    /// The pointer is over a UI panel or a widget holds the pointer.
    pub over_ui: bool,
    /// Window size in pixels.
    pub viewport: Vector2<f32>,
}

/// What a call to [`Trackball::update`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackballEvent {
    /// Not dragging and no drag started.
    Idle,
    /// A drag started; the sample only anchors it.
    Anchored,
    /// The rotation was composed with this increment.
    Rotated { axis: Vector3<f32>, angle: f32 },
    /// Dragging, but the frame had no usable motion.
    Skipped,
    /// The button was released, nothing applied.
    Released,
}

/// Press/drag/release state machine for model rotation.
#[derive(Debug, Clone, Default)]
pub struct Trackball {
    mouse_pos: Option<Point2<f32>>,
    rotating: bool,
    button_was_down: bool,
}

impl Trackball {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Last sampled drag position in window pixels.
    pub fn mouse_pos(&self) -> Option<Point2<f32>> {
        self.mouse_pos
    }

    /// Drops any drag in progress.
    pub fn reset(&mut self) {
        self.mouse_pos = None;
        self.rotating = false;
    }

    /// Advances the state machine by one frame and composes the rotation.
    pub fn update(&mut self, rotation: &mut UnitQuaternion<f32>, input: &PointerInput) -> TrackballEvent {
        let pressed_now = input.primary_down && !self.button_was_down;
        self.button_was_down = input.primary_down;

        if !input.primary_down {
            if self.rotating {
                self.reset();
                return TrackballEvent::Released;
            }
            return TrackballEvent::Idle;
        }

        if !self.rotating {
            // Drags that begin inside UI panels never rotate the model.
            if !pressed_now || input.over_ui {
                return TrackballEvent::Idle;
            }
            let Some(position) = input.position else {
                return TrackballEvent::Idle;
            };
            self.rotating = true;
            self.mouse_pos = Some(position);
            return TrackballEvent::Anchored;
        }

        let (Some(previous), Some(current)) = (self.mouse_pos, input.position) else {
            return TrackballEvent::Skipped;
        };
        self.mouse_pos = Some(current);

        match drag_rotation(&previous, &current, &input.viewport) {
            Some((axis, angle)) => {
                let delta = UnitQuaternion::from_axis_angle(&axis, angle);
                let mut composed = delta * *rotation;
                composed.renormalize();
                *rotation = composed;
                TrackballEvent::Rotated {
                    axis: axis.into_inner(),
                    angle,
                }
            }
            None => {
                trace!("Skipping degenerate drag frame {previous:?} -> {current:?}");
                TrackballEvent::Skipped
            }
        }
    }
}

/// Projects an NDC point onto the unit hemisphere facing the viewer.
/// Points outside the unit circle land on the rim (z = 0).
pub fn project_to_sphere(ndc: &Point2<f32>) -> Vector3<f32> {
    let z = (1.0 - ndc.x * ndc.x - ndc.y * ndc.y).max(0.0).sqrt();
    Vector3::new(ndc.x, ndc.y, z)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::z)
}

/// Rotation that carries `from` onto `to` on the trackball sphere, both in NDC.
/// `None` when the motion is too small or the axis is degenerate.
pub fn ndc_rotation(from: &Point2<f32>, to: &Point2<f32>) -> Option<(Unit<Vector3<f32>>, f32)> {
    let p_prev = project_to_sphere(from);
    let p_curr = project_to_sphere(to);

    let angle = p_prev.dot(&p_curr).clamp(-1.0, 1.0).acos();
    if !(angle >= ROTATION_EPSILON) {
        return None;
    }
    let axis = Unit::try_new(p_prev.cross(&p_curr), ROTATION_EPSILON)?;
    Some((axis, angle))
}

/// [`ndc_rotation`] for two window-pixel samples.
pub fn drag_rotation(
    previous: &Point2<f32>,
    current: &Point2<f32>,
    viewport: &Vector2<f32>,
) -> Option<(Unit<Vector3<f32>>, f32)> {
    ndc_rotation(&screen_to_ndc(previous, viewport), &screen_to_ndc(current, viewport))
}
