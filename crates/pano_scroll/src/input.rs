//! Raw input to scroll deltas

use pano_core::events::{event_types, EventData, InputEvent};
use pano_core::Axis;

/// Pixel delta along `axis` for a wheel event, before multipliers.
///
/// Horizontal galleries accept ordinary vertical wheels: whichever component
/// is larger drives the scroll.
pub fn wheel_delta(data: &EventData, axis: Axis, page_extent: f32) -> f32 {
    let EventData::Wheel {
        delta_x,
        delta_y,
        mode,
    } = data
    else {
        return 0.0;
    };

    let dx = mode.to_pixels(*delta_x, page_extent);
    let dy = mode.to_pixels(*delta_y, page_extent);
    match axis {
        Axis::Horizontal if dx.abs() > dy.abs() => dx,
        Axis::Horizontal | Axis::Vertical => dy,
    }
}

/// Follows one touch gesture and turns finger movement into scroll deltas
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    last_point: Option<f32>,
    last_delta: f32,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.last_point.is_some()
    }

    /// Feed a touch event; returns the raw scroll delta it produces.
    ///
    /// Dragging the finger toward the leading edge scrolls forward, so the
    /// delta is the negated finger movement. `TOUCH_END` returns the last
    /// movement as the basis for a flick.
    pub fn track(&mut self, event: &InputEvent, axis: Axis) -> f32 {
        match (event.event_type, &event.data) {
            (event_types::TOUCH_START, EventData::Touch { x, y }) => {
                self.last_point = Some(axis.main(*x, *y));
                self.last_delta = 0.0;
                0.0
            }
            (event_types::TOUCH_MOVE, EventData::Touch { x, y }) => {
                let point = axis.main(*x, *y);
                let delta = match self.last_point {
                    Some(last) => -(point - last),
                    // Move without a start: anchor here
                    None => 0.0,
                };
                self.last_point = Some(point);
                self.last_delta = delta;
                delta
            }
            (event_types::TOUCH_END, _) => {
                let flick = self.last_delta;
                self.last_point = None;
                self.last_delta = 0.0;
                flick
            }
            _ => 0.0,
        }
    }
}
