//! Input events
//!
//! Raw host input (wheel, touch, native scroll) normalized into one event type
//! that the scroll coordinator and its state machines understand.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Mouse wheel or trackpad delta
    pub const WHEEL: EventType = 1;
    pub const TOUCH_START: EventType = 2;
    pub const TOUCH_MOVE: EventType = 3;
    /// Finger lifted (inertia may follow)
    pub const TOUCH_END: EventType = 4;
    /// The host scrolled the viewport natively
    pub const NATIVE_SCROLL: EventType = 10;
    /// Programmatic animated scroll requested
    pub const SCROLL_TO: EventType = 11;
    /// Motion came to rest
    pub const SETTLED: EventType = 12;

    // Lifecycle events
    pub const MOUNT: EventType = 30;
    pub const UNMOUNT: EventType = 31;
}

/// Unit of a wheel delta, mirroring the DOM `deltaMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Pixel height of one wheel "line"
    pub const LINE_HEIGHT: f32 = 16.0;

    /// Convert a raw delta into pixels. `page_extent` is the viewport size on the scrolled axis.
    pub fn to_pixels(&self, delta: f32, page_extent: f32) -> f32 {
        match self {
            DeltaMode::Pixel => delta,
            DeltaMode::Line => delta * Self::LINE_HEIGHT,
            DeltaMode::Page => delta * page_extent,
        }
    }
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub event_type: EventType,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Wheel {
        delta_x: f32,
        delta_y: f32,
        mode: DeltaMode,
    },
    Touch {
        x: f32,
        y: f32,
    },
    None,
}

impl InputEvent {
    /// Pixel-mode wheel event
    pub fn wheel(delta_x: f32, delta_y: f32, timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::WHEEL,
            data: EventData::Wheel {
                delta_x,
                delta_y,
                mode: DeltaMode::Pixel,
            },
            timestamp_ms,
        }
    }

    /// Wheel event with an explicit delta mode
    pub fn wheel_with_mode(delta_x: f32, delta_y: f32, mode: DeltaMode, timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::WHEEL,
            data: EventData::Wheel {
                delta_x,
                delta_y,
                mode,
            },
            timestamp_ms,
        }
    }

    pub fn touch_start(x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self::touch(event_types::TOUCH_START, x, y, timestamp_ms)
    }

    pub fn touch_move(x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self::touch(event_types::TOUCH_MOVE, x, y, timestamp_ms)
    }

    pub fn touch_end(timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::TOUCH_END,
            data: EventData::None,
            timestamp_ms,
        }
    }

    fn touch(event_type: EventType, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            event_type,
            data: EventData::Touch { x, y },
            timestamp_ms,
        }
    }

    /// True for events that originate from the user rather than the coordinator
    pub fn is_user_input(&self) -> bool {
        matches!(
            self.event_type,
            event_types::WHEEL
                | event_types::TOUCH_START
                | event_types::TOUCH_MOVE
                | event_types::TOUCH_END
        )
    }
}
