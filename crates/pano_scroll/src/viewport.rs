//! Host viewport handle
//!
//! The coordinator never touches a DOM or window directly; the host view
//! hands it something implementing [`Viewport`]. Ownership of the handle is
//! what guarantees one coordinator per viewport.

use pano_core::{Axis, Rect};

/// Scrollable element exposed by the host view
pub trait Viewport {
    /// False until the host element is mounted and measurable
    fn is_attached(&self) -> bool;

    /// Bounding rectangle of the visible area
    fn rect(&self) -> Rect;

    /// Native scroll position (`scrollLeft` / `scrollTop`)
    fn scroll_position(&self, axis: Axis) -> f32;

    /// Write the native scroll position
    fn set_scroll_position(&mut self, axis: Axis, value: f32);

    /// Total content size (`scrollWidth` / `scrollHeight`)
    fn scroll_extent(&self, axis: Axis) -> f32;

    /// Visible size (`clientWidth` / `clientHeight`)
    fn client_extent(&self, axis: Axis) -> f32;

    /// Touch-first devices get the native scrolling path on horizontal galleries
    fn is_touch_device(&self) -> bool {
        false
    }

    /// Largest reachable scroll position
    fn scroll_limit(&self, axis: Axis) -> f32 {
        (self.scroll_extent(axis) - self.client_extent(axis)).max(0.0)
    }
}

/// In-memory viewport with browser-like clamping
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedViewport {
    attached: bool,
    touch: bool,
    rect: Rect,
    content_width: f32,
    content_height: f32,
    scroll_x: f32,
    scroll_y: f32,
}

impl SimulatedViewport {
    /// An attached viewport whose content exactly fills it
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            attached: true,
            touch: false,
            rect: Rect::new(0.0, 0.0, width, height),
            content_width: width,
            content_height: height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_content(mut self, width: f32, height: f32) -> Self {
        self.set_content_size(width, height);
        self
    }

    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn set_content_size(&mut self, width: f32, height: f32) {
        self.content_width = width.max(0.0);
        self.content_height = height.max(0.0);
        self.clamp_positions();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.rect.width = width.max(0.0);
        self.rect.height = height.max(0.0);
        self.clamp_positions();
    }

    /// Simulate the browser scrolling on its own (touch swipe, scrollbar drag)
    pub fn native_scroll_by(&mut self, axis: Axis, delta: f32) {
        let position = self.scroll_position(axis) + delta;
        self.set_scroll_position(axis, position);
    }

    fn clamp_positions(&mut self) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.scroll_limit(Axis::Horizontal));
        self.scroll_y = self.scroll_y.clamp(0.0, self.scroll_limit(Axis::Vertical));
    }
}

impl Viewport for SimulatedViewport {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn scroll_position(&self, axis: Axis) -> f32 {
        axis.main(self.scroll_x, self.scroll_y)
    }

    fn set_scroll_position(&mut self, axis: Axis, value: f32) {
        let value = if value.is_finite() { value } else { 0.0 };
        let value = value.clamp(0.0, self.scroll_limit(axis));
        match axis {
            Axis::Horizontal => self.scroll_x = value,
            Axis::Vertical => self.scroll_y = value,
        }
    }

    fn scroll_extent(&self, axis: Axis) -> f32 {
        axis.main(self.content_width, self.content_height)
    }

    fn client_extent(&self, axis: Axis) -> f32 {
        self.rect.extent(axis)
    }

    fn is_touch_device(&self) -> bool {
        self.touch
    }
}
