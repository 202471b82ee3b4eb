//! Axis-aware geometry primitives

use serde::{Deserialize, Serialize};

/// Primary scrolling axis of a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Left-to-right scrolling (gallery default)
    #[default]
    Horizontal,
    /// Top-to-bottom scrolling
    Vertical,
}

impl Axis {
    /// Pick the component of an (x, y) pair that lies on this axis
    #[inline]
    pub fn main(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Axis::Horizontal)
    }
}

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edge where content enters the viewport (left or top)
    pub fn leading_edge(&self, axis: Axis) -> f32 {
        axis.main(self.x, self.y)
    }

    /// Edge where content leaves the viewport (right or bottom)
    pub fn trailing_edge(&self, axis: Axis) -> f32 {
        self.leading_edge(axis) + self.extent(axis)
    }

    /// Size along the axis
    pub fn extent(&self, axis: Axis) -> f32 {
        axis.main(self.width, self.height)
    }

    /// Move the rectangle by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Move the rectangle along one axis only
    pub fn translate_along(&self, axis: Axis, delta: f32) -> Rect {
        match axis {
            Axis::Horizontal => self.translate(delta, 0.0),
            Axis::Vertical => self.translate(0.0, delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_axis() {
        let rect = Rect::new(100.0, 20.0, 300.0, 50.0);

        assert_eq!(rect.leading_edge(Axis::Horizontal), 100.0);
        assert_eq!(rect.trailing_edge(Axis::Horizontal), 400.0);
        assert_eq!(rect.leading_edge(Axis::Vertical), 20.0);
        assert_eq!(rect.trailing_edge(Axis::Vertical), 70.0);
    }

    #[test]
    fn test_translate_along() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(rect.translate_along(Axis::Horizontal, -10.0).x, 0.0);
        assert_eq!(rect.translate_along(Axis::Vertical, 5.0).y, 15.0);
    }
}
