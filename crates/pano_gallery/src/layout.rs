//! Placement resolution
//!
//! Turns the static (item, breakpoint) table into viewport-relative bounds for
//! the visibility set.

use pano_core::Rect;

use crate::breakpoint::BreakpointSet;
use crate::config::{GalleryConfig, GalleryItem, ItemPlacement};

impl ItemPlacement {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl GalleryItem {
    /// Placement at the breakpoint resolved for `viewport_width`, falling
    /// back through narrower breakpoints
    pub fn placement_for(
        &self,
        breakpoints: &BreakpointSet,
        viewport_width: f32,
    ) -> Option<ItemPlacement> {
        let index = breakpoints.resolve_index(viewport_width)?;
        breakpoints
            .narrowing_from(index)
            .find_map(|bp| self.placements.get(&bp.name).copied())
    }
}

impl GalleryConfig {
    /// Item bounds relative to a viewport of `viewport_width` scrolled to
    /// `scroll_offset` along the gallery axis.
    ///
    /// Items without any usable placement are skipped.
    pub fn layout(&self, viewport_width: f32, scroll_offset: f32) -> Vec<(usize, Rect)> {
        let breakpoints = self.breakpoint_set();
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let Some(placement) = item.placement_for(&breakpoints, viewport_width) else {
                    tracing::trace!("item {} has no placement at width {}", index, viewport_width);
                    return None;
                };
                Some((
                    index,
                    placement.to_rect().translate_along(self.axis, -scroll_offset),
                ))
            })
            .collect()
    }

    /// Width and height of the content box enclosing every placed item
    pub fn content_size(&self, viewport_width: f32) -> (f32, f32) {
        self.layout(viewport_width, 0.0)
            .iter()
            .fold((0.0f32, 0.0f32), |(w, h), (_, rect)| {
                (w.max(rect.x + rect.width), h.max(rect.y + rect.height))
            })
    }
}
