//! Gallery view state: configuration plus the live visibility map

use std::rc::Rc;

use pano_core::Rect;
use pano_scroll::{VisibilityMap, VisibilitySet};

use crate::config::GalleryConfig;

/// What a rendered gallery keeps between frames
pub struct GalleryView {
    config: GalleryConfig,
    visibility: VisibilitySet,
}

impl GalleryView {
    pub fn new(config: GalleryConfig) -> Self {
        let visibility = VisibilitySet::new(config.axis, config.preload_margin);
        Self { config, visibility }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Re-measure every item for a viewport of `viewport` size scrolled to
    /// `scroll_offset`. Returns true when the visibility map changed.
    pub fn refresh(&mut self, viewport: Rect, scroll_offset: f32) -> bool {
        let items = self.config.layout(viewport.width, scroll_offset);
        let bounds = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        self.visibility.recompute(bounds, items)
    }

    /// Intersection-observer update for one item
    pub fn apply_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        self.visibility.apply_intersection(index, is_intersecting)
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    pub fn snapshot(&self) -> Rc<VisibilityMap> {
        self.visibility.snapshot()
    }

    /// Media sources of items currently inside the preload window
    pub fn visible_sources(&self) -> Vec<&str> {
        self.visibility
            .visible_indices()
            .filter_map(|index| self.config.items.get(index))
            .filter_map(|item| item.src.as_deref())
            .collect()
    }
}
