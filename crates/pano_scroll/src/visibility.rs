//! Visibility culling for positioned gallery items
//!
//! An item counts as visible when its bounds overlap the viewport grown by a
//! preload margin on both ends of the scrolling axis. Offscreen media can then
//! be hidden or left unloaded.
//!
//! Two writers feed the same map: [`VisibilitySet::recompute`] (rect polling,
//! driven by the coordinator's visibility requests) and
//! [`VisibilitySet::apply_intersection`] (intersection-observer callbacks).
//! The last write for an index wins.
//!
//! Consumers observe an `Rc` snapshot that is only replaced when some item's
//! visibility actually changed, so an unchanged recompute never signals a
//! redundant update downstream.

use std::rc::Rc;

use indexmap::IndexMap;
use pano_core::{Axis, Rect};
use serde::{Deserialize, Serialize};

/// Extra distance beyond the viewport within which items still count as visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreloadMargin {
    /// Fixed distance in pixels
    Pixels(f32),
    /// Fraction of the viewport extent (0.8 = 80 %)
    Fraction(f32),
}

impl PreloadMargin {
    /// Margin in pixels for a viewport of the given main-axis extent
    pub fn resolve(&self, viewport_extent: f32) -> f32 {
        let margin = match self {
            PreloadMargin::Pixels(px) => *px,
            PreloadMargin::Fraction(fraction) => fraction * viewport_extent,
        };
        if margin.is_finite() {
            margin.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for PreloadMargin {
    fn default() -> Self {
        PreloadMargin::Fraction(1.0)
    }
}

/// Last known state of one tracked item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub index: usize,
    /// Last-measured bounds (same coordinate space as the viewport rect)
    pub bounds: Rect,
    pub visible: bool,
}

/// Published visibility: item index to visible flag, in item order
pub type VisibilityMap = IndexMap<usize, bool>;

/// Overlap test along `axis` with `margin` added on both sides of the viewport
pub fn intersects_with_margin(item: Rect, viewport: Rect, axis: Axis, margin: f32) -> bool {
    item.leading_edge(axis) < viewport.trailing_edge(axis) + margin
        && item.trailing_edge(axis) > viewport.leading_edge(axis) - margin
}

/// Tracks which items are inside the preload window
#[derive(Debug, Clone)]
pub struct VisibilitySet {
    axis: Axis,
    margin: PreloadMargin,
    entries: IndexMap<usize, VisibilityEntry>,
    snapshot: Rc<VisibilityMap>,
    generation: u64,
}

impl VisibilitySet {
    pub fn new(axis: Axis, margin: PreloadMargin) -> Self {
        Self {
            axis,
            margin,
            entries: IndexMap::new(),
            snapshot: Rc::new(VisibilityMap::new()),
            generation: 0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn margin(&self) -> PreloadMargin {
        self.margin
    }

    pub fn set_margin(&mut self, margin: PreloadMargin) {
        self.margin = margin;
    }

    /// Re-measure every item against the viewport.
    ///
    /// Items missing from `items` stop being tracked. Returns true when the
    /// published snapshot was replaced.
    pub fn recompute<I>(&mut self, viewport: Rect, items: I) -> bool
    where
        I: IntoIterator<Item = (usize, Rect)>,
    {
        let margin = self.margin.resolve(viewport.extent(self.axis));

        let mut entries = IndexMap::with_capacity(self.entries.len());
        for (index, bounds) in items {
            let visible = intersects_with_margin(bounds, viewport, self.axis, margin);
            entries.insert(
                index,
                VisibilityEntry {
                    index,
                    bounds,
                    visible,
                },
            );
        }
        self.entries = entries;

        self.publish_if_changed()
    }

    /// Intersection-observer style update for a single item.
    ///
    /// Unknown indices start being tracked with empty bounds. Returns true
    /// when the published snapshot was replaced.
    pub fn apply_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        self.entries
            .entry(index)
            .and_modify(|entry| entry.visible = is_intersecting)
            .or_insert(VisibilityEntry {
                index,
                bounds: Rect::ZERO,
                visible: is_intersecting,
            });

        self.publish_if_changed()
    }

    fn publish_if_changed(&mut self) -> bool {
        let unchanged = self.snapshot.len() == self.entries.len()
            && self
                .entries
                .iter()
                .all(|(index, entry)| self.snapshot.get(index) == Some(&entry.visible));
        if unchanged {
            return false;
        }

        let map: VisibilityMap = self
            .entries
            .iter()
            .map(|(index, entry)| (*index, entry.visible))
            .collect();
        self.snapshot = Rc::new(map);
        self.generation += 1;

        tracing::trace!(
            "visibility generation {}: {} of {} visible",
            self.generation,
            self.snapshot.values().filter(|v| **v).count(),
            self.snapshot.len()
        );
        true
    }

    /// Current published map; identity only changes when visibility changes
    pub fn snapshot(&self) -> Rc<VisibilityMap> {
        Rc::clone(&self.snapshot)
    }

    /// Number of times the snapshot has been replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.snapshot.get(&index).copied().unwrap_or(false)
    }

    pub fn entry(&self, index: usize) -> Option<&VisibilityEntry> {
        self.entries.get(&index)
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.snapshot
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(index, _)| *index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
