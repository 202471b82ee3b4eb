//! Responsive breakpoints

use serde::{Deserialize, Serialize};

/// A named layout variant that applies from `min_width` upwards
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Breakpoint {
    pub name: String,
    /// Smallest viewport width (px) this breakpoint applies to
    #[serde(default)]
    pub min_width: f32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: f32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }
}

/// Breakpoints ordered from narrowest to widest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakpointSet {
    ordered: Vec<Breakpoint>,
}

impl BreakpointSet {
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Self {
        breakpoints.sort_by(|a, b| a.min_width.total_cmp(&b.min_width));
        Self {
            ordered: breakpoints,
        }
    }

    /// Narrowest breakpoint; every item must be placed for it
    pub fn base(&self) -> Option<&Breakpoint> {
        self.ordered.first()
    }

    /// Position (in narrow-to-wide order) of the widest breakpoint whose
    /// `min_width <= width`. Widths below every breakpoint use the base.
    pub fn resolve_index(&self, width: f32) -> Option<usize> {
        if self.ordered.is_empty() {
            return None;
        }
        let fitting = self
            .ordered
            .iter()
            .rposition(|bp| bp.min_width <= width)
            .unwrap_or(0);
        Some(fitting)
    }

    pub fn resolve(&self, width: f32) -> Option<&Breakpoint> {
        self.resolve_index(width).map(|i| &self.ordered[i])
    }

    /// Breakpoints from `index` down to the base, for placement fallback
    pub fn narrowing_from(&self, index: usize) -> impl Iterator<Item = &Breakpoint> {
        let end = (index + 1).min(self.ordered.len());
        self.ordered[..end].iter().rev()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ordered.iter().any(|bp| bp.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
