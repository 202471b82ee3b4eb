//! Gallery configuration file handling

use std::fs;
use std::path::Path;

use pano_core::{Axis, PanoError, Result};
use pano_scroll::{PreloadMargin, ScrollParams};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::breakpoint::{Breakpoint, BreakpointSet};

/// Top-level gallery configuration (gallery.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GalleryConfig {
    pub name: String,
    /// Scrolling direction
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub preload_margin: PreloadMargin,
    #[serde(default)]
    pub scroll: ScrollParams,
    pub breakpoints: Vec<Breakpoint>,
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

/// One positioned media item
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub label: Option<String>,
    /// Media source (image or video URL)
    #[serde(default)]
    pub src: Option<String>,
    /// Position per breakpoint name
    #[serde(default)]
    pub placements: FxHashMap<String, ItemPlacement>,
}

/// Where an item sits at one breakpoint, in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct ItemPlacement {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GalleryConfig {
    /// Load and validate a gallery file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded gallery {:?} from {}: {} items, {} breakpoints",
            config.name,
            path.display(),
            config.items.len(),
            config.breakpoints.len()
        );
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GalleryConfig =
            toml::from_str(content).map_err(|e| PanoError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every placement names a known breakpoint and every item
    /// can be placed at the narrowest breakpoint.
    pub fn validate(&self) -> Result<()> {
        if self.breakpoints.is_empty() {
            return Err(PanoError::InvalidLayout(
                "at least one breakpoint is required".to_string(),
            ));
        }

        let mut seen = FxHashSet::default();
        for bp in &self.breakpoints {
            if !bp.min_width.is_finite() || bp.min_width < 0.0 {
                return Err(PanoError::InvalidLayout(format!(
                    "breakpoint `{}` has invalid min_width {}",
                    bp.name, bp.min_width
                )));
            }
            if !seen.insert(bp.name.as_str()) {
                return Err(PanoError::InvalidLayout(format!(
                    "breakpoint `{}` is defined twice",
                    bp.name
                )));
            }
        }

        let breakpoints = self.breakpoint_set();
        let base = breakpoints
            .base()
            .map(|bp| bp.name.as_str())
            .unwrap_or_default();

        for (index, item) in self.items.iter().enumerate() {
            for (name, placement) in &item.placements {
                if !breakpoints.contains(name) {
                    return Err(PanoError::InvalidLayout(format!(
                        "item {index} is placed at unknown breakpoint `{name}`"
                    )));
                }
                let sizes_ok = [placement.x, placement.y, placement.width, placement.height]
                    .iter()
                    .all(|v| v.is_finite())
                    && placement.width >= 0.0
                    && placement.height >= 0.0;
                if !sizes_ok {
                    return Err(PanoError::InvalidLayout(format!(
                        "item {index} has an invalid placement at `{name}`"
                    )));
                }
            }
            if !item.placements.contains_key(base) {
                return Err(PanoError::InvalidLayout(format!(
                    "item {index} has no placement for base breakpoint `{base}`"
                )));
            }
        }

        Ok(())
    }

    /// Breakpoints ordered narrow to wide
    pub fn breakpoint_set(&self) -> BreakpointSet {
        BreakpointSet::new(self.breakpoints.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name = "minimal"

[[breakpoints]]
name = "mobile"

[[items]]
placements.mobile = { x = 0, y = 0, width = 300, height = 200 }
"#;

    #[test]
    fn test_defaults_fill_in() {
        let config = GalleryConfig::from_toml_str(MINIMAL).expect("valid config");
        assert_eq!(config.axis, Axis::Horizontal);
        assert_eq!(config.preload_margin, PreloadMargin::Fraction(1.0));
        assert_eq!(config.scroll, ScrollParams::default());
        assert_eq!(config.breakpoints[0].min_width, 0.0);
        assert_eq!(config.items.len(), 1);
    }

    #[test]
    fn test_unknown_breakpoint_is_rejected() {
        let content = r#"
name = "bad"

[[breakpoints]]
name = "mobile"

[[items]]
placements.mobile = { width = 300, height = 200 }
placements.desktop = { width = 600, height = 400 }
"#;
        let err = GalleryConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, PanoError::InvalidLayout(ref msg) if msg.contains("desktop")));
    }

    #[test]
    fn test_missing_base_placement_is_rejected() {
        let content = r#"
name = "bad"

[[breakpoints]]
name = "desktop"
min_width = 1024

[[breakpoints]]
name = "mobile"

[[items]]
placements.desktop = { width = 600, height = 400 }
"#;
        let err = GalleryConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, PanoError::InvalidLayout(ref msg) if msg.contains("mobile")));
    }

    #[test]
    fn test_duplicate_breakpoints_are_rejected() {
        let content = r#"
name = "bad"
breakpoints = [{ name = "a" }, { name = "a", min_width = 10 }]
"#;
        assert!(matches!(
            GalleryConfig::from_toml_str(content),
            Err(PanoError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let err = GalleryConfig::from_toml_str("name = ").unwrap_err();
        assert!(matches!(err, PanoError::Parse(_)));

        let err = GalleryConfig::from_toml_str("name = \"x\"\nbreakpoints = []").unwrap_err();
        assert!(matches!(err, PanoError::InvalidLayout(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GalleryConfig::load(Path::new("/nonexistent/gallery.toml")).unwrap_err();
        assert!(matches!(err, PanoError::Io(_)));
    }
}
