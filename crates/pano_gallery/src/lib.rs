//! Pano Gallery
//!
//! Static gallery description loaded from TOML: breakpoints, per-item
//! placements keyed by breakpoint, scroll tuning and preload margin.
//!
//! ```rust
//! use pano_gallery::GalleryConfig;
//!
//! let config = GalleryConfig::from_toml_str(r#"
//!     name = "demo"
//!     breakpoints = [{ name = "base" }]
//!
//!     [[items]]
//!     placements.base = { x = 900, y = 0, width = 400, height = 300 }
//! "#).unwrap();
//!
//! let layout = config.layout(800.0, 200.0);
//! assert_eq!(layout[0].1.x, 700.0);
//! ```

pub mod breakpoint;
pub mod config;
pub mod layout;
pub mod view;

pub use breakpoint::{Breakpoint, BreakpointSet};
pub use config::{GalleryConfig, GalleryItem, ItemPlacement};
pub use view::GalleryView;
