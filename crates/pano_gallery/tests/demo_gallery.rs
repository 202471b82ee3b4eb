//! The bundled demo gallery must stay loadable

use pano_core::{Axis, Rect};
use pano_gallery::GalleryConfig;
use pano_scroll::PreloadMargin;

const DEMO: &str = include_str!("../../../demos/gallery.toml");

#[test]
fn test_demo_gallery_is_valid() {
    let config = GalleryConfig::from_toml_str(DEMO).expect("demo gallery parses");

    assert_eq!(config.name, "spring-collection");
    assert_eq!(config.axis, Axis::Horizontal);
    assert_eq!(config.preload_margin, PreloadMargin::Fraction(0.8));
    assert_eq!(config.items.len(), 6);
    assert_eq!(config.breakpoint_set().len(), 3);
}

#[test]
fn test_demo_gallery_tablet_falls_back_to_mobile() {
    let config = GalleryConfig::from_toml_str(DEMO).expect("demo gallery parses");

    let layout = config.layout(1024.0, 0.0);
    assert_eq!(layout.len(), 6);
    // "Dunes" has no tablet placement
    assert_eq!(layout[1].1, Rect::new(368.0, 140.0, 280.0, 360.0));
    assert_eq!(layout[2].1, Rect::new(1060.0, 80.0, 600.0, 700.0));
}
