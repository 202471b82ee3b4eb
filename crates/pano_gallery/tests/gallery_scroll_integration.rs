//! Integration tests for gallery config + scroll coordinator + visibility
//!
//! These tests verify that:
//! - A gallery file drives the viewport's content size and item bounds
//! - Visibility requests from the coordinator refresh the gallery view
//! - Unchanged refreshes keep the published map's identity

use std::cell::RefCell;
use std::rc::Rc;

use pano_animation::ManualFrameLoop;
use pano_core::{InputEvent, Rect};
use pano_gallery::{GalleryConfig, GalleryView};
use pano_scroll::{
    MotionState, ScrollCoordinator, ScrollToOptions, SimulatedViewport, Viewport,
    VisibilityReason,
};

const GALLERY: &str = r#"
name = "spring"
axis = "horizontal"
preload_margin = { fraction = 0.8 }

[scroll]
visibility_sample_rate = 0.0
sampling_seed = 11

[[breakpoints]]
name = "base"

[[items]]
src = "a.jpg"
placements.base = { x = 0, y = 100, width = 400, height = 300 }

[[items]]
src = "b.jpg"
placements.base = { x = 1300, y = 100, width = 400, height = 300 }

[[items]]
src = "c.jpg"
placements.base = { x = 1500, y = 100, width = 400, height = 300 }

[[items]]
src = "d.jpg"
placements.base = { x = 3600, y = 100, width = 400, height = 400 }
"#;

fn viewport_rect() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

#[test]
fn test_preload_window_at_rest() {
    let config = GalleryConfig::from_toml_str(GALLERY).expect("valid gallery");
    let mut view = GalleryView::new(config);

    assert!(view.refresh(viewport_rect(), 0.0));
    // 800 px viewport with an 80 % margin reaches 1440 px
    assert_eq!(view.visible_sources(), vec!["a.jpg", "b.jpg"]);
    assert!(!view.visibility().is_visible(2));

    let snapshot = view.snapshot();
    assert!(!view.refresh(viewport_rect(), 0.0));
    assert!(Rc::ptr_eq(&snapshot, &view.snapshot()));
}

#[test]
fn test_coordinator_drives_gallery_visibility() {
    let config = GalleryConfig::from_toml_str(GALLERY).expect("valid gallery");
    let (content_width, _) = config.content_size(800.0);
    assert_eq!(content_width, 4000.0);

    let axis = config.axis;
    let params = config.scroll;
    let view = Rc::new(RefCell::new(GalleryView::new(config)));
    view.borrow_mut().refresh(viewport_rect(), 0.0);

    let frames = Rc::new(RefCell::new(ManualFrameLoop::new()));
    let viewport = SimulatedViewport::new(800.0, 600.0).with_content(content_width, 600.0);
    let mut coordinator = ScrollCoordinator::new(viewport, Rc::clone(&frames));
    assert!(coordinator.initialize(axis, params));
    assert_eq!(coordinator.limit(), 3200.0);

    let reasons = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reasons);
    let target = Rc::clone(&view);
    let _visibility = coordinator.subscribe_visibility(move |request| {
        sink.borrow_mut().push(request.reason);
        target.borrow_mut().refresh(viewport_rect(), request.offset);
    });

    coordinator.on_input(InputEvent::wheel(0.0, 2400.0, 0.0));
    let mut now = 0.0;
    while coordinator.motion() != MotionState::Idle {
        assert!(frames.borrow_mut().take_pending() > 0);
        now += 1000.0 / 60.0;
        coordinator.on_frame(now);
        assert!(now < 10_000.0, "never settled");
    }

    assert_eq!(coordinator.offset(), 2400.0);
    assert_eq!(
        coordinator.viewport().scroll_position(axis),
        coordinator.offset()
    );
    assert_eq!(*reasons.borrow(), vec![VisibilityReason::Settled]);

    // Refreshed at the resting offset: the window spans [1760, 3840]
    let view = view.borrow();
    assert_eq!(view.visible_sources(), vec!["c.jpg", "d.jpg"]);
    assert!(!view.visibility().is_visible(0));
}

#[test]
fn test_scroll_to_and_resize_requests() {
    let config = GalleryConfig::from_toml_str(GALLERY).expect("valid gallery");
    let (content_width, _) = config.content_size(800.0);
    let view = Rc::new(RefCell::new(GalleryView::new(config.clone())));

    let frames = Rc::new(RefCell::new(ManualFrameLoop::new()));
    let viewport = SimulatedViewport::new(800.0, 600.0).with_content(content_width, 600.0);
    let mut coordinator = ScrollCoordinator::new(viewport, Rc::clone(&frames));
    coordinator.initialize(config.axis, config.scroll);

    let target = Rc::clone(&view);
    let _visibility = coordinator.subscribe_visibility(move |request| {
        target.borrow_mut().refresh(viewport_rect(), request.offset);
    });

    coordinator.scroll_to(3200.0, ScrollToOptions::immediate());
    assert_eq!(view.borrow().visible_sources(), vec!["d.jpg"]);

    // A wider viewport shrinks the scroll range and pulls the offset back
    coordinator.viewport_mut().resize(1600.0, 600.0);
    coordinator.on_resize();
    assert_eq!(coordinator.limit(), 2400.0);
    assert_eq!(coordinator.offset(), 2400.0);
}
