//! Scripted scroll sessions
//!
//! Replays wheel input at 60 fps through a real coordinator bound to a
//! simulated viewport, refreshing the gallery's visibility map whenever the
//! coordinator asks for it.

use std::cell::RefCell;
use std::rc::Rc;

use pano_animation::ManualFrameLoop;
use pano_core::{InputEvent, Rect};
use pano_gallery::{GalleryConfig, GalleryView};
use pano_scroll::{
    ScrollCoordinator, ScrollProgress, ScrollToOptions, SimulatedViewport, VisibilityReason,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Frames between scripted wheel events
const WHEEL_INTERVAL: u32 = 8;

/// Session script
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub width: f32,
    pub height: f32,
    pub frames: u32,
    /// Wheel delta per event (px); events are sent during the first half of the run
    pub wheel: f32,
    /// Programmatic scroll issued at the start of the second half
    pub scroll_to: Option<f32>,
    pub seed: Option<u64>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            frames: 240,
            wheel: 120.0,
            scroll_to: None,
            seed: None,
        }
    }
}

/// What happened during a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub frames_run: u32,
    pub limit: f32,
    pub final_progress: ScrollProgress,
    pub progress_updates: usize,
    pub visibility_requests: Vec<VisibilityReason>,
    /// Times the published visibility map actually changed
    pub visibility_changes: usize,
    pub visible: Vec<usize>,
}

/// Run a session against `config`
pub fn run(config: &GalleryConfig, options: &SimulationOptions) -> SimulationReport {
    let mut params = config.scroll;
    if options.seed.is_some() {
        params.sampling_seed = options.seed;
    }

    let (content_width, content_height) = config.content_size(options.width);
    let viewport = SimulatedViewport::new(options.width, options.height).with_content(
        content_width.max(options.width),
        content_height.max(options.height),
    );
    let viewport_rect = Rect::new(0.0, 0.0, options.width, options.height);

    let view = Rc::new(RefCell::new(GalleryView::new(config.clone())));
    view.borrow_mut().refresh(viewport_rect, 0.0);

    let frames = Rc::new(RefCell::new(ManualFrameLoop::new()));
    let mut coordinator = ScrollCoordinator::new(viewport, Rc::clone(&frames));
    if !coordinator.initialize(config.axis, params) {
        tracing::warn!("viewport not attached, nothing to simulate");
        return SimulationReport::default();
    }
    tracing::info!(
        "simulating {:?}: {} items, limit {:.0}px, {} frames",
        config.name,
        config.items.len(),
        coordinator.limit(),
        options.frames
    );

    let progress_log = Rc::new(RefCell::new((0usize, ScrollProgress::default())));
    let sink = Rc::clone(&progress_log);
    let _progress = coordinator.subscribe_progress(move |p| {
        tracing::trace!("offset {:.1} progress {:.3}", p.offset, p.progress);
        let mut log = sink.borrow_mut();
        log.0 += 1;
        log.1 = *p;
    });

    let requests = Rc::new(RefCell::new((Vec::new(), 0usize)));
    let sink = Rc::clone(&requests);
    let target = Rc::clone(&view);
    let _visibility = coordinator.subscribe_visibility(move |request| {
        let mut view = target.borrow_mut();
        let changed = view.refresh(viewport_rect, request.offset);
        if changed {
            let visible: Vec<usize> = view.visibility().visible_indices().collect();
            tracing::info!(
                "{:?} at {:.0}px: visible {:?}",
                request.reason,
                request.offset,
                visible
            );
        } else {
            tracing::debug!("{:?} at {:.0}px: unchanged", request.reason, request.offset);
        }
        let mut log = sink.borrow_mut();
        log.0.push(request.reason);
        if changed {
            log.1 += 1;
        }
    });

    let half = options.frames / 2;
    let mut now = 0.0;
    let mut frames_run = 0;
    for frame in 0..options.frames {
        if frame < half && frame % WHEEL_INTERVAL == 0 {
            coordinator.on_input(InputEvent::wheel(0.0, options.wheel, now));
        }
        if frame == half {
            if let Some(target) = options.scroll_to {
                coordinator.scroll_to(target, ScrollToOptions::default());
            }
        }

        if frames.borrow_mut().take_pending() == 0 {
            break;
        }
        now += FRAME_MS;
        coordinator.on_frame(now);
        frames_run += 1;
    }

    coordinator.teardown();

    let (progress_updates, final_progress) = *progress_log.borrow();
    let (visibility_requests, visibility_changes) = requests.borrow().clone();
    let visible = view.borrow().visibility().visible_indices().collect();

    SimulationReport {
        frames_run,
        limit: coordinator.limit(),
        final_progress,
        progress_updates,
        visibility_requests,
        visibility_changes,
        visible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GALLERY: &str = r#"
name = "strip"
preload_margin = { pixels = 200 }

[scroll]
visibility_sample_rate = 0.0

[[breakpoints]]
name = "base"

[[items]]
placements.base = { x = 0, y = 0, width = 600, height = 400 }

[[items]]
placements.base = { x = 1400, y = 0, width = 600, height = 400 }

[[items]]
placements.base = { x = 2800, y = 0, width = 600, height = 400 }
"#;

    fn options() -> SimulationOptions {
        SimulationOptions {
            width: 800.0,
            height: 600.0,
            frames: 240,
            wheel: 100.0,
            scroll_to: None,
            seed: Some(1),
        }
    }

    #[test]
    fn test_wheel_session_stays_in_range() {
        let config = GalleryConfig::from_toml_str(GALLERY).expect("valid gallery");
        let report = run(&config, &options());

        assert_eq!(report.frames_run, 240);
        assert_eq!(report.limit, 2600.0);
        assert!(report.progress_updates > 0);
        assert!(report.final_progress.offset > 0.0);
        assert!(report.final_progress.offset <= report.limit);
        assert!(report
            .visibility_requests
            .iter()
            .all(|r| *r == VisibilityReason::Settled));
        assert!(!report.visible.is_empty());
    }

    #[test]
    fn test_scroll_to_end_reveals_last_item() {
        let config = GalleryConfig::from_toml_str(GALLERY).expect("valid gallery");
        let report = run(
            &config,
            &SimulationOptions {
                wheel: 0.0,
                scroll_to: Some(10_000.0),
                ..options()
            },
        );

        assert_eq!(report.final_progress.offset, 2600.0);
        assert_eq!(report.final_progress.progress, 1.0);
        assert_eq!(report.visible, vec![2]);
        assert!(report.visibility_changes >= 1);
    }
}
