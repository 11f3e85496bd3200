use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trailglow_core::{DrawCommand, RecordingSurface, TrailPreset, TrailRenderer, TrailSegment};

const FRAME: u64 = 16_666_667;

fn started_renderer() -> TrailRenderer<StdRng> {
    let mut renderer = TrailRenderer::new(TrailPreset::default(), StdRng::seed_from_u64(42));
    renderer.start(0);
    renderer
}

#[test]
fn single_segment_frame() {
    let mut renderer = started_renderer();
    let mut surface = RecordingSurface::new(800.0, 600.0);

    renderer.set_anchor(DVec2::ZERO);
    renderer.append(DVec2::new(10.0, 0.0));

    let segment = TrailSegment::between(DVec2::ZERO, DVec2::new(10.0, 0.0), 4.0);
    assert_eq!(segment.midpoint, DVec2::new(5.0, 0.0));
    assert_eq!(segment.offset_left, DVec2::new(5.0, 40.0));
    assert_eq!(segment.offset_right, DVec2::new(5.0, -40.0));

    let report = renderer.on_frame(FRAME, &mut surface).unwrap();
    assert_eq!(report.segments, 1);
    assert_eq!(report.ovals, 100);
    assert_eq!(report.lines, 2);

    let ovals: Vec<_> = surface.ovals().collect();
    assert_eq!(ovals.len(), 100);
    for oval in ovals {
        assert!((4.75..=5.25).contains(&oval.x), "x out of bounds: {}", oval.x);
        assert!((-42.0..=42.0).contains(&oval.y), "y out of bounds: {}", oval.y);
    }

    let lines: Vec<_> = surface.lines().collect();
    assert_eq!(
        lines,
        vec![
            (DVec2::ZERO, DVec2::new(5.0, -40.0)),
            (DVec2::ZERO, DVec2::new(5.0, 40.0)),
        ]
    );
}

#[test]
fn both_passes_cover_the_same_segments() {
    let mut renderer = started_renderer();
    let mut surface = RecordingSurface::new(800.0, 600.0);

    renderer.set_anchor(DVec2::new(100.0, 100.0));
    for i in 1..=20 {
        let t = i as f64 * 0.3;
        renderer.append(DVec2::new(100.0 + 10.0 * t.cos(), 100.0 + 10.0 * t.sin()));
    }
    let report = renderer.on_frame(FRAME, &mut surface).unwrap();
    assert_eq!(report.segments, 20);
    assert_eq!(report.ovals, 20 * 100);
    assert_eq!(report.lines, 40);

    let fills = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::SetFill(_)))
        .count();
    assert_eq!(fills, 20);

    // line starts walk the anchor and then every point but the newest
    let starts: Vec<_> = surface.lines().step_by(2).map(|(from, _)| from).collect();
    let mut expected = vec![DVec2::new(100.0, 100.0)];
    expected.extend(renderer.buffer().iter().take(19));
    assert_eq!(starts, expected);

    // nothing was consumed, so the next frame redraws the same ribbon
    assert_eq!(renderer.buffer().len(), 20);
    surface.take();
    renderer.on_frame(2 * FRAME, &mut surface).unwrap();
    let again: Vec<_> = surface.lines().step_by(2).map(|(from, _)| from).collect();
    assert_eq!(again, expected);
}

#[test]
fn fade_out_drains_within_bound() {
    let mut renderer = started_renderer();
    let mut surface = RecordingSurface::new(800.0, 600.0);

    renderer.set_anchor(DVec2::ZERO);
    for i in 1..=23 {
        renderer.append(DVec2::new(i as f64, 0.0));
    }

    // holding steady while drawing
    renderer.on_frame(FRAME, &mut surface).unwrap();
    assert_eq!(renderer.buffer().len(), 23);

    renderer.mark_for_fade_out();
    let bound = 23usize.div_ceil(5);
    let mut frames = 0;
    while !renderer.buffer().is_empty() {
        frames += 1;
        renderer.on_frame((frames as u64 + 1) * FRAME, &mut surface).unwrap();
        assert!(frames <= bound);
    }
    assert_eq!(frames, bound);

    // drained trail keeps drawing an empty frame; shrinking is now a no-op
    surface.take();
    let report = renderer.on_frame(100 * FRAME, &mut surface).unwrap();
    assert_eq!(report.segments, 0);
    assert_eq!(renderer.buffer().anchor(), Some(DVec2::new(23.0, 0.0)));
    assert_eq!(surface.ovals().count(), 0);
}

#[test]
fn new_gesture_regrows_after_fade() {
    let mut renderer = started_renderer();
    let mut surface = RecordingSurface::new(800.0, 600.0);

    renderer.set_anchor(DVec2::ZERO);
    renderer.append(DVec2::new(1.0, 1.0));
    renderer.mark_for_fade_out();
    renderer.on_frame(FRAME, &mut surface).unwrap();
    assert!(renderer.buffer().is_empty());

    renderer.set_anchor(DVec2::new(50.0, 50.0));
    renderer.append(DVec2::new(55.0, 50.0));
    renderer.append(DVec2::new(60.0, 50.0));
    let report = renderer.on_frame(2 * FRAME, &mut surface).unwrap();
    assert_eq!(report.segments, 2);
    assert_eq!(renderer.buffer().len(), 2);
}

#[test]
fn fps_readout_tracks_frame_rate() {
    let mut renderer = started_renderer();
    let mut surface = RecordingSurface::new(800.0, 600.0);
    renderer.set_anchor(DVec2::ZERO);

    let mut published = Vec::new();
    for i in 1..=120u64 {
        let report = renderer.on_frame(i * FRAME, &mut surface).unwrap();
        if report.sampled {
            published.push(report.fps);
        }
    }
    assert!(published.len() >= 3);
    for fps in &published[1..] {
        assert!((58..=62).contains(fps), "estimate {fps}");
    }

    let text = surface
        .last_frame()
        .iter()
        .rev()
        .find_map(|c| match c {
            DrawCommand::StrokeText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(text, renderer.fps().to_string());
}
