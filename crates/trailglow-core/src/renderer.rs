//! Per-frame orchestration: cloud pass, ribbon pass, FPS readout.

use crossbeam_channel::{Receiver, TryRecvError};
use glam::{DVec2, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, trace};

use crate::buffer::TrailBuffer;
use crate::clock::{FpsSample, FrameClock};
use crate::color::ColorCycler;
use crate::config::TrailPreset;
use crate::geometry::TrailSegment;
use crate::input::InputEvent;
use crate::surface::{DrawSurface, Font};

/// What a single frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub segments: usize,
    pub ovals: usize,
    pub lines: usize,
    pub fps: u32,
    /// Set when this frame closed an FPS sampling window.
    pub sampled: bool,
}

/// Owns the trail state and turns it into draw calls once per display refresh.
///
/// The jitter source is injected so that clouds are reproducible under a
/// seeded generator.
pub struct TrailRenderer<R = StdRng> {
    preset: TrailPreset,
    buffer: TrailBuffer,
    colors: ColorCycler,
    clock: FrameClock,
    rng: R,
    running: bool,
}

impl TrailRenderer<StdRng> {
    /// Renderer with an entropy-seeded jitter source.
    pub fn with_preset(preset: TrailPreset) -> Self {
        Self::new(preset, StdRng::from_entropy())
    }
}

impl<R: Rng> TrailRenderer<R> {
    pub fn new(preset: TrailPreset, rng: R) -> Self {
        Self {
            buffer: TrailBuffer::new(preset.max_points),
            colors: ColorCycler::new(preset.hue_step),
            clock: FrameClock::new(preset.fps.sample_interval_nanos()),
            preset,
            rng,
            running: false,
        }
    }

    pub fn preset(&self) -> &TrailPreset {
        &self.preset
    }

    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the trail, resets the frame counters and forgets the anchor.
    pub fn start(&mut self, now: u64) {
        self.buffer.clear();
        self.clock.start(now);
        self.running = true;
        debug!(preset = %self.preset.name, "trail renderer started");
    }

    pub fn stop(&mut self) {
        self.running = false;
        debug!("trail renderer stopped");
    }

    pub fn append(&mut self, point: DVec2) {
        self.buffer.append(point);
    }

    pub fn set_anchor(&mut self, point: DVec2) {
        debug!(x = point.x, y = point.y, "new gesture");
        self.buffer.set_anchor(point);
    }

    pub fn mark_for_fade_out(&mut self) {
        debug!(points = self.buffer.len(), "fade-out requested");
        self.buffer.mark_for_fade_out();
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Start(point) => self.set_anchor(point),
            InputEvent::Move(point) => self.append(point),
            InputEvent::FadeOut => self.mark_for_fade_out(),
        }
    }

    /// Applies every event queued so far without blocking. Returns how many
    /// were applied.
    pub fn drain_input(&mut self, events: &Receiver<InputEvent>) -> usize {
        let mut applied = 0;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if applied == 0 {
                        trace!("input channel disconnected");
                    }
                    break;
                }
            }
        }
        applied
    }

    /// Draws one frame at `now`. Nothing happens until the renderer is started
    /// and a gesture has set an anchor.
    pub fn on_frame(&mut self, now: u64, surface: &mut impl DrawSurface) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        self.buffer.anchor()?;

        let sample = self.clock.tick(now);
        let size = surface.size();
        surface.clear_rect(DVec2::ZERO, size);
        self.buffer.shrink(self.preset.fade_step);

        // Both passes start from the same anchor; drawing never consumes points.
        let cloud = self.buffer.segments(self.preset.spread)?;
        let anchor = cloud.anchor();
        let mut report = FrameReport {
            fps: self.clock.fps(),
            sampled: matches!(sample, FpsSample::Sampled(_)),
            ..FrameReport::default()
        };

        for segment in cloud {
            let color = self.colors.next_color(self.preset.cloud.brightness);
            surface.set_fill(color.to_rgba());
            report.ovals += draw_cloud(surface, &mut self.rng, &self.preset, &segment);
            report.segments += 1;
        }

        surface.set_line_width(self.preset.ribbon.line_width);
        for segment in self.buffer.segments_from(anchor, self.preset.spread) {
            let color = self.colors.next_color(self.preset.ribbon.brightness);
            surface.set_stroke(color.to_rgba());
            surface.stroke_line(segment.start, segment.offset_right);
            surface.stroke_line(segment.start, segment.offset_left);
            report.lines += 2;
        }

        self.draw_fps(surface);

        if report.sampled {
            debug!(fps = report.fps, points = self.buffer.len(), "fps sample");
        }
        trace!(?report, "frame drawn");
        Some(report)
    }

    fn draw_fps(&self, surface: &mut impl DrawSurface) {
        let style = &self.preset.fps;
        surface.set_font(Font {
            size: style.font_size,
            bold: true,
        });
        surface.set_stroke(Vec4::ONE);
        surface.set_line_width(1.0);
        surface.stroke_text(
            &self.clock.fps().to_string(),
            DVec2::from_array(style.position),
        );
    }
}

fn draw_cloud<R: Rng>(
    surface: &mut impl DrawSurface,
    rng: &mut R,
    preset: &TrailPreset,
    segment: &TrailSegment,
) -> usize {
    let style = &preset.cloud;
    let (left, right) = (segment.offset_left, segment.offset_right);
    let size = DVec2::splat(style.oval_size);
    for _ in 0..style.particles {
        let x = rough_between(rng, left.x, right.x, style.jitter_min, style.jitter_max);
        let y = rough_between(rng, left.y, right.y, style.jitter_min, style.jitter_max);
        surface.fill_oval(DVec2::new(x, y), size);
    }
    style.particles
}

/// Uniform value in `[min, max)`; `min` when the range is empty.
fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.gen::<f64>()
}

/// Uniform value between `a` and `b` after scaling each bound by its own
/// random factor in `[jitter_min, jitter_max)`.
fn rough_between<R: Rng>(rng: &mut R, a: f64, b: f64, jitter_min: f64, jitter_max: f64) -> f64 {
    let (lo, hi) = if a > b { (b, a) } else { (a, b) };
    let lo = lo * uniform(rng, jitter_min, jitter_max);
    let hi = hi * uniform(rng, jitter_min, jitter_max);
    uniform(rng, lo, hi)
}

impl<R> std::fmt::Debug for TrailRenderer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailRenderer")
            .field("preset", &self.preset.name)
            .field("points", &self.buffer.len())
            .field("anchor", &self.buffer.anchor())
            .field("fps", &self.clock.fps())
            .field("running", &self.running)
            .finish()
    }
}
