use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};
use trailglow_core::{input, FrameReport, TrailRenderer};
use trailglow_platform::{FrameControl, FrameDriver, InputSource, Result};

use crate::config::AppConfig;
use crate::driver::PacedDriver;
use crate::pointer::ScriptedPointer;
use crate::svg::SvgSurface;

/// Totals for a whole run, written next to the snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub preset: String,
    pub frames: u64,
    pub drawn_frames: u64,
    pub segments: u64,
    pub ovals: u64,
    pub lines: u64,
    pub fps_samples: Vec<u32>,
    pub peak_points: usize,
    pub snapshot: Option<PathBuf>,
}

impl RunSummary {
    fn record(&mut self, report: &FrameReport, points: usize) {
        self.drawn_frames += 1;
        self.segments += report.segments as u64;
        self.ovals += report.ovals as u64;
        self.lines += report.lines as u64;
        self.peak_points = self.peak_points.max(points);
        if report.sampled {
            self.fps_samples.push(report.fps);
        }
    }
}

/// Drives the renderer from the scripted pointer for the configured duration.
pub fn run_app(config: &AppConfig) -> Result<RunSummary> {
    let run = &config.run;
    let preset = config.engine.preset.clone();
    let mut renderer = match run.seed {
        Some(seed) => TrailRenderer::new(preset, StdRng::seed_from_u64(seed)),
        None => TrailRenderer::with_preset(preset),
    };
    let mut surface = SvgSurface::new(run.surface_width, run.surface_height);
    let output_dir = PathBuf::from(&run.output_dir);
    let snapshot_path = output_dir.join("snapshot.svg");
    let duration_nanos = run.duration_ms.saturating_mul(1_000_000);

    let (events, receiver) = input::channel();
    let mut pointer = ScriptedPointer::new(config.pointer.clone());
    // bound the run even if the clock never reaches the deadline
    let frame_budget = u64::from(run.frames_per_second) * run.duration_ms / 1_000 * 2 + 1;
    let mut driver = PacedDriver::new(run.frames_per_second).with_max_frames(frame_budget);

    let mut summary = RunSummary {
        preset: renderer.preset().name.clone(),
        ..RunSummary::default()
    };
    let mut io_error = None;

    renderer.start(0);
    pointer.start(events)?;
    driver.run(&mut |now| {
        summary.frames += 1;
        renderer.drain_input(&receiver);
        if let Some(report) = renderer.on_frame(now, &mut surface) {
            summary.record(&report, renderer.buffer().len());
            if report.sampled {
                info!(fps = report.fps, points = renderer.buffer().len(), "fps");
            }
        }
        if summary.frames == run.snapshot_frame {
            match surface.write_to(&snapshot_path) {
                Ok(()) => {
                    info!(
                        path = %snapshot_path.display(),
                        elements = surface.element_count(),
                        "snapshot written"
                    );
                    summary.snapshot = Some(snapshot_path.clone());
                }
                Err(err) => {
                    warn!("failed to write snapshot: {err}");
                    io_error = Some(err);
                    return FrameControl::Stop;
                }
            }
        }
        if now >= duration_nanos {
            FrameControl::Stop
        } else {
            FrameControl::Continue
        }
    })?;
    renderer.stop();
    pointer.stop()?;

    if let Some(err) = io_error {
        return Err(err.into());
    }

    let summary_path = output_dir.join("summary.json");
    std::fs::create_dir_all(&output_dir)?;
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    debug!(?summary, "run finished");
    info!(path = %summary_path.display(), frames = summary.frames, "summary written");
    Ok(summary)
}
