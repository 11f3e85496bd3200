use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use trailglow_platform::{FrameControl, FrameDriver, Result};

/// Frame driver that paces callbacks to a fixed refresh rate on the calling
/// thread, stamping each frame with nanoseconds since the driver started.
pub struct PacedDriver {
    frame_interval: Duration,
    max_frames: Option<u64>,
}

impl PacedDriver {
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / frames_per_second.max(1),
            max_frames: None,
        }
    }

    /// Stops after `frames` callbacks even if the callback never asks to.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

impl FrameDriver for PacedDriver {
    fn run(&mut self, on_frame: &mut dyn FnMut(u64) -> FrameControl) -> Result<()> {
        let origin = Instant::now();
        let mut deadline = origin;
        let mut frames = 0u64;
        let mut late = 0u64;

        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                break;
            }
            deadline += self.frame_interval;
            let now = Instant::now();
            if let Some(wait) = deadline.checked_duration_since(now) {
                thread::sleep(wait);
            } else {
                late += 1;
                // resynchronize instead of bursting to catch up
                deadline = now;
            }

            let timestamp = origin.elapsed().as_nanos() as u64;
            frames += 1;
            if on_frame(timestamp) == FrameControl::Stop {
                break;
            }
        }

        if late > 0 {
            warn!(late, frames, "frame driver missed deadlines");
        }
        debug!(frames, "frame driver finished");
        Ok(())
    }
}
