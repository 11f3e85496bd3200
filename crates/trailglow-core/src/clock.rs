//! Frame-rate estimate sampled over fixed windows.

/// Nanoseconds in one second; frame timestamps are in nanoseconds.
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Default sampling window: half a second.
pub const DEFAULT_SAMPLE_INTERVAL: u64 = NANOS_PER_SECOND / 2;

/// Outcome of a single [`FrameClock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpsSample {
    Accumulating,
    Sampled(u32),
}

/// Counts frames per window and scales the count up to a per-second rate.
///
/// With the default half-second window the published value is simply twice
/// the window's frame count. It is an estimate, not an average over frame
/// times.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: u64,
    frame_count: u32,
    last_sample: u64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL)
    }
}

impl FrameClock {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frame_count: 0,
            last_sample: 0,
            fps: 0,
        }
    }

    /// Resets the counters and opens a window at `now`.
    pub fn start(&mut self, now: u64) {
        self.frame_count = 0;
        self.last_sample = now;
    }

    /// Records a frame at `now`, publishing a new estimate once the current
    /// window is over. The ticking frame counts toward the window it opens.
    pub fn tick(&mut self, now: u64) -> FpsSample {
        let sample = if now.saturating_sub(self.last_sample) > self.interval {
            self.fps = self.scale(self.frame_count);
            self.frame_count = 0;
            self.last_sample = now;
            FpsSample::Sampled(self.fps)
        } else {
            FpsSample::Accumulating
        };
        self.frame_count += 1;
        sample
    }

    /// Last published estimate; zero until the first window closes.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames counted in the open window.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    fn scale(&self, count: u32) -> u32 {
        (u64::from(count) * NANOS_PER_SECOND / self.interval) as u32
    }
}
