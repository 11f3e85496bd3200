//! Host-side abstraction traits so `trailglow-core` stays OS-agnostic.

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use trailglow_core::InputEvent;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Whether the frame driver should keep calling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Invokes the render loop once per display refresh.
pub trait FrameDriver {
    /// Calls `on_frame` with monotonically increasing nanosecond timestamps
    /// until it returns [`FrameControl::Stop`] or the driver gives up.
    fn run(&mut self, on_frame: &mut dyn FnMut(u64) -> FrameControl) -> Result<()>;
}

/// Source of pointer events. Implementations may deliver from any thread.
pub trait InputSource: Send {
    fn start(&mut self, events: Sender<InputEvent>) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}
