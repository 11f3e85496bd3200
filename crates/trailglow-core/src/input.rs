//! Pointer events handed to the renderer, possibly from another thread.

use crossbeam_channel::{Receiver, Sender};
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A new gesture begins at this position.
    Start(DVec2),
    /// The pointer moved to this position.
    Move(DVec2),
    /// Drawing stopped; let the trail drain.
    FadeOut,
}

/// Channel pair carrying events from an input thread to the render thread.
pub fn channel() -> (Sender<InputEvent>, Receiver<InputEvent>) {
    crossbeam_channel::unbounded()
}
