//! Trailglow core engine: platform-agnostic trail geometry, color cycling,
//! frame timing and the per-frame render loop.

pub mod buffer;
pub mod clock;
pub mod color;
pub mod config;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod surface;

pub use buffer::{TrailBuffer, MAX_POINTS};
pub use clock::{FpsSample, FrameClock};
pub use color::{ColorCycler, Hsb};
pub use config::{CloudStyle, ConfigError, EngineConfig, FpsStyle, RibbonStyle, TrailPreset};
pub use geometry::{perpendicular_left, perpendicular_right, Segments, TrailSegment};
pub use input::InputEvent;
pub use renderer::{FrameReport, TrailRenderer};
pub use surface::{DrawCommand, DrawSurface, Font, RecordingSurface};
