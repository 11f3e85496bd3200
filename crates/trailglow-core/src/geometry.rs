//! Perpendicular-offset geometry shared by the cloud and ribbon passes.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// How far the offset points reach, as a multiple of the segment length.
pub const DEFAULT_SPREAD: f64 = 4.0;

/// Rotates `v` by +90° (counter-clockwise in a y-up frame). Length is preserved.
#[inline]
pub fn perpendicular_left(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Rotates `v` by -90°. Always the negation of [`perpendicular_left`].
#[inline]
pub fn perpendicular_right(v: DVec2) -> DVec2 {
    DVec2::new(v.y, -v.x)
}

/// One drawable piece of the trail: the pair of points it connects plus the
/// two offset points straddling it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSegment {
    pub start: DVec2,
    pub end: DVec2,
    pub midpoint: DVec2,
    pub offset_left: DVec2,
    pub offset_right: DVec2,
}

impl TrailSegment {
    /// Builds the segment from `previous` to `current`.
    ///
    /// The offsets are not normalized: a longer pointer movement produces a
    /// proportionally wider segment.
    pub fn between(previous: DVec2, current: DVec2, spread: f64) -> Self {
        let delta = (current - previous) * spread;
        let midpoint = (previous + current) * 0.5;
        Self {
            start: previous,
            end: current,
            midpoint,
            offset_left: midpoint + perpendicular_left(delta),
            offset_right: midpoint + perpendicular_right(delta),
        }
    }
}

/// Walks a point sequence from an explicit anchor, yielding one segment per
/// point. The walk never mutates the points it reads, so the same sequence can
/// be walked any number of times from the same anchor.
#[derive(Debug, Clone)]
pub struct Segments<I> {
    anchor: DVec2,
    points: I,
    spread: f64,
}

impl<I> Segments<I>
where
    I: Iterator<Item = DVec2>,
{
    pub fn new(anchor: DVec2, points: I, spread: f64) -> Self {
        Self {
            anchor,
            points,
            spread,
        }
    }

    /// The anchor the next segment would start from.
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }
}

impl<I> Iterator for Segments<I>
where
    I: Iterator<Item = DVec2>,
{
    type Item = TrailSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.points.next()?;
        let segment = TrailSegment::between(self.anchor, current, self.spread);
        self.anchor = current;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}
