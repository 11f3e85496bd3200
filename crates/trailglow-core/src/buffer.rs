//! Bounded history of recent pointer positions.

use std::collections::VecDeque;

use glam::DVec2;
use tracing::debug;

use crate::geometry::Segments;

/// Default number of points the trail remembers.
pub const MAX_POINTS: usize = 360;

/// FIFO of recorded positions plus the anchor the next segment starts from.
///
/// Points leave the buffer only from the front. Whenever one leaves, it
/// becomes the anchor, so the oldest drawn segment always begins where the
/// removed tail ended.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: VecDeque<DVec2>,
    capacity: usize,
    anchor: Option<DVec2>,
    fading: bool,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(MAX_POINTS)
    }
}

impl TrailBuffer {
    /// Creates an empty buffer holding at most `capacity` points (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            anchor: None,
            fading: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn anchor(&self) -> Option<DVec2> {
        self.anchor
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    /// Appends `point` at the tail, evicting the oldest point first when full.
    /// Returns the evicted point, if any.
    pub fn append(&mut self, point: DVec2) -> Option<DVec2> {
        let evicted = if self.points.len() >= self.capacity {
            self.consume_oldest()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    /// Removes up to `count` oldest points, but only while fading.
    /// Returns how many were removed.
    pub fn shrink(&mut self, count: usize) -> usize {
        if !self.fading || self.points.is_empty() {
            return 0;
        }
        let mut removed = 0;
        while removed < count && self.consume_oldest().is_some() {
            removed += 1;
        }
        if self.points.is_empty() {
            debug!("trail drained");
        }
        removed
    }

    /// Pops the oldest point and makes it the anchor. The anchor is left
    /// untouched when the buffer is empty.
    pub fn consume_oldest(&mut self) -> Option<DVec2> {
        let oldest = self.points.pop_front()?;
        self.anchor = Some(oldest);
        Some(oldest)
    }

    /// Starts a new gesture at `point`.
    pub fn set_anchor(&mut self, point: DVec2) {
        self.anchor = Some(point);
        self.fading = false;
    }

    /// Lets the render loop drain the buffer instead of holding it steady.
    pub fn mark_for_fade_out(&mut self) {
        self.fading = true;
    }

    /// Forgets every point, the anchor and the fade-out request.
    pub fn clear(&mut self) {
        self.points.clear();
        self.anchor = None;
        self.fading = false;
    }

    /// Walks the current contents starting from the anchor. `None` until an
    /// anchor has been set.
    pub fn segments(&self, spread: f64) -> Option<Segments<impl Iterator<Item = DVec2> + '_>> {
        self.anchor.map(|anchor| self.segments_from(anchor, spread))
    }

    /// Walks the current contents starting from an explicit `anchor`.
    pub fn segments_from(
        &self,
        anchor: DVec2,
        spread: f64,
    ) -> Segments<impl Iterator<Item = DVec2> + '_> {
        Segments::new(anchor, self.iter(), spread)
    }
}
