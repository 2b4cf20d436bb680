//! Activation domain
//!
//! Maps the vertical scroll position of a full-height paged list to the one
//! item that is allowed to play. Every page is exactly one viewport tall, so
//! the index is `round(offset / viewport_height)`. Gestures that end close
//! to where they started are promoted to a one-page move (a fling), and no
//! gesture may move more than one page at a time.

/// Default drag distance, in points, that turns a short release into a fling.
pub const DEFAULT_FLING_THRESHOLD: f32 = 24.0;

/// A committed change of the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// Result of releasing a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureOutcome {
    pub change: Option<ActivationChange>,
    /// Corrective animated scroll target, when the list has to snap.
    pub scroll_to: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureAnchor {
    offset: f32,
    index: i64,
}

#[derive(Debug, Clone)]
pub struct ActivationResolver {
    viewport_height: f32,
    item_count: usize,
    active: Option<usize>,
    last_offset: f32,
    anchor: Option<GestureAnchor>,
    fling_threshold: f32,
}

impl Default for ActivationResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FLING_THRESHOLD)
    }
}

impl ActivationResolver {
    pub fn new(fling_threshold: f32) -> Self {
        Self {
            viewport_height: 0.0,
            item_count: 0,
            active: None,
            last_offset: 0.0,
            anchor: None,
            fling_threshold: fling_threshold.max(0.0),
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    fn has_layout(&self) -> bool {
        self.viewport_height > 0.0
    }

    pub fn on_layout(&mut self, height: f32) {
        if height.is_finite() {
            self.viewport_height = height;
        }
    }

    /// Update the number of pages. Returns a change when the active index
    /// had to be created, clamped or cleared.
    pub fn set_item_count(&mut self, count: usize) -> Option<ActivationChange> {
        self.item_count = count;
        let next = match (count, self.active) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(index)) => Some(index.min(n - 1)),
        };
        if count == 0 {
            self.anchor = None;
            self.last_offset = 0.0;
        }
        self.commit(next)
    }

    /// Continuous scroll position. Only acts once a layout is known.
    pub fn on_scroll(&mut self, offset: f32) -> Option<ActivationChange> {
        self.last_offset = offset;
        if !self.has_layout() || self.item_count == 0 {
            return None;
        }
        let index = self.clamp_index(self.raw_index(offset));
        self.commit(Some(index))
    }

    pub fn on_gesture_start(&mut self, offset: f32) {
        if !self.has_layout() {
            self.anchor = None;
            return;
        }
        self.anchor = Some(GestureAnchor {
            offset,
            index: self.raw_index(offset),
        });
    }

    pub fn on_gesture_end(&mut self, offset: f32) -> GestureOutcome {
        let anchor = self.anchor.take();
        self.last_offset = offset;
        if !self.has_layout() || self.item_count == 0 {
            return GestureOutcome::default();
        }

        let anchor = anchor.unwrap_or_else(|| {
            let index = self.active.unwrap_or(0) as i64;
            GestureAnchor {
                offset: index as f32 * self.viewport_height,
                index,
            }
        });

        let raw = self.raw_index(offset);
        let start = self.clamp_index(anchor.index) as i64;
        let delta = offset - anchor.offset;

        let mut target = raw;
        if delta.abs() > self.fling_threshold && raw == start {
            target = if delta > 0.0 { start + 1 } else { start - 1 };
        }
        let target = self.clamp_index(target.clamp(start - 1, start + 1));

        let scroll_to = (target as i64 != raw)
            .then(|| target as f32 * self.viewport_height);
        if let Some(y) = scroll_to {
            log::debug!(
                "[Activation] Snapping gesture (raw {}, start {}) to page {} at {}",
                raw,
                start,
                target,
                y
            );
        }

        GestureOutcome {
            change: self.commit(Some(target)),
            scroll_to,
        }
    }

    /// Whether `offset` is within `threshold` viewports of the list end.
    pub fn is_near_end(&self, offset: f32, threshold: f32) -> bool {
        if !self.has_layout() || self.item_count == 0 {
            return false;
        }
        let content = self.item_count as f32 * self.viewport_height;
        let remaining = content - (offset + self.viewport_height);
        remaining <= threshold * self.viewport_height
    }

    fn raw_index(&self, offset: f32) -> i64 {
        (offset / self.viewport_height).round() as i64
    }

    fn clamp_index(&self, index: i64) -> usize {
        let last = self.item_count.saturating_sub(1) as i64;
        index.clamp(0, last) as usize
    }

    fn commit(&mut self, next: Option<usize>) -> Option<ActivationChange> {
        if next == self.active {
            return None;
        }
        let change = ActivationChange {
            previous: self.active,
            current: next,
        };
        self.active = next;
        Some(change)
    }
}
