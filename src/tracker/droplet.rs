use std::collections::BTreeMap;
use std::fmt;

use crate::FrameIndex;
use crate::integration::ObjectTracker;
use crate::video::Frame;

use super::rect::Rect;

/// One tracked droplet: a sparse frame-indexed box history plus the live
/// tracker state.
///
/// History only holds frames where the droplet's position was known; frames
/// where the tracker missed, or that were visited while the droplet was
/// disabled, have no entry.
pub struct Droplet {
    history: BTreeMap<FrameIndex, Rect>,
    active: bool,
    tracker: Option<Box<dyn ObjectTracker>>,
    // None = not participating in reconciliation: fresh droplets, and
    // droplets restored from disk whose history must survive scrubbing.
    last_reconciled: Option<FrameIndex>,
}

impl Droplet {
    pub fn new() -> Self {
        Self {
            history: BTreeMap::new(),
            active: false,
            tracker: None,
            last_reconciled: None,
        }
    }

    /// Whether a live tracker is attached and advanced on new frames.
    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    /// The droplet's box at `frame`, if one was recorded.
    #[inline]
    pub fn position_at(&self, frame: FrameIndex) -> Option<Rect> {
        self.history.get(&frame).copied()
    }

    /// The full frame-indexed box history, in ascending frame order.
    #[inline]
    pub fn history(&self) -> &BTreeMap<FrameIndex, Rect> {
        &self.history
    }

    /// Last frame this droplet was reconciled at, or `None` if it has never
    /// taken part in reconciliation.
    #[inline]
    pub fn last_reconciled(&self) -> Option<FrameIndex> {
        self.last_reconciled
    }

    /// Whether a tracker handle is currently attached.
    #[inline]
    pub fn has_tracker(&self) -> bool {
        self.tracker.is_some()
    }

    /// Attach a fresh tracker seeded at `at`, recording the seed box.
    pub(crate) fn seed(&mut self, at: FrameIndex, rect: Rect, tracker: Box<dyn ObjectTracker>) {
        self.active = true;
        self.tracker = Some(tracker);
        self.history.insert(at, rect);
        self.last_reconciled = Some(at);
    }

    /// Detach the tracker and drop the possibly-bad estimate at `at`.
    pub(crate) fn disable_at(&mut self, at: FrameIndex) {
        self.active = false;
        self.tracker = None;
        self.history.remove(&at);
        self.last_reconciled = Some(at);
    }

    /// Bring this droplet up to date with `current`.
    ///
    /// Runs at most once per frame: frames at or before the last reconciled
    /// one are skipped, so revisiting a frame never re-invokes the tracker.
    /// An active droplet records the tracker's box (a miss leaves a gap); an
    /// inactive one sheds any stale entry at `current`.
    pub(crate) fn reconcile(&mut self, current: FrameIndex, processed: &Frame) {
        let Some(last) = self.last_reconciled else {
            return;
        };
        if last >= current {
            return;
        }

        if self.active {
            if let Some(tracker) = self.tracker.as_mut() {
                if let Some(rect) = tracker.update(processed) {
                    self.history.insert(current, rect);
                }
            }
        } else {
            self.history.remove(&current);
        }
        self.last_reconciled = Some(current);
    }

    /// Re-insert a history entry from persisted data.
    ///
    /// Restored droplets come back inactive and outside reconciliation, so
    /// navigation cannot erase what was loaded.
    pub(crate) fn restore_entry(&mut self, frame: FrameIndex, rect: Rect) {
        self.active = false;
        self.last_reconciled = None;
        self.history.insert(frame, rect);
    }
}

impl Default for Droplet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Droplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Droplet")
            .field("history", &self.history)
            .field("active", &self.active)
            .field("tracker", &self.tracker.is_some())
            .field("last_reconciled", &self.last_reconciled)
            .finish()
    }
}
