use log::debug;

use crate::FrameIndex;
use crate::integration::ObjectTracker;
use crate::video::Frame;

use super::droplet::Droplet;
use super::rect::Rect;

/// Ordered collection of droplets plus the current selection.
///
/// Droplet indices are stable: they double as the identifiers in persisted
/// position data, so droplets are never removed, only disabled.
#[derive(Debug, Default)]
pub struct DropletRegistry {
    droplets: Vec<Droplet>,
    selection: Option<usize>,
}

impl DropletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new inactive droplet at the next index and select it.
    pub fn append_droplet(&mut self) -> usize {
        self.droplets.push(Droplet::new());
        let index = self.droplets.len() - 1;
        self.selection = Some(index);
        debug!("droplet {index} appended");
        index
    }

    /// Move the selection forward by one, clamped at the last droplet.
    ///
    /// No-op when nothing is selected.
    pub fn select_next(&mut self) {
        if let Some(index) = self.selection {
            if index + 1 < self.droplets.len() {
                self.selection = Some(index + 1);
            }
        }
    }

    /// Move the selection back by one, clamped at the first droplet.
    ///
    /// No-op when nothing is selected.
    pub fn select_previous(&mut self) {
        if let Some(index) = self.selection {
            if index > 0 {
                self.selection = Some(index - 1);
            }
        }
    }

    /// Select the first droplet, or clear the selection when empty.
    pub fn select_first(&mut self) {
        self.selection = if self.droplets.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    /// Index of the selected droplet, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn len(&self) -> usize {
        self.droplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.droplets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Droplet> {
        self.droplets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Droplet> {
        self.droplets.iter()
    }

    /// Detach droplet `index`'s tracker and drop its estimate at `at_frame`.
    ///
    /// Unknown indices are ignored.
    pub fn disable(&mut self, index: usize, at_frame: FrameIndex) {
        if let Some(droplet) = self.droplets.get_mut(index) {
            droplet.disable_at(at_frame);
            debug!("droplet {index} disabled at frame {at_frame}");
        }
    }

    /// Attach a freshly started tracker to droplet `index`, seeded with
    /// `rect` at `at_frame`.
    ///
    /// Unknown indices are ignored; the tracker is dropped in that case.
    pub fn reseed(
        &mut self,
        index: usize,
        at_frame: FrameIndex,
        rect: Rect,
        tracker: Box<dyn ObjectTracker>,
    ) {
        if let Some(droplet) = self.droplets.get_mut(index) {
            droplet.seed(at_frame, rect, tracker);
            debug!("droplet {index} reseeded at frame {at_frame}");
        }
    }

    /// Bring every droplet up to date with `current` against the
    /// preprocessed frame. Each droplet is processed at most once per frame.
    pub fn reconcile(&mut self, current: FrameIndex, processed: &Frame) {
        for droplet in &mut self.droplets {
            droplet.reconcile(current, processed);
        }
    }

    /// Backfill a history entry from persisted data, growing the registry
    /// to fit `index`.
    pub(crate) fn restore(&mut self, index: usize, frame: FrameIndex, rect: Rect) {
        if self.droplets.len() < index + 1 {
            self.droplets.resize_with(index + 1, Droplet::new);
        }
        self.droplets[index].restore_entry(frame, rect);
    }
}
