use std::collections::BTreeSet;

use crate::FrameIndex;

/// Set of frames marked as interesting, e.g. for pause-on-reach playback.
///
/// Marking and unmarking are idempotent. Iteration is in ascending frame
/// order, which also fixes the order of the persisted keyframe file.
#[derive(Debug, Clone, Default)]
pub struct KeyframeSet {
    frames: BTreeSet<FrameIndex>,
}

impl KeyframeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `frame` as a keyframe.
    pub fn mark(&mut self, frame: FrameIndex) {
        self.frames.insert(frame);
    }

    /// Remove the mark on `frame`, if any.
    pub fn unmark(&mut self, frame: FrameIndex) {
        self.frames.remove(&frame);
    }

    /// Whether `frame` is marked.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.frames.contains(&frame)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Marked frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.frames.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_idempotent() {
        let mut keyframes = KeyframeSet::new();
        keyframes.mark(7);
        keyframes.mark(7);

        assert_eq!(keyframes.len(), 1);
        assert!(keyframes.contains(7));
    }

    #[test]
    fn test_unmark_absent_is_a_noop() {
        let mut keyframes = KeyframeSet::new();
        keyframes.mark(3);
        keyframes.unmark(9);

        assert_eq!(keyframes.len(), 1);

        keyframes.unmark(3);
        assert!(keyframes.is_empty());
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut keyframes = KeyframeSet::new();
        keyframes.mark(20);
        keyframes.mark(3);
        keyframes.mark(11);

        let frames: Vec<_> = keyframes.iter().collect();
        assert_eq!(frames, vec![3, 11, 20]);
    }
}
