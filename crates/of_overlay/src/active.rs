//! # Active Pass Tracking
//!
//! Passes stay on screen for their whole ball-flight window, but the detector
//! emits each one only once. `ActiveEventSet` keeps them between frames.
//!
//! ## Lifecycle
//! absent → absorbed (first frame it is emitted) → active while
//! `frame <= end_frame` → pruned on the first frame past `end_frame`.
//!
//! Frames must arrive in non-decreasing order; pruning only compares against
//! the frame currently being rendered.

use tracing::{debug, trace};

use crate::events::{PassEvent, PlayerId};

type PassIdentity = (PlayerId, Option<PlayerId>, u32, u32);

#[derive(Debug, Clone, Default)]
pub struct ActiveEventSet {
    passes: Vec<PassEvent>,
    last_frame: Option<u32>,
    dedupe: bool,
}

impl ActiveEventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set that ignores a pass whose identity is already held.
    pub fn deduplicating() -> Self {
        Self { dedupe: true, ..Self::default() }
    }

    /// Drop every pass that ended before `frame`. Returns how many went.
    pub fn prune(&mut self, frame: u32) -> usize {
        if let Some(last) = self.last_frame {
            if frame < last {
                debug!(frame, last, "frame index went backwards; pruned passes stay pruned");
            }
        }
        self.last_frame = Some(frame);

        let before = self.passes.len();
        self.passes.retain(|p| p.base.end_frame >= frame);
        let removed = before - self.passes.len();
        if removed > 0 {
            trace!(frame, removed, "pruned finished passes");
        }
        removed
    }

    /// Take ownership of copies of the given passes. Returns how many were
    /// added.
    ///
    /// A pass that already ended before the last pruned frame is skipped so
    /// every member keeps `end_frame >= last frame seen`.
    pub fn absorb<'a>(&mut self, passes: impl IntoIterator<Item = &'a PassEvent>) -> usize {
        let mut added = 0;
        for pass in passes {
            if let Some(last) = self.last_frame {
                if pass.base.end_frame < last {
                    trace!(passer = pass.passer_id, end = pass.base.end_frame, "skipping expired pass");
                    continue;
                }
            }
            if self.dedupe && self.contains(pass) {
                continue;
            }
            self.passes.push(pass.clone());
            added += 1;
        }
        added
    }

    /// Passes whose window contains `frame`, with their progress in [0, 1].
    pub fn in_progress(&self, frame: u32) -> impl Iterator<Item = (&PassEvent, f64)> {
        self.passes
            .iter()
            .filter_map(move |p| p.base.progress_at(frame).map(|progress| (p, progress)))
    }

    pub fn contains(&self, pass: &PassEvent) -> bool {
        let id: PassIdentity = pass.identity();
        self.passes.iter().any(|p| p.identity() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PassEvent> {
        self.passes.iter()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn last_frame(&self) -> Option<u32> {
        self.last_frame
    }

    pub fn clear(&mut self) {
        self.passes.clear();
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(set: &mut ActiveEventSet, frame: u32, emitted: &[PassEvent]) {
        set.prune(frame);
        set.absorb(emitted);
    }

    #[test]
    fn test_pass_lives_for_its_window() {
        let pass = PassEvent::new(10, 20, 7, Some(9));
        let mut set = ActiveEventSet::new();

        step(&mut set, 10, std::slice::from_ref(&pass));
        for frame in 10..=20 {
            if frame > 10 {
                step(&mut set, frame, &[]);
            }
            assert!(set.contains(&pass), "missing at frame {frame}");
            assert_eq!(set.in_progress(frame).count(), 1);
        }
        for frame in 21..30 {
            step(&mut set, frame, &[]);
            assert!(!set.contains(&pass), "resurrected at frame {frame}");
        }
    }

    #[test]
    fn test_prune_reports_count_once() {
        let mut set = ActiveEventSet::new();
        step(&mut set, 0, &[PassEvent::new(0, 2, 1, None), PassEvent::new(0, 5, 2, None)]);
        assert_eq!(set.prune(3), 1);
        assert_eq!(set.prune(4), 0);
        assert_eq!(set.prune(6), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let pass = PassEvent::new(0, 10, 3, Some(4));
        let mut set = ActiveEventSet::new();
        step(&mut set, 0, std::slice::from_ref(&pass));
        step(&mut set, 1, std::slice::from_ref(&pass));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_dedupe_by_identity() {
        let pass = PassEvent::new(0, 10, 3, Some(4));
        let mut set = ActiveEventSet::deduplicating();
        step(&mut set, 0, std::slice::from_ref(&pass));
        step(&mut set, 1, std::slice::from_ref(&pass));
        assert_eq!(set.len(), 1);

        let other = PassEvent::new(0, 10, 3, None);
        assert_eq!(set.absorb([&other]), 1);
    }

    #[test]
    fn test_expired_pass_not_absorbed() {
        let mut set = ActiveEventSet::new();
        set.prune(50);
        assert_eq!(set.absorb([&PassEvent::new(10, 20, 1, None)]), 0);
        assert!(set.iter().all(|p| p.base.end_frame >= 50));
    }

    #[test]
    fn test_degenerate_window_in_progress() {
        let mut set = ActiveEventSet::new();
        step(&mut set, 5, &[PassEvent::new(5, 5, 1, Some(2))]);
        let progress: Vec<f64> = set.in_progress(5).map(|(_, p)| p).collect();
        assert_eq!(progress, vec![1.0]);
    }

    #[test]
    fn test_absorbed_before_start_waits() {
        let mut set = ActiveEventSet::new();
        step(&mut set, 3, &[PassEvent::new(5, 8, 1, Some(2))]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.in_progress(3).count(), 0);
        set.prune(6);
        assert_eq!(set.in_progress(6).count(), 1);
    }
}
