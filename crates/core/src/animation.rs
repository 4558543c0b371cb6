//! Clear animation - progress of one line-clear event
//!
//! Pure data: the engine advances it on every tick and finalizes the board
//! cells once it completes. The visual phase is derived from progress only.

use crate::types::{CellPos, ClearPhase};

#[derive(Debug, Clone, PartialEq)]
pub struct ClearAnimation {
    cells: Vec<CellPos>,
    progress: f32,
}

impl ClearAnimation {
    /// Start an animation at progress 0 over the given cells
    pub fn new(cells: Vec<CellPos>) -> Self {
        Self {
            cells,
            progress: 0.0,
        }
    }

    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    /// Always within `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> ClearPhase {
        ClearPhase::from_progress(self.progress)
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance progress; returns true once it has reached 1
    ///
    /// Negative and NaN amounts advance by nothing, keeping progress
    /// monotonic.
    pub fn advance(&mut self, amount: f32) -> bool {
        self.progress = (self.progress + amount.max(0.0)).min(1.0);
        self.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim() -> ClearAnimation {
        ClearAnimation::new(vec![CellPos::new(0, 0), CellPos::new(0, 1)])
    }

    #[test]
    fn test_advance_is_monotonic_and_clamped() {
        let mut a = anim();
        let mut last = a.progress();
        for step in [0.1, 0.0, -0.5, f32::NAN, 0.25, 2.0, 0.3] {
            a.advance(step);
            assert!(a.progress() >= last);
            assert!((0.0..=1.0).contains(&a.progress()));
            last = a.progress();
        }
        assert_eq!(a.progress(), 1.0);
    }

    #[test]
    fn test_finishes_exactly_at_one() {
        let mut a = anim();
        assert!(!a.advance(0.5));
        assert!(!a.advance(0.25));
        assert!(a.advance(0.25));
        assert!(a.advance(0.1), "stays finished");
    }

    #[test]
    fn test_phase_follows_progress() {
        let mut a = anim();
        assert_eq!(a.phase(), ClearPhase::Flash);
        a.advance(0.3);
        assert_eq!(a.phase(), ClearPhase::Collapse);
    }
}
