//! Transcript follow-to-bottom behavior, independent from message content.
//!
//! The renderer owns the real geometry, so a scroll request is only marked
//! here and applied at the next render via `apply_pending`. Because the
//! geometry can still change after that render, one deferred `verify`
//! re-requests the jump if the view did not end up at the bottom.

use std::time::Duration;

use crate::effect::{Effect, Timer};

/// Delay before the single re-check of a scroll-to-latest request.
pub const VERIFY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptScroll {
    offset: u16,
    viewport: u16,
    content: u16,
    pending_latest: bool,
}

impl TranscriptScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.content.saturating_sub(self.viewport)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn is_pending(&self) -> bool {
        self.pending_latest
    }

    /// Request a jump to the newest message and schedule the re-check.
    pub fn scroll_to_latest(&mut self) -> Effect {
        self.pending_latest = true;
        Effect::schedule(VERIFY_DELAY, Timer::VerifyScroll)
    }

    /// Record the geometry measured during render (rows).
    pub fn set_metrics(&mut self, viewport: u16, content: u16) {
        self.viewport = viewport;
        self.content = content;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Perform a pending jump. Returns whether one happened.
    pub fn apply_pending(&mut self) -> bool {
        if !self.pending_latest {
            return false;
        }
        self.offset = self.max_offset();
        self.pending_latest = false;
        true
    }

    /// The deferred re-check. Never schedules another one.
    pub fn verify(&mut self) {
        if !self.is_at_bottom() {
            tracing::debug!(offset = self.offset, max = self.max_offset(), "re-applying scroll");
            self.pending_latest = true;
        }
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.offset = self.offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_to_latest_applies_on_render() {
        let mut scroll = TranscriptScroll::new();
        let effect = scroll.scroll_to_latest();
        assert_eq!(effect, Effect::schedule(VERIFY_DELAY, Timer::VerifyScroll));
        assert!(scroll.is_pending());

        scroll.set_metrics(10, 25);
        assert!(scroll.apply_pending());
        assert_eq!(scroll.offset(), 15);
        assert!(scroll.is_at_bottom());
        assert!(!scroll.apply_pending());
    }

    #[test]
    fn test_verify_reapplies_after_late_growth() {
        let mut scroll = TranscriptScroll::new();
        scroll.scroll_to_latest();
        scroll.set_metrics(10, 25);
        scroll.apply_pending();

        // Content grew after the jump, before the re-check.
        scroll.set_metrics(10, 30);
        assert!(!scroll.is_at_bottom());
        scroll.verify();
        assert!(scroll.is_pending());
        scroll.apply_pending();
        assert_eq!(scroll.offset(), 20);
    }

    #[test]
    fn test_verify_at_bottom_does_nothing() {
        let mut scroll = TranscriptScroll::new();
        scroll.set_metrics(10, 5);
        scroll.verify();
        assert!(!scroll.is_pending());
    }

    #[test]
    fn test_manual_scroll_is_clamped() {
        let mut scroll = TranscriptScroll::new();
        scroll.set_metrics(10, 20);
        scroll.scroll_down(100);
        assert_eq!(scroll.offset(), 10);
        scroll.scroll_up(3);
        assert_eq!(scroll.offset(), 7);
        assert!(!scroll.is_at_bottom());
        scroll.scroll_up(100);
        assert_eq!(scroll.offset(), 0);

        // Shrinking content pulls the offset back in range.
        scroll.scroll_down(10);
        scroll.set_metrics(10, 12);
        assert_eq!(scroll.offset(), 2);
    }
}
