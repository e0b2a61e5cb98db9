//! Transient notifications.
//!
//! A toast stays `Visible` for its duration, then `Fading` for a short grace
//! period, then it is detached. The runtime drives both transitions through
//! the timers returned here.

use std::time::Duration;

use crate::effect::{Effect, Timer};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);
pub const FADE_GRACE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

/// A toast waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub description: String,
    pub duration: Duration,
    pub phase: ToastPhase,
}

/// The stack of cards currently on screen.
#[derive(Debug, Default)]
pub struct ToastRegion {
    toasts: Vec<Toast>,
}

impl ToastRegion {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[derive(Debug, Default)]
pub struct ToastNotifier {
    // Created on first use, reused afterwards.
    region: Option<ToastRegion>,
    next_id: u64,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, title: &str, description: &str) -> Effect {
        self.show_for(title, description, DEFAULT_DURATION)
    }

    pub fn show_for(&mut self, title: &str, description: &str, duration: Duration) -> Effect {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        tracing::debug!(toast = id.0, title, "showing toast");
        self.region.get_or_insert_with(ToastRegion::default).toasts.push(Toast {
            id,
            title: title.to_string(),
            description: description.to_string(),
            duration,
            phase: ToastPhase::Visible,
        });

        Effect::schedule(duration, Timer::FadeToast(id))
    }

    pub fn raise(&mut self, notice: &Notice) -> Effect {
        self.show_for(&notice.title, &notice.description, notice.duration)
    }

    /// Start fading a toast. Returns the removal timer, or `None` for ids
    /// that are unknown or already fading.
    pub fn fade(&mut self, id: ToastId) -> Option<Effect> {
        let toast = self
            .region
            .as_mut()?
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.phase == ToastPhase::Visible)?;
        toast.phase = ToastPhase::Fading;
        Some(Effect::schedule(FADE_GRACE, Timer::RemoveToast(id)))
    }

    pub fn remove(&mut self, id: ToastId) {
        if let Some(region) = self.region.as_mut() {
            region.toasts.retain(|t| t.id != id);
        }
    }

    pub fn region(&self) -> Option<&ToastRegion> {
        self.region.as_ref()
    }

    /// Toasts in append order; empty before the region exists.
    pub fn toasts(&self) -> &[Toast] {
        self.region.as_ref().map(|r| r.toasts()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_created_lazily() {
        let mut notifier = ToastNotifier::new();
        assert!(notifier.region().is_none());
        assert!(notifier.toasts().is_empty());

        notifier.show("Hello", "world");
        assert!(notifier.region().is_some());
        assert_eq!(notifier.toasts().len(), 1);
    }

    #[test]
    fn test_show_schedules_fade_after_duration() {
        let mut notifier = ToastNotifier::new();
        let effect = notifier.show("Copied!", "Message content copied to clipboard");
        let id = notifier.toasts()[0].id;
        assert_eq!(
            effect,
            Effect::Schedule {
                after: DEFAULT_DURATION,
                timer: Timer::FadeToast(id)
            }
        );

        let effect = notifier.show_for("Locating", "Requesting your location...", Duration::from_millis(2000));
        let id = notifier.toasts()[1].id;
        assert_eq!(
            effect,
            Effect::schedule(Duration::from_millis(2000), Timer::FadeToast(id))
        );
    }

    #[test]
    fn test_fade_then_remove() {
        let mut notifier = ToastNotifier::new();
        notifier.show("A", "a");
        let id = notifier.toasts()[0].id;

        let effect = notifier.fade(id);
        assert_eq!(effect, Some(Effect::schedule(FADE_GRACE, Timer::RemoveToast(id))));
        // Fading is a state change, the card is still there.
        assert_eq!(notifier.toasts()[0].phase, ToastPhase::Fading);
        assert_eq!(notifier.fade(id), None);

        notifier.remove(id);
        assert!(notifier.toasts().is_empty());
        // The region is kept for reuse.
        assert!(notifier.region().is_some());
    }

    #[test]
    fn test_toasts_stack_in_append_order_without_dedup() {
        let mut notifier = ToastNotifier::new();
        notifier.show("Same", "x");
        notifier.show("Same", "x");
        notifier.show("Other", "y");

        let titles: Vec<_> = notifier.toasts().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Same", "Same", "Other"]);

        let first = notifier.toasts()[0].id;
        notifier.remove(first);
        let titles: Vec<_> = notifier.toasts().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Same", "Other"]);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut notifier = ToastNotifier::new();
        assert_eq!(notifier.fade(ToastId(7)), None);
        notifier.remove(ToastId(7));
        assert!(notifier.region().is_none());
    }
}
