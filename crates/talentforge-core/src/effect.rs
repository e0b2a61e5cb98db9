//! Side effects requested by core operations.
//!
//! Core components never sleep, touch the network or reach platform
//! services themselves. Each operation mutates its own state and returns the
//! effects the front-end runtime has to execute. Every effect completes at
//! most once and feeds its result back through the matching `Dashboard`
//! completion handler. Nothing is retried and nothing is cancelled.

use std::time::Duration;

use crate::geolocation::PositionOptions;
use crate::state::MessageId;
use crate::theme::ThemeMode;
use crate::toast::{Notice, ToastId};

/// Deferred work, delivered back to `Dashboard::on_timer` once `after` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// The simulated backend round-trip for the given placeholder.
    CompleteResponse(MessageId),
    /// A toast's display time ran out.
    FadeToast(ToastId),
    /// A faded toast's grace period ran out.
    RemoveToast(ToastId),
    /// Swap the weather widget to the demo dataset.
    ShowDemoWeather { located: bool },
    /// Re-check that the transcript actually reached the bottom.
    VerifyScroll,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fire `timer` after `after`.
    Schedule { after: Duration, timer: Timer },
    /// Issue the single news request.
    FetchNews,
    /// Write text to the system clipboard.
    CopyToClipboard { text: String },
    /// Ask the platform for the current position.
    Locate(PositionOptions),
    /// Persist the theme preference.
    PersistTheme(ThemeMode),
}

impl Effect {
    pub fn schedule(after: Duration, timer: Timer) -> Self {
        Effect::Schedule { after, timer }
    }
}

/// What a widget wants done after a state change: toasts to raise and
/// effects to run. The dashboard turns notices into toasts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    pub notices: Vec<Notice>,
    pub effects: Vec<Effect>,
}

impl Reaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
