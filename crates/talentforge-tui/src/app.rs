use ratatui::layout::Rect;
use talentforge_core::{Dashboard, Effect, MessageId, ViewMode, SUGGESTIONS};

use crate::keymap::Keymap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Transcript,
    Suggestions,
}

/// Clickable regions recorded during the last render.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub transcript: Option<Rect>,
    pub input: Option<Rect>,
    pub send: Option<Rect>,
    pub sidebar_toggle: Option<Rect>,
    pub theme_toggle: Option<Rect>,
    pub weather_refresh: Option<Rect>,
    pub weather_locate: Option<Rect>,
    pub copy: Vec<(Rect, MessageId)>,
    pub suggestions: Vec<(Rect, usize)>,
}

pub struct App {
    pub should_quit: bool,
    pub dashboard: Dashboard,
    pub keymap: Keymap,
    pub focus: Focus,

    /// Completed reply highlighted in the transcript.
    pub selected_reply: Option<MessageId>,
    pub suggestion_idx: usize,

    /// First transcript row of each message, from the last render.
    pub message_rows: Vec<(MessageId, u16)>,
    pub areas: HitAreas,

    // Animation state for the "Thinking..." indicator
    pub animation_frame: u8,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            should_quit: false,
            dashboard,
            keymap: Keymap::new(),
            focus: Focus::Input,
            selected_reply: None,
            suggestion_idx: 0,
            message_rows: Vec::new(),
            areas: HitAreas::default(),
            animation_frame: 0,
        }
    }

    pub fn tick_animation(&mut self) {
        if self.dashboard.session().is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Suggestions are on the welcome screen, and in the sidebar once the
    /// conversation has started.
    pub fn suggestions_visible(&self) -> bool {
        self.dashboard.view_mode() == ViewMode::Welcome || self.dashboard.layout().sidebar_open()
    }

    pub fn cycle_focus(&mut self) {
        let conversation = self.dashboard.view_mode() == ViewMode::Conversation;
        let order = [Focus::Input, Focus::Transcript, Focus::Suggestions];
        let start = order.iter().position(|f| *f == self.focus).unwrap_or(0);

        self.focus = (1..=order.len())
            .map(|step| order[(start + step) % order.len()])
            .find(|focus| match focus {
                Focus::Input => true,
                Focus::Transcript => conversation,
                Focus::Suggestions => self.suggestions_visible(),
            })
            .unwrap_or(Focus::Input);
    }

    /// Keep focus on something that is still on screen.
    pub fn ensure_focus_visible(&mut self) {
        let visible = match self.focus {
            Focus::Input => true,
            Focus::Transcript => self.dashboard.view_mode() == ViewMode::Conversation,
            Focus::Suggestions => self.suggestions_visible(),
        };
        if !visible {
            self.focus = Focus::Input;
        }
    }

    pub fn apply_suggestion(&mut self, idx: usize) {
        if self.dashboard.select_suggestion(idx).is_some() {
            self.suggestion_idx = idx;
            self.focus = Focus::Input;
        }
    }

    pub fn suggestion_nav_down(&mut self) {
        self.suggestion_idx = (self.suggestion_idx + 1).min(SUGGESTIONS.len() - 1);
    }

    pub fn suggestion_nav_up(&mut self) {
        self.suggestion_idx = self.suggestion_idx.saturating_sub(1);
    }

    fn copyable_replies(&self) -> Vec<MessageId> {
        self.dashboard
            .session()
            .messages()
            .iter()
            .filter(|m| m.is_copyable())
            .map(|m| m.id)
            .collect()
    }

    pub fn select_next_reply(&mut self) {
        let replies = self.copyable_replies();
        let next = match self.selected_reply.and_then(|id| replies.iter().position(|r| *r == id)) {
            Some(idx) => replies.get(idx + 1).or(replies.last()),
            None => replies.first(),
        };
        self.selected_reply = next.copied();
        self.reveal_selected();
    }

    pub fn select_prev_reply(&mut self) {
        let replies = self.copyable_replies();
        let prev = match self.selected_reply.and_then(|id| replies.iter().position(|r| *r == id)) {
            Some(idx) => replies.get(idx.saturating_sub(1)),
            None => replies.last(),
        };
        self.selected_reply = prev.copied();
        self.reveal_selected();
    }

    /// Scroll so the selected reply's first row is on screen.
    fn reveal_selected(&mut self) {
        let Some(id) = self.selected_reply else { return };
        let Some(&(_, row)) = self.message_rows.iter().find(|(m, _)| *m == id) else {
            return;
        };

        let scroll = self.dashboard.scroll();
        let (offset, viewport) = (scroll.offset(), self.transcript_viewport());
        if row < offset {
            self.dashboard.scroll_transcript_up(offset - row);
        } else if viewport > 0 && row >= offset + viewport {
            self.dashboard.scroll_transcript_down(row + 1 - offset - viewport);
        }
    }

    fn transcript_viewport(&self) -> u16 {
        self.areas
            .transcript
            .map(|r| r.height.saturating_sub(2))
            .unwrap_or(0)
    }

    /// Copy the selected reply, or the newest one when nothing is selected.
    pub fn copy_selected(&mut self) -> Vec<Effect> {
        match self.selected_reply.or_else(|| self.dashboard.session().last_copyable()) {
            Some(id) => self.dashboard.copy_message(id),
            None => Vec::new(),
        }
    }

    pub fn new_chat(&mut self) {
        self.dashboard.new_chat();
        self.selected_reply = None;
        self.message_rows.clear();
        self.focus = Focus::Input;
    }
}
