//! Chat session view-state machine.
//!
//! A session starts on the welcome screen and moves to the conversation view
//! on the first accepted submit. It never moves back on its own; `reset`
//! models a full reload.

use std::time::Duration;

use thiserror::Error;

use crate::state::{ChatMessage, ChatRole, MessageId, MessageStatus, ViewMode};

pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1000);

pub const CANNED_REPLY: &str = "I am a TalentForge AI assistant. I can help with interview preparation, resume reviews, and job search strategies. How can I assist you further?";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated backend round-trip before the placeholder is filled.
    pub response_delay: Duration,
    pub reply: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            response_delay: DEFAULT_RESPONSE_DELAY,
            reply: CANNED_REPLY.to_string(),
        }
    }
}

/// Why a submit was ignored. Both cases are silent for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("message is empty")]
    Empty,
    #[error("a response is still pending")]
    Busy,
}

/// Result of an accepted submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub user: MessageId,
    pub placeholder: MessageId,
    /// True when this submit moved the session out of the welcome screen.
    pub first_message: bool,
    /// When the caller should invoke `complete_response`.
    pub complete_after: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    config: SessionConfig,
    messages: Vec<ChatMessage>,
    is_loading: bool,
    pending: Option<MessageId>,
    next_id: u64,
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Derived from the transcript so the two can never disagree.
    pub fn view_mode(&self) -> ViewMode {
        if self.messages.is_empty() {
            ViewMode::Welcome
        } else {
            ViewMode::Conversation
        }
    }

    /// The placeholder waiting for `complete_response`, if any.
    pub fn pending(&self) -> Option<MessageId> {
        self.pending
    }

    pub fn message(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn submit(&mut self, text: &str) -> Result<Submitted, SubmitRejected> {
        if text.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.is_loading {
            return Err(SubmitRejected::Busy);
        }

        let first_message = self.messages.is_empty();
        let user = self.push(ChatRole::User, text.to_string(), MessageStatus::Complete);
        let placeholder = self.push(ChatRole::Assistant, String::new(), MessageStatus::Pending);

        self.is_loading = true;
        self.pending = Some(placeholder);

        Ok(Submitted {
            user,
            placeholder,
            first_message,
            complete_after: self.config.response_delay,
        })
    }

    /// Fill the pending placeholder with the canned reply.
    pub fn complete_response(&mut self) -> Option<MessageId> {
        let id = self.pending.take()?;
        self.is_loading = false;

        let reply = self.config.reply.clone();
        let message = self.messages.iter_mut().find(|m| m.id == id)?;
        message.content = reply;
        message.status = MessageStatus::Complete;
        Some(id)
    }

    /// The live text behind a copy affordance.
    pub fn copy_text(&self, id: MessageId) -> Option<String> {
        self.message(id)
            .filter(|m| m.is_copyable())
            .map(|m| m.content.clone())
    }

    pub fn last_copyable(&self) -> Option<MessageId> {
        self.messages.iter().rev().find(|m| m.is_copyable()).map(|m| m.id)
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.is_loading = false;
        self.pending = None;
    }

    fn push(&mut self, role: ChatRole, content: String, status: MessageStatus) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            status,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_view_invariant(session: &ChatSession) {
        let expected = if session.messages().is_empty() {
            ViewMode::Welcome
        } else {
            ViewMode::Conversation
        };
        assert_eq!(session.view_mode(), expected);
    }

    #[test]
    fn test_first_submit_enters_conversation() {
        let mut session = ChatSession::default();
        assert_eq!(session.view_mode(), ViewMode::Welcome);

        let submitted = session.submit("Hello").unwrap();
        assert!(submitted.first_message);
        assert_eq!(submitted.complete_after, Duration::from_millis(1000));
        assert_eq!(session.view_mode(), ViewMode::Conversation);
        assert!(session.is_loading());

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].content, "Hello");
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert!(messages[1].content.is_empty());
        assert!(messages[1].is_pending());
    }

    #[test]
    fn test_complete_response_fills_placeholder() {
        let mut session = ChatSession::default();
        let submitted = session.submit("Hello").unwrap();

        assert_eq!(session.complete_response(), Some(submitted.placeholder));
        assert!(!session.is_loading());

        let reply = session.message(submitted.placeholder).unwrap();
        assert_eq!(reply.content, CANNED_REPLY);
        assert!(reply.is_copyable());
        assert!(!session.message(submitted.user).unwrap().is_copyable());
    }

    #[test]
    fn test_complete_without_pending_is_noop() {
        let mut session = ChatSession::default();
        assert_eq!(session.complete_response(), None);
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let mut session = ChatSession::default();
        assert_eq!(session.submit(""), Err(SubmitRejected::Empty));
        assert_eq!(session.submit("   "), Err(SubmitRejected::Empty));
        assert_eq!(session.submit("\n\t"), Err(SubmitRejected::Empty));
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
        assert_view_invariant(&session);
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut session = ChatSession::default();
        session.submit("A").unwrap();
        assert_eq!(session.submit("B"), Err(SubmitRejected::Busy));

        let users: Vec<_> = session
            .messages()
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(users, vec!["A"]);
    }

    #[test]
    fn test_message_count_tracks_accepted_submits() {
        let mut session = ChatSession::default();
        let inputs = ["one", "", "two", "  ", "three"];
        let mut accepted = 0;

        for text in inputs {
            if session.submit(text).is_ok() {
                accepted += 1;
                // A second submit before completion never lands.
                assert!(session.submit("interleaved").is_err());
                session.complete_response();
            }
            assert_view_invariant(&session);
        }

        assert_eq!(accepted, 3);
        assert_eq!(session.messages().len(), 2 * accepted);
        assert!(session.messages().iter().all(|m| !m.is_pending()));
    }

    #[test]
    fn test_copy_text_only_for_completed_replies() {
        let mut session = ChatSession::default();
        let submitted = session.submit("Hello").unwrap();

        assert_eq!(session.copy_text(submitted.placeholder), None);
        assert_eq!(session.copy_text(submitted.user), None);
        assert_eq!(session.last_copyable(), None);

        session.complete_response();
        assert_eq!(
            session.copy_text(submitted.placeholder).as_deref(),
            Some(CANNED_REPLY)
        );
        assert_eq!(session.last_copyable(), Some(submitted.placeholder));
        assert_eq!(session.copy_text(MessageId(99)), None);
    }

    #[test]
    fn test_reset_returns_to_welcome() {
        let mut session = ChatSession::default();
        session.submit("Hello").unwrap();
        session.reset();

        assert_eq!(session.view_mode(), ViewMode::Welcome);
        assert!(!session.is_loading());
        assert_eq!(session.complete_response(), None);

        // Ids keep increasing across resets.
        let submitted = session.submit("Again").unwrap();
        assert!(submitted.first_message);
        assert_eq!(submitted.user, MessageId(2));
    }

    #[test]
    fn test_custom_delay_and_reply() {
        let mut session = ChatSession::new(SessionConfig {
            response_delay: Duration::from_millis(250),
            reply: "ok".to_string(),
        });
        let submitted = session.submit("hi").unwrap();
        assert_eq!(submitted.complete_after, Duration::from_millis(250));
        session.complete_response();
        assert_eq!(session.messages()[1].content, "ok");
    }
}
