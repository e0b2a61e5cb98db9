//! UI-agnostic chat state types
//!
//! These types are shared by every front end and don't depend on any
//! specific UI framework.

use serde::{Deserialize, Serialize};

/// Identifier of a message within one session. Ids increase in append order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// A chat message in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub status: MessageStatus,
}

impl ChatMessage {
    /// Only completed assistant replies carry the copy affordance.
    pub fn is_copyable(&self) -> bool {
        self.role == ChatRole::Assistant && self.status == MessageStatus::Complete
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Whether a message's content is final.
///
/// Only the assistant placeholder is ever `Pending`; it becomes `Complete`
/// when the simulated response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    Pending,
    Complete,
}

/// Which top-level surface is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Welcome,
    Conversation,
}
