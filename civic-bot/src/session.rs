//! Per-user conversation state for the report flow.
//!
//! State is held in memory only, keyed by user id, and lost on restart.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use report_store::{IssueType, Priority};

/// Where a user is in the report flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    /// `/report` was sent; waiting for one of the issue types.
    AwaitingType,
    /// Type chosen; waiting for the photo.
    AwaitingPhoto {
        issue_type: IssueType,
        priority: Priority,
    },
    /// Photo stored but it had no GPS tags; waiting for a shared location.
    AwaitingLocation {
        issue_type: IssueType,
        priority: Priority,
        image_path: PathBuf,
    },
}

impl ConversationState {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingType => "awaiting_type",
            ConversationState::AwaitingPhoto { .. } => "awaiting_photo",
            ConversationState::AwaitingLocation { .. } => "awaiting_location",
        }
    }

    /// The type and priority chosen so far, if any.
    pub fn selection(&self) -> Option<(IssueType, Priority)> {
        match self {
            ConversationState::AwaitingPhoto {
                issue_type,
                priority,
            }
            | ConversationState::AwaitingLocation {
                issue_type,
                priority,
                ..
            } => Some((*issue_type, *priority)),
            ConversationState::Idle | ConversationState::AwaitingType => None,
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversation states keyed by user id. Users without an entry are [`ConversationState::Idle`].
///
/// Updates run on separate tasks, so a handler takes [`SessionStore::lock_user`] before reading
/// a state it will later write back.
#[derive(Default)]
pub struct SessionStore {
    states: DashMap<i64, ConversationState>,
    turns: DashMap<i64, Arc<Mutex<()>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `user_id` (a copy; the map is never locked across awaits).
    pub fn get(&self, user_id: i64) -> ConversationState {
        self.states
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn set(&self, user_id: i64, state: ConversationState) {
        if state == ConversationState::Idle {
            self.states.remove(&user_id);
        } else {
            self.states.insert(user_id, state);
        }
    }

    pub fn reset(&self, user_id: i64) {
        self.states.remove(&user_id);
    }

    /// Waits until no other update of `user_id` is in progress. Waiters are served in FIFO order.
    pub async fn lock_user(&self, user_id: i64) -> OwnedMutexGuard<()> {
        let turn = self.turns.entry(user_id).or_default().value().clone();
        turn.lock_owned().await
    }

    /// Number of users with a report in progress.
    pub fn active(&self) -> usize {
        self.states.len()
    }
}
