//! Session Hub
//!
//! Registry of live dashboard sessions. It routes outbound messages to a
//! session's socket and enforces the session limit. Selection state never
//! lives here; each session's controller is owned by its receive task.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// Tracks all live sessions
pub struct SessionHub {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    config: HubConfig,
}

/// Configuration for the session hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent sessions
    pub max_sessions: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { max_sessions: 1000 }
    }
}

/// Handle for sending messages to a specific session
pub struct SessionHandle {
    /// Channel sender for this session's socket
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    pub connected_at: DateTime<Utc>,
}

impl SessionHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Register a new session
    ///
    /// Returns the session ID on success, or an error if the session limit
    /// has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<SessionId, HubError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(HubError::TooManySessions {
                limit: self.config.max_sessions,
            });
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            SessionHandle {
                sender,
                connected_at: Utc::now(),
            },
        );

        tracing::info!(session_id = %id, sessions = sessions.len(), "Session started");
        Ok(id)
    }

    /// Remove a session
    pub async fn unregister(&self, id: &str) {
        if let Some(handle) = self.sessions.write().await.remove(id) {
            let duration = Utc::now() - handle.connected_at;
            tracing::info!(
                session_id = %id,
                duration_secs = duration.num_seconds(),
                "Session ended"
            );
        }
    }

    /// Send a message directly to a specific session
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(id).ok_or(HubError::SessionNotFound)?;

        handle
            .sender
            .send(message)
            .map_err(|_| HubError::SendFailed)
    }

    /// Get the current session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn max_sessions(&self) -> usize {
        self.config.max_sessions
    }
}

/// Errors that can occur in the session hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many sessions (limit: {limit})")]
    TooManySessions { limit: usize },

    #[error("Session not found")]
    SessionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}
