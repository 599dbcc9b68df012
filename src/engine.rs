//! Session registry
//!
//! [`SignalEngine`] owns one [`Session`] per active connection, keyed by
//! [`SessionId`]. Sessions are fully independent; the engine's `&mut`
//! receivers give each session exactly one writer at a time, so concurrent
//! sessions need no locking as long as callers shard or serialize access by
//! key. Ending a session discards its state immediately; any frame arriving
//! afterwards is rejected as a caller precondition violation.

use crate::config::EngineConfig;
use crate::error::SignalError;
use crate::session::Session;
use crate::types::{FrameInput, FrameOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Opaque per-session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stateful engine holding every active session
pub struct SignalEngine {
    config: EngineConfig,
    sessions: HashMap<SessionId, Session>,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalEngine {
    /// Create an engine with the default calibration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine whose new sessions use the given calibration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
        }
    }

    /// Allocate a fresh session: confidence at the ceiling, zero blinks
    pub fn start_session(&mut self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, Session::new(self.config.clone()));
        id
    }

    /// Allocate a session under a caller-chosen id, replacing any session
    /// already registered there
    pub fn start_session_with_id(&mut self, id: SessionId) {
        self.sessions.insert(id, Session::new(self.config.clone()));
    }

    /// Discard a session's state. Returns whether the session existed.
    pub fn end_session(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Apply one frame to one session, in arrival order
    pub fn process_frame(
        &mut self,
        id: &SessionId,
        input: FrameInput,
    ) -> Result<FrameOutput, SignalError> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SignalError::UnknownSession(id.to_string()))?;
        Ok(session.process_frame(input))
    }

    /// Read access to an active session
    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
