//! Per-request session context.
//!
//! The gallery keeps no per-user state. The only thing a client can carry
//! is an opaque session identifier, which the listing cache may use to
//! give each client its own stable shuffled ordering.

use std::fmt;

const MAX_SESSION_ID_LEN: usize = 64;

/// An opaque, validated session identifier.
///
/// Only `[A-Za-z0-9_-]{1,64}` is accepted so the value is safe to embed
/// in cache keys and file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_SESSION_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context carried with every service call.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub session_id: Option<SessionId>,
    pub request_id: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
