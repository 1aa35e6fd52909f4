use serde::Deserialize;
use thiserror::Error;

/// Generation tag echoed through every command and event so the shell can
/// discard completions from a superseded submission.
pub type SessionId = u64;

/// A single file as the backend reports it from `/generate_file`.
///
/// Unknown fields are ignored; missing fields decode to empty strings so one
/// sparse row cannot fail the whole envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub domain: String,
}

/// Outcome of one resolve request. Transport, status, and parse failures all
/// collapse into `Failed`; callers never see the distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(Vec<FileItem>),
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Issued(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPurpose {
    Download,
    Stream,
}

/// Completion events delivered by [`crate::ClientHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ResolveDone {
        session: SessionId,
        url: String,
        outcome: ResolveOutcome,
    },
    LinkDone {
        session: SessionId,
        item_id: String,
        purpose: LinkPurpose,
        outcome: LinkOutcome,
    },
}

/// Internal failure taxonomy. Collapsed to `Failed(message)` at the public
/// outcome boundary; only client construction surfaces it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("http status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Protocol(String),
    #[error("client construction failed: {0}")]
    Build(String),
}
