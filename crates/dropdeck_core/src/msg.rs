use crate::{FileItem, SessionId};

/// Outcome of resolving one submitted URL against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Backend reported success with at least one item.
    Resolved(Vec<FileItem>),
    /// Backend reported success but supplied no items.
    Empty,
    /// Backend failure, transport error, or malformed response.
    Failed(String),
}

/// Outcome of a link-generation request for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Issued(String),
    Failed(String),
}

/// What a generated link is for; download opens it, stream mounts a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPurpose {
    Download,
    Stream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for resolution.
    UrlsSubmitted,
    /// User clicked the download action on a card.
    DownloadClicked { item_id: String },
    /// User toggled the stream panel on a card.
    StreamToggled { item_id: String },
    /// Client completion for one resolve request.
    ResolveDone {
        session: SessionId,
        url: String,
        outcome: ResolveOutcome,
    },
    /// Client completion for one link request.
    LinkDone {
        session: SessionId,
        item_id: String,
        purpose: LinkPurpose,
        outcome: LinkOutcome,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
