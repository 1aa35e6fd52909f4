use crate::{LinkPurpose, SessionId};

/// IO the shell must perform on behalf of the core.
///
/// Every network effect carries the session id of the submission that issued
/// it; completions echoing a stale id are discarded by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ResolveUrl {
        session: SessionId,
        url: String,
    },
    RequestLink {
        session: SessionId,
        item_id: String,
        domain: String,
        purpose: LinkPurpose,
    },
    /// Open a generated download link in a detached browsing context.
    OpenLink { url: String },
}
