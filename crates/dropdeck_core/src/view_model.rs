use crate::{DownloadState, FileItem};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// A submission batch is in flight.
    pub fetching: bool,
    /// The last batch finished with an empty registry.
    pub fetch_failed: bool,
    pub cards: Vec<CardView>,
    pub dirty: bool,
}

/// One rendered card: the item plus the visual state of its two actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub item: FileItem,
    pub download: DownloadState,
    pub stream: StreamPanelView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StreamPanelView {
    #[default]
    Collapsed,
    Loading,
    /// Player mounted and visible, bound to the generated link.
    Playing { url: String },
    /// Inline error shown in place of a player; no automatic retry.
    Failed { message: String },
}
