use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::view_model::{AppViewModel, CardView, StreamPanelView};

/// Generation tag for one submission batch. Monotonically increasing;
/// completions carrying a stale id are discarded.
pub type SessionId = u64;

/// A single file resolved from a user-submitted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    /// Backend-assigned identifier, unique within a session.
    pub id: String,
    pub name: String,
    /// Thumbnail URI.
    pub image: String,
    /// Source host the item was resolved from.
    pub domain: String,
}

/// Visual state of a card's download action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadState {
    #[default]
    Idle,
    Busy,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum StreamState {
    #[default]
    Collapsed,
    Loading,
    Playing,
}

/// Per-item stream panel state machine.
///
/// The player URL is retained across collapse so re-expanding never issues a
/// new link request. A failed request collapses the panel with an inline
/// error; the next toggle starts over and may fetch again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct StreamSession {
    pub(crate) state: StreamState,
    pub(crate) player_url: Option<String>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct CardState {
    pub(crate) download: DownloadState,
    pub(crate) stream: StreamSession,
}

/// What a stream toggle decided; only `Fetch` produces a network effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StreamToggle {
    Ignored,
    Expanded,
    Hidden,
    Fetch { domain: String },
}

/// Ordered, deduplicated collection of resolved items.
///
/// Insertion order is display order. Invariant: no two entries share an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemRegistry {
    items: Vec<FileItem>,
    seen: HashSet<String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends items whose id is not already present, preserving input
    /// order, and returns the subset actually added. Idempotent.
    pub fn upsert_many(&mut self, items: Vec<FileItem>) -> Vec<FileItem> {
        let mut added = Vec::new();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item.clone());
                added.push(item);
            }
        }
        added
    }

    /// Clears all entries. Called once per new submission.
    pub fn reset(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[FileItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&FileItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionId,
    input: String,
    registry: ItemRegistry,
    cards: BTreeMap<String, CardState>,
    pending_urls: VecDeque<String>,
    fetching: bool,
    fetch_failed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active submission generation; effects and completions carry this.
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Returns whether a render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let cards = self
            .registry
            .items()
            .iter()
            .map(|item| {
                let card = self.cards.get(&item.id).cloned().unwrap_or_default();
                CardView {
                    item: item.clone(),
                    download: card.download,
                    stream: stream_panel_view(&card.stream),
                }
            })
            .collect();
        AppViewModel {
            fetching: self.fetching,
            fetch_failed: self.fetch_failed,
            cards,
            dirty: self.dirty,
        }
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Starts a new submission batch: bumps the session generation, discards
    /// all prior items and per-item state, and queues the remaining URLs.
    /// Caller guarantees `urls` is non-empty; returns the first URL to
    /// resolve alongside the new session id.
    pub(crate) fn begin_batch(&mut self, urls: Vec<String>) -> (SessionId, String) {
        self.session += 1;
        self.registry.reset();
        self.cards.clear();
        self.pending_urls = urls.into();
        let first = self.pending_urls.pop_front().unwrap_or_default();
        self.fetching = true;
        self.fetch_failed = false;
        self.dirty = true;
        (self.session, first)
    }

    pub(crate) fn next_url(&mut self) -> Option<String> {
        self.pending_urls.pop_front()
    }

    /// Ends the batch: exits the fetching state, clears the input, and
    /// raises the aggregate failure flag when nothing resolved.
    pub(crate) fn finish_batch(&mut self) {
        self.fetching = false;
        self.fetch_failed = self.registry.is_empty();
        self.input.clear();
        self.dirty = true;
    }

    /// Admits resolved items, skipping ids already present, and creates
    /// per-item state for the newly added ones.
    pub(crate) fn admit_items(&mut self, items: Vec<FileItem>) -> usize {
        let added = self.registry.upsert_many(items);
        for item in &added {
            self.cards.insert(item.id.clone(), CardState::default());
        }
        if !added.is_empty() {
            self.dirty = true;
        }
        added.len()
    }

    /// Idle/Errored -> Busy. Returns the item's domain when a link request
    /// should be issued; `None` while Busy or for unknown items.
    pub(crate) fn request_download(&mut self, item_id: &str) -> Option<String> {
        let domain = self.registry.get(item_id)?.domain.clone();
        let card = self.cards.get_mut(item_id)?;
        match card.download {
            DownloadState::Busy => None,
            DownloadState::Idle | DownloadState::Errored => {
                card.download = DownloadState::Busy;
                self.dirty = true;
                Some(domain)
            }
        }
    }

    /// Busy -> Idle on success, Busy -> Errored on failure. Returns whether
    /// the transition applied (the card exists and was Busy).
    pub(crate) fn complete_download(&mut self, item_id: &str, ok: bool) -> bool {
        let Some(card) = self.cards.get_mut(item_id) else {
            return false;
        };
        if card.download != DownloadState::Busy {
            return false;
        }
        card.download = if ok {
            DownloadState::Idle
        } else {
            DownloadState::Errored
        };
        self.dirty = true;
        true
    }

    /// Drives the stream panel state machine for one toggle.
    pub(crate) fn toggle_stream(&mut self, item_id: &str) -> StreamToggle {
        let Some(domain) = self.registry.get(item_id).map(|item| item.domain.clone()) else {
            return StreamToggle::Ignored;
        };
        let Some(card) = self.cards.get_mut(item_id) else {
            return StreamToggle::Ignored;
        };
        match card.stream.state {
            StreamState::Loading => StreamToggle::Ignored,
            StreamState::Playing => {
                // Player markup is retained; collapsing only hides it.
                card.stream.state = StreamState::Collapsed;
                self.dirty = true;
                StreamToggle::Hidden
            }
            StreamState::Collapsed => {
                if card.stream.player_url.is_some() {
                    card.stream.state = StreamState::Playing;
                    self.dirty = true;
                    StreamToggle::Expanded
                } else {
                    card.stream.state = StreamState::Loading;
                    card.stream.error = None;
                    self.dirty = true;
                    StreamToggle::Fetch { domain }
                }
            }
        }
    }

    /// Loading -> Playing on a good link, Loading -> Collapsed with an
    /// inline error otherwise. Ignored unless the panel is Loading.
    pub(crate) fn resolve_stream(&mut self, item_id: &str, result: Result<String, String>) {
        let Some(card) = self.cards.get_mut(item_id) else {
            return;
        };
        if card.stream.state != StreamState::Loading {
            return;
        }
        match result {
            Ok(url) => {
                card.stream.player_url = Some(url);
                card.stream.state = StreamState::Playing;
            }
            Err(message) => {
                card.stream.error = Some(message);
                card.stream.state = StreamState::Collapsed;
            }
        }
        self.dirty = true;
    }
}

fn stream_panel_view(stream: &StreamSession) -> StreamPanelView {
    match stream.state {
        StreamState::Loading => StreamPanelView::Loading,
        StreamState::Playing => StreamPanelView::Playing {
            url: stream.player_url.clone().unwrap_or_default(),
        },
        StreamState::Collapsed => match &stream.error {
            Some(message) => StreamPanelView::Failed {
                message: message.clone(),
            },
            None => StreamPanelView::Collapsed,
        },
    }
}
