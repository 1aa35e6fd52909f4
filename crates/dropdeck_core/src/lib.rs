//! Dropdeck core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{LinkOutcome, LinkPurpose, Msg, ResolveOutcome};
pub use state::{AppState, DownloadState, FileItem, ItemRegistry, SessionId};
pub use update::update;
pub use view_model::{AppViewModel, CardView, StreamPanelView};
