//! Dropdeck client: JSON API client and command/event bridge for the
//! remote file-resolution backend.
mod api;
mod handle;
mod types;

pub use api::{ApiSettings, FileApi, HttpApi};
pub use handle::{ClientCommand, ClientHandle};
pub use types::{
    ApiError, ClientEvent, FileItem, LinkOutcome, LinkPurpose, ResolveOutcome, SessionId,
};
