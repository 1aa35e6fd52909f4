use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_debug, client_error};

use crate::{ApiError, ApiSettings, ClientEvent, FileApi, HttpApi, LinkPurpose, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Resolve {
        session: SessionId,
        url: String,
    },
    RequestLink {
        session: SessionId,
        item_id: String,
        domain: String,
        purpose: LinkPurpose,
    },
}

/// Bridges a synchronous shell to the async API client.
///
/// Commands are executed on a background tokio runtime; completions come
/// back over a channel as [`ClientEvent`]s. Link requests for different
/// items may run concurrently; resolve sequencing is the core's job (it
/// keeps at most one resolve outstanding).
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = Arc::new(HttpApi::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("client runtime failed to start: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    /// A detached command sender, for shells that move the handle itself
    /// into an event-pump thread.
    pub fn commands(&self) -> mpsc::Sender<ClientCommand> {
        self.cmd_tx.clone()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    api: &dyn FileApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Resolve { session, url } => {
            client_debug!("resolve session={} url={}", session, url);
            let outcome = api.resolve(&url).await;
            let _ = event_tx.send(ClientEvent::ResolveDone {
                session,
                url,
                outcome,
            });
        }
        ClientCommand::RequestLink {
            session,
            item_id,
            domain,
            purpose,
        } => {
            client_debug!("link session={} item={} domain={}", session, item_id, domain);
            let outcome = api.link(&domain, &item_id).await;
            let _ = event_tx.send(ClientEvent::LinkDone {
                session,
                item_id,
                purpose,
                outcome,
            });
        }
    }
}
