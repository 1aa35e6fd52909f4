use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use dropdeck_client::{ApiSettings, ClientCommand, ClientEvent, ClientHandle};
use dropdeck_core::{Effect, FileItem, LinkOutcome, LinkPurpose, Msg, ResolveOutcome};

/// Executes core effects against the client and pumps completions back as
/// messages. Owns the command side of the [`ClientHandle`]; the handle
/// itself moves into the event-pump thread.
pub struct EffectRunner {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        let handle = ClientHandle::new(settings)?;
        let cmd_tx = handle.commands();
        spawn_event_pump(handle, msg_tx);
        Ok(Self { cmd_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ResolveUrl { session, url } => {
                    client_info!("ResolveUrl session={} url={}", session, url);
                    let _ = self.cmd_tx.send(ClientCommand::Resolve { session, url });
                }
                Effect::RequestLink {
                    session,
                    item_id,
                    domain,
                    purpose,
                } => {
                    client_info!(
                        "RequestLink session={} item={} domain={} purpose={:?}",
                        session,
                        item_id,
                        domain,
                        purpose
                    );
                    let _ = self.cmd_tx.send(ClientCommand::RequestLink {
                        session,
                        item_id,
                        domain,
                        purpose: map_purpose_out(purpose),
                    });
                }
                Effect::OpenLink { url } => {
                    // Detached launch: the spawned browser inherits no handle
                    // back to this process (the noopener/noreferrer analog).
                    if let Err(err) = open::that_detached(&url) {
                        client_warn!("Could not open {}: {}", url, err);
                        println!("download link: {url}");
                    }
                }
            }
        }
    }
}

fn spawn_event_pump(handle: ClientHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        if let Some(event) = handle.try_recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::ResolveDone {
            session,
            url,
            outcome,
        } => {
            let outcome = match outcome {
                dropdeck_client::ResolveOutcome::Resolved(items) => {
                    ResolveOutcome::Resolved(items.into_iter().map(map_item).collect())
                }
                dropdeck_client::ResolveOutcome::Empty => {
                    client_warn!("No items for {}", url);
                    ResolveOutcome::Empty
                }
                dropdeck_client::ResolveOutcome::Failed(message) => {
                    client_warn!("Resolve failed for {}: {}", url, message);
                    ResolveOutcome::Failed(message)
                }
            };
            Msg::ResolveDone {
                session,
                url,
                outcome,
            }
        }
        ClientEvent::LinkDone {
            session,
            item_id,
            purpose,
            outcome,
        } => {
            let outcome = match outcome {
                dropdeck_client::LinkOutcome::Issued(url) => LinkOutcome::Issued(url),
                dropdeck_client::LinkOutcome::Failed(message) => {
                    client_warn!("Link failed for item {}: {}", item_id, message);
                    LinkOutcome::Failed(message)
                }
            };
            Msg::LinkDone {
                session,
                item_id,
                purpose: map_purpose_in(purpose),
                outcome,
            }
        }
    }
}

fn map_item(item: dropdeck_client::FileItem) -> FileItem {
    FileItem {
        id: item.id,
        name: item.name,
        image: item.image,
        domain: item.domain,
    }
}

fn map_purpose_out(purpose: LinkPurpose) -> dropdeck_client::LinkPurpose {
    match purpose {
        LinkPurpose::Download => dropdeck_client::LinkPurpose::Download,
        LinkPurpose::Stream => dropdeck_client::LinkPurpose::Stream,
    }
}

fn map_purpose_in(purpose: dropdeck_client::LinkPurpose) -> LinkPurpose {
    match purpose {
        dropdeck_client::LinkPurpose::Download => LinkPurpose::Download,
        dropdeck_client::LinkPurpose::Stream => LinkPurpose::Stream,
    }
}
