use crate::state::StreamToggle;
use crate::{AppState, Effect, LinkOutcome, LinkPurpose, Msg, ResolveOutcome};

/// Pure update function: applies a message to state and returns any effects.
///
/// URL resolution within a batch is strictly sequential: exactly one
/// `Effect::ResolveUrl` is outstanding, and the next is emitted when its
/// `Msg::ResolveDone` arrives. Completions whose session id does not match
/// the active submission are discarded.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::UrlsSubmitted => {
            let urls = parse_urls(state.input());
            if urls.is_empty() {
                state.clear_input();
                return (state, Vec::new());
            }
            let (session, first) = state.begin_batch(urls);
            vec![Effect::ResolveUrl {
                session,
                url: first,
            }]
        }
        Msg::ResolveDone {
            session,
            url: _,
            outcome,
        } => {
            if session != state.session() {
                return (state, Vec::new());
            }
            match outcome {
                ResolveOutcome::Resolved(items) => {
                    state.admit_items(items);
                }
                // One failing or empty URL never aborts the batch.
                ResolveOutcome::Empty | ResolveOutcome::Failed(_) => {}
            }
            match state.next_url() {
                Some(next) => vec![Effect::ResolveUrl { session, url: next }],
                None => {
                    state.finish_batch();
                    Vec::new()
                }
            }
        }
        Msg::DownloadClicked { item_id } => match state.request_download(&item_id) {
            Some(domain) => vec![Effect::RequestLink {
                session: state.session(),
                item_id,
                domain,
                purpose: LinkPurpose::Download,
            }],
            None => Vec::new(),
        },
        Msg::StreamToggled { item_id } => match state.toggle_stream(&item_id) {
            StreamToggle::Fetch { domain } => vec![Effect::RequestLink {
                session: state.session(),
                item_id,
                domain,
                purpose: LinkPurpose::Stream,
            }],
            StreamToggle::Expanded | StreamToggle::Hidden | StreamToggle::Ignored => Vec::new(),
        },
        Msg::LinkDone {
            session,
            item_id,
            purpose,
            outcome,
        } => {
            if session != state.session() {
                return (state, Vec::new());
            }
            match purpose {
                LinkPurpose::Download => match outcome {
                    LinkOutcome::Issued(url) if !url.trim().is_empty() => {
                        if state.complete_download(&item_id, true) {
                            vec![Effect::OpenLink { url }]
                        } else {
                            Vec::new()
                        }
                    }
                    LinkOutcome::Issued(_) | LinkOutcome::Failed(_) => {
                        state.complete_download(&item_id, false);
                        Vec::new()
                    }
                },
                LinkPurpose::Stream => {
                    let result = match outcome {
                        LinkOutcome::Issued(url) if !url.trim().is_empty() => Ok(url),
                        LinkOutcome::Issued(_) => {
                            Err("backend returned an empty stream link".to_string())
                        }
                        LinkOutcome::Failed(message) => Err(message),
                    };
                    state.resolve_stream(&item_id, result);
                    Vec::new()
                }
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn parse_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
