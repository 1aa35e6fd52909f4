use dropdeck_core::{
    update, AppState, DownloadState, Effect, FileItem, LinkOutcome, LinkPurpose, Msg,
    ResolveOutcome,
};

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::UrlsSubmitted)
}

fn item(id: &str) -> FileItem {
    FileItem {
        id: id.to_string(),
        name: format!("{id}.mp4"),
        image: format!("http://cdn.test/{id}.jpg"),
        domain: "host.test".to_string(),
    }
}

#[test]
fn resolve_results_from_a_superseded_submission_are_discarded() {
    let state = AppState::new();
    let (state, _) = submit(state, "http://a.test/slow");
    let stale_session = state.session();

    // Second submission starts before the first resolve completes.
    let (state, _) = submit(state, "http://b.test/fresh");
    let active_session = state.session();
    assert_ne!(stale_session, active_session);

    // The late completion from the first batch must change nothing.
    let (state, effects) = update(
        state,
        Msg::ResolveDone {
            session: stale_session,
            url: "http://a.test/slow".to_string(),
            outcome: ResolveOutcome::Resolved(vec![item("stale")]),
        },
    );
    assert!(effects.is_empty());
    assert!(state.registry().is_empty());
    assert!(state.view().fetching, "active batch is still in flight");

    // The active batch proceeds normally.
    let (state, _) = update(
        state,
        Msg::ResolveDone {
            session: active_session,
            url: "http://b.test/fresh".to_string(),
            outcome: ResolveOutcome::Resolved(vec![item("fresh")]),
        },
    );
    let ids: Vec<String> = state
        .view()
        .cards
        .iter()
        .map(|card| card.item.id.clone())
        .collect();
    assert_eq!(ids, vec!["fresh"]);
}

#[test]
fn link_results_from_a_superseded_submission_are_discarded() {
    let state = AppState::new();
    let (state, _) = submit(state, "http://a.test/x");
    let stale_session = state.session();
    let (state, _) = update(
        state,
        Msg::ResolveDone {
            session: stale_session,
            url: "http://a.test/x".to_string(),
            outcome: ResolveOutcome::Resolved(vec![item("a")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::DownloadClicked {
            item_id: "a".to_string(),
        },
    );

    // New submission resolving an item with the same id.
    let (state, _) = submit(state, "http://b.test/y");
    let active_session = state.session();
    let (state, _) = update(
        state,
        Msg::ResolveDone {
            session: active_session,
            url: "http://b.test/y".to_string(),
            outcome: ResolveOutcome::Resolved(vec![item("a")]),
        },
    );

    // The stale link completion must neither open anything nor touch the
    // freshly created card.
    let (state, effects) = update(
        state,
        Msg::LinkDone {
            session: stale_session,
            item_id: "a".to_string(),
            purpose: LinkPurpose::Download,
            outcome: LinkOutcome::Issued("http://dl.test/stale".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().cards[0].download, DownloadState::Idle);
}

#[test]
fn session_ids_increase_per_submission() {
    let state = AppState::new();
    let (state, _) = submit(state, "http://a.test/1");
    let first = state.session();
    let (state, _) = submit(state, "http://a.test/2");
    let second = state.session();

    assert!(second > first);
}
