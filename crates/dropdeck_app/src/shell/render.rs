use dropdeck_core::{AppViewModel, CardView, DownloadState, StreamPanelView};

/// Renders the whole view model as text. The shell re-prints this block
/// whenever the core marks itself dirty.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(&status_line(view));
    out.push('\n');
    for (index, card) in view.cards.iter().enumerate() {
        out.push_str(&format_card(index + 1, card));
    }
    out
}

fn status_line(view: &AppViewModel) -> String {
    if view.fetching {
        format!("Fetching... ({} item(s) so far)", view.cards.len())
    } else if view.fetch_failed {
        "Fetch failed".to_string()
    } else {
        format!("{} item(s)", view.cards.len())
    }
}

fn format_card(index: usize, card: &CardView) -> String {
    let mut out = format!(
        "[#{index}] {name} ({domain})\n      thumb: {image}\n      download: {download}\n",
        name = card.item.name,
        domain = card.item.domain,
        image = card.item.image,
        download = download_label(card.download),
    );
    out.push_str(&format!("      stream: {}\n", stream_label(&card.stream)));
    out
}

fn download_label(state: DownloadState) -> &'static str {
    match state {
        DownloadState::Idle => "Download",
        DownloadState::Busy => "...",
        DownloadState::Errored => "Failed",
    }
}

fn stream_label(panel: &StreamPanelView) -> String {
    match panel {
        StreamPanelView::Collapsed => "collapsed".to_string(),
        StreamPanelView::Loading => "loading...".to_string(),
        StreamPanelView::Playing { url } => format!("playing {url}"),
        StreamPanelView::Failed { message } => format!("error: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdeck_core::FileItem;

    fn card(download: DownloadState, stream: StreamPanelView) -> CardView {
        CardView {
            item: FileItem {
                id: "abc".to_string(),
                name: "clip.mp4".to_string(),
                image: "http://cdn.test/abc.jpg".to_string(),
                domain: "host.test".to_string(),
            },
            download,
            stream,
        }
    }

    #[test]
    fn renders_fetch_failed_status() {
        let view = AppViewModel {
            fetch_failed: true,
            ..AppViewModel::default()
        };
        assert!(render(&view).starts_with("Fetch failed"));
    }

    #[test]
    fn renders_card_with_action_states() {
        let view = AppViewModel {
            cards: vec![card(
                DownloadState::Errored,
                StreamPanelView::Playing {
                    url: "http://cdn.test/v.mp4".to_string(),
                },
            )],
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("[#1] clip.mp4 (host.test)"));
        assert!(text.contains("download: Failed"));
        assert!(text.contains("stream: playing http://cdn.test/v.mp4"));
    }
}
