use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::client_info;
use dropdeck_client::ApiSettings;
use dropdeck_core::{update, AppState, AppViewModel, Msg};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::render;

const HELP: &str = "\
Paste one URL per line; an empty line submits the batch.
Per card: ':d N' requests a download link, ':s N' toggles the stream panel.
':q' quits.";

/// One parsed input line from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineAction {
    Url(String),
    Submit,
    Download(usize),
    Stream(usize),
    Quit,
    Unknown(String),
}

enum ShellEvent {
    Msg(Msg),
    Download(usize),
    Stream(usize),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);
    client_info!("dropdeck shell starting");

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(api_settings_from_env(), msg_tx)?;

    let (shell_tx, shell_rx) = mpsc::channel::<ShellEvent>();
    spawn_input_thread(shell_tx);

    println!("{HELP}");

    let mut state = AppState::new();
    let mut last_view = state.view();

    loop {
        let mut idle = true;

        while let Ok(event) = shell_rx.try_recv() {
            idle = false;
            match event {
                ShellEvent::Quit => return Ok(()),
                ShellEvent::Msg(msg) => {
                    dispatch(&mut state, msg, &runner, &mut last_view);
                }
                ShellEvent::Download(index) => match card_id(&last_view, index) {
                    Some(item_id) => {
                        dispatch(
                            &mut state,
                            Msg::DownloadClicked { item_id },
                            &runner,
                            &mut last_view,
                        );
                    }
                    None => println!("no card #{index}"),
                },
                ShellEvent::Stream(index) => match card_id(&last_view, index) {
                    Some(item_id) => {
                        dispatch(
                            &mut state,
                            Msg::StreamToggled { item_id },
                            &runner,
                            &mut last_view,
                        );
                    }
                    None => println!("no card #{index}"),
                },
            }
        }

        while let Ok(msg) = msg_rx.try_recv() {
            idle = false;
            dispatch(&mut state, msg, &runner, &mut last_view);
        }

        if idle {
            thread::sleep(Duration::from_millis(20));
        }
    }
}

/// Folds one message through the core and executes the returned effects.
/// Re-renders only when the core marked itself dirty.
fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner, last_view: &mut AppViewModel) {
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    runner.enqueue(effects);
    if state.consume_dirty() {
        let view = state.view();
        print!("{}", render::render(&view));
        *last_view = view;
    }
}

/// Card numbers shown by the renderer are 1-based.
fn card_id(view: &AppViewModel, index: usize) -> Option<String> {
    view.cards
        .get(index.checked_sub(1)?)
        .map(|card| card.item.id.clone())
}

/// Reads stdin on its own thread. URL lines accumulate into a block; a blank
/// line submits the block as one multi-line input.
fn spawn_input_thread(shell_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut block: Vec<String> = Vec::new();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                LineAction::Url(url) => block.push(url),
                LineAction::Submit => {
                    if !block.is_empty() {
                        let text = block.join("\n");
                        block.clear();
                        if shell_tx
                            .send(ShellEvent::Msg(Msg::InputChanged(text)))
                            .is_err()
                        {
                            return;
                        }
                        if shell_tx.send(ShellEvent::Msg(Msg::UrlsSubmitted)).is_err() {
                            return;
                        }
                    }
                }
                LineAction::Download(index) => {
                    if shell_tx.send(ShellEvent::Download(index)).is_err() {
                        return;
                    }
                }
                LineAction::Stream(index) => {
                    if shell_tx.send(ShellEvent::Stream(index)).is_err() {
                        return;
                    }
                }
                LineAction::Quit => {
                    let _ = shell_tx.send(ShellEvent::Quit);
                    return;
                }
                LineAction::Unknown(command) => {
                    println!("unknown command '{command}'\n{HELP}");
                }
            }
        }
        let _ = shell_tx.send(ShellEvent::Quit);
    });
}

fn parse_line(line: &str) -> LineAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineAction::Submit;
    }
    if let Some(rest) = trimmed.strip_prefix(':') {
        let mut parts = rest.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let index = parts.next().and_then(|raw| raw.parse::<usize>().ok());
        return match (command, index) {
            ("q", _) | ("quit", _) => LineAction::Quit,
            ("d", Some(index)) => LineAction::Download(index),
            ("s", Some(index)) => LineAction::Stream(index),
            _ => LineAction::Unknown(trimmed.to_string()),
        };
    }
    LineAction::Url(trimmed.to_string())
}

fn api_settings_from_env() -> ApiSettings {
    let mut settings = ApiSettings::default();
    if let Ok(base) = std::env::var("DROPDECK_API") {
        let base = base.trim();
        if !base.is_empty() {
            settings.base_url = base.to_string();
        }
    }
    settings
}
