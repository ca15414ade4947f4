mod app;
mod report;
mod state;

use crate::app::{App, Effects, View};
use crate::state::app_settings::{AppSettings, Cli};
use crate::state::messages::{Command, NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::NetworkWorker;
use crate::state::refresher::Poller;
use clap::Parser;
use log::{error, info, warn};
use scoreline_api::ScoresApi;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Help, version and bad flags exit here, before any task starts.
    let cli = Cli::parse();

    better_panic::install();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let mut app = App::new(AppSettings::from(cli));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Stdin commands
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network fetches
    let network_worker =
        NetworkWorker::new(ScoresApi::new(), app.settings.league, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    let mut poller = Poller::new(ui_event_tx.clone(), app.settings.poll_interval());

    ui_event_tx.send(UiEvent::Started).await?;

    main_loop(&mut app, &mut poller, ui_event_rx, network_req_tx, network_resp_rx).await;

    if poller.is_focused() {
        poller.blur();
    }
    input_handler.abort();
    network_task.abort();

    Ok(())
}

async fn main_loop(
    app: &mut App,
    poller: &mut Poller,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let effects = match ui_event {
                    UiEvent::Started => {
                        let effects = app.on_started();
                        poller.focus();
                        effects
                    }
                    UiEvent::PollTick => app.on_tick(),
                    UiEvent::Command(Command::Quit) => break,
                    UiEvent::Command(command) => handle_command(app, command),
                };
                if !apply_effects(app, effects, &network_requests).await {
                    break;
                }
            }

            Some(response) = network_responses.recv() => {
                let effects = app.on_network_response(response);
                if !apply_effects(app, effects, &network_requests).await {
                    break;
                }
            }

            _ = &mut shutdown => {
                info!("interrupted");
                break;
            }
        }
    }
}

fn handle_command(app: &mut App, command: Command) -> Effects {
    match command {
        Command::Refresh => app.refresh(),
        Command::SelectDate(date) => app.select_date(&date),
        Command::SelectEvent(id) => app.select_event(&id),
        Command::SelectPlayer(id) => app.select_player(&id),
        Command::ClearDetail => app.clear_detail(),
        Command::ListCalendar => app.list_calendar(),
        Command::Quit => Effects::default(),
    }
}

/// Send requests, print the view. Returns false once the worker is gone.
async fn apply_effects(app: &App, effects: Effects, network_requests: &mpsc::Sender<NetworkRequest>) -> bool {
    if let Some(view) = effects.render {
        render(app, view);
    }
    for request in effects.requests {
        if let Err(e) = network_requests.send(request).await {
            error!("Network worker stopped: {e}");
            return false;
        }
    }
    true
}

fn render(app: &App, view: View) {
    let state = &app.state;
    if app.settings.json {
        let line = match view {
            View::Scoreboard => report::scoreboard_json(state).map(Some),
            View::Detail => report::detail_json(state),
            View::Scorecard => report::scorecard_json(state),
            View::Calendar => report::calendar_json(state).map(Some),
        };
        match line {
            Ok(Some(line)) => println!("{line}"),
            Ok(None) => {}
            Err(e) => error!("Failed to encode {view:?} update: {e}"),
        }
        return;
    }

    let lines = match view {
        View::Scoreboard => report::scoreboard_lines(state),
        View::Detail => report::detail_lines(state),
        View::Scorecard => report::scorecard_lines(state),
        View::Calendar => report::calendar_lines(state),
    };
    for line in lines {
        println!("{line}");
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match Command::parse(&line) {
                Ok(command) => {
                    if ui_events.send(UiEvent::Command(command)).await.is_err() {
                        break;
                    }
                }
                Err(message) => warn!("{message}"),
            },
            // Closed stdin leaves the watcher running until ctrl-c.
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {e}");
                break;
            }
        }
    }
}
