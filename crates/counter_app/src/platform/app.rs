use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use counter_core::{text_source_label, ServerEndpoint, UiCoordinator};
use counter_engine::{ClientSession, ClientSettings, Dispatcher};
use counter_logging::{counter_info, counter_warn};

use super::commands::{self, Command};
use super::coordinator::TerminalCoordinator;
use super::files::load_text_file;
use super::{logging, persistence};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Extra time granted past the request timeout when input ends mid-dispatch.
const DRAIN_MARGIN: Duration = Duration::from_secs(5);

type TerminalSession = ClientSession<TerminalCoordinator<io::Stdout>>;

enum InputEvent {
    Line(String),
    Eof,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(logging::destination_from_env(), logging::level_from_env());

    let state_dir = std::env::current_dir().context("resolving working directory")?;
    let endpoint = persistence::load_endpoint(&state_dir).unwrap_or_default();
    let settings = ClientSettings::default();
    let drain_timeout = settings.process_timeout + DRAIN_MARGIN;

    let dispatcher = Dispatcher::new(settings).context("starting dispatcher")?;
    let mut session = ClientSession::with_dispatcher(
        dispatcher,
        endpoint,
        TerminalCoordinator::new(io::stdout()),
    );
    counter_info!("counter client started against {}", session.endpoint());

    let welcome = session.view();
    let coordinator = session.coordinator_mut();
    coordinator.on_notice(&welcome.report, &welcome.status);
    coordinator.print(commands::HELP);

    let input = spawn_stdin_reader()?;
    loop {
        session.pump();
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(InputEvent::Line(line)) => {
                if let Flow::Quit = handle_line(&mut session, &state_dir, &line) {
                    counter_info!("quit requested");
                    break;
                }
            }
            Ok(InputEvent::Eof) | Err(mpsc::RecvTimeoutError::Disconnected) => {
                if !session.wait_idle(drain_timeout) {
                    counter_warn!("input closed; in-flight session did not finish in time");
                }
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    session.shutdown();
    counter_info!("counter client stopped");
    Ok(())
}

fn spawn_stdin_reader() -> anyhow::Result<mpsc::Receiver<InputEvent>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("counter-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(InputEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        counter_warn!("failed to read stdin: {}", err);
                        break;
                    }
                }
            }
            let _ = tx.send(InputEvent::Eof);
        })
        .context("spawning stdin reader")?;
    Ok(rx)
}

fn handle_line(session: &mut TerminalSession, state_dir: &Path, line: &str) -> Flow {
    let Some(command) = commands::parse(line) else {
        return Flow::Continue;
    };

    match command {
        Command::Quit => return Flow::Quit,
        Command::Help => session.coordinator_mut().print(commands::HELP),
        Command::Invalid(message) => session.coordinator_mut().on_rejected(&message),
        _ if !session.coordinator().controls_enabled() => {
            session.coordinator_mut().notify_busy();
        }
        Command::Text(text) => {
            let label = text_source_label(&text);
            session.submit(text, label);
        }
        Command::File(path) => match load_text_file(&path) {
            Ok(loaded) => session.submit(loaded.text, loaded.source_label),
            Err(err) => {
                counter_warn!("file load failed: {}", err);
                session.coordinator_mut().on_rejected(&err.to_string());
            }
        },
        Command::Server { host, port } => {
            let before: ServerEndpoint = session.endpoint().clone();
            session.configure_endpoint(host, port);
            if session.endpoint() != &before {
                persistence::save_endpoint(state_dir, session.endpoint());
            }
        }
        Command::Health => session.check_health(),
    }
    Flow::Continue
}
