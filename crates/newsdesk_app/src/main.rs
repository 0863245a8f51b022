mod commands;
mod effects;
mod render;

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use desk_logging::{desk_info, LogDestination};
use log::LevelFilter;
use newsdesk_core::{update, AppState, Msg};
use newsdesk_engine::DeskConfig;

use commands::{parse_command, Command, HELP};
use effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

fn main() -> anyhow::Result<()> {
    let (destination, level) = log_settings(std::env::var("NEWSDESK_LOG").ok().as_deref());
    desk_logging::initialize(destination, level);

    let config = DeskConfig::from_env().context("invalid NEWSDESK_* configuration")?;
    let runner = EffectRunner::start(config.clone()).context("failed to start engine")?;
    desk_info!("newsdesk started, endpoint {}", config.endpoint_base_url);

    let input = spawn_stdin_reader();
    let mut input_open = true;
    let mut state = dispatch(
        AppState::with_page_size(config.page_size),
        Msg::Started,
        &runner,
    );

    loop {
        let next = if input_open {
            input.recv_timeout(POLL_INTERVAL)
        } else {
            thread::sleep(POLL_INTERVAL);
            Err(RecvTimeoutError::Timeout)
        };

        match next {
            Ok(line) => match parse_command(&line) {
                Ok(Some(Command::Intent(msg))) => state = dispatch(state, msg, &runner),
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(Some(Command::Quit)) => break,
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => state = dispatch(state, Msg::Tick, &runner),
            Err(RecvTimeoutError::Disconnected) => input_open = false,
        }

        for msg in runner.poll() {
            state = dispatch(state, msg, &runner);
        }

        if state.consume_dirty() {
            draw(&render::render(&state.view()))?;
        }

        // Piped input: leave once stdin is exhausted and nothing is pending.
        if !input_open && state.in_flight().is_none() {
            break;
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn draw(lines: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if stdout.is_terminal() {
        write!(out, "\x1b[2J\x1b[H")?;
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "> type `help` for commands")?;
    out.flush()
}

/// `NEWSDESK_LOG=file|terminal|both`; unset keeps the terminal quiet.
fn log_settings(value: Option<&str>) -> (LogDestination, LevelFilter) {
    match value.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("file") => (LogDestination::File, LevelFilter::Info),
        Some("both") => (LogDestination::Both, LevelFilter::Info),
        Some("terminal") => (LogDestination::Terminal, LevelFilter::Info),
        _ => (LogDestination::Terminal, LevelFilter::Warn),
    }
}
