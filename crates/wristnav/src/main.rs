mod command;
mod controls;
mod host;

use crate::command::{Command, HELP};
use crate::controls::Screen;
use crate::host::ConsoleHost;
use anyhow::{Context, Error};
use std::env;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Instant;
use wristnav_core::control::Lifecycle;
use wristnav_core::logging::{get_run_id, init_logging, shutdown_logging};
use wristnav_core::navigation::{ControlFactory, ControlRegistry, NavigationManager};
use wristnav_core::settings::{Settings, SETTINGS_PATH};

fn run(settings: &Settings) -> Result<(), Error> {
    let screen = Screen::default();
    let mut registry = ControlRegistry::new();
    controls::register(&mut registry, &screen);

    let factory = ControlFactory::new(
        Rc::new(registry),
        settings.display.host_context(),
        settings.host_package.as_str(),
    );
    let host = ConsoleHost::default();
    let mut manager = NavigationManager::new(factory, Box::new(host.clone()))
        .with_settings(&settings.navigation);

    manager.initialize(settings.initial_control.clone());
    manager.lifecycle(Lifecycle::Start);
    manager.lifecycle(Lifecycle::Resume);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let started = Instant::now();

    print_screen(&mut stdout, &screen)?;

    for line in stdin.lock().lines() {
        let line = line.context("can't read from standard input")?;
        if line.trim().is_empty() {
            continue;
        }

        let timestamp = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);
        match command::parse(&line, timestamp) {
            Ok(Command::Key(key)) => manager.on_key(key),
            Ok(Command::Event(event)) => manager.dispatch(&event),
            Ok(Command::Lifecycle(event)) => manager.lifecycle(event),
            Ok(Command::Help) => writeln!(stdout, "{}", HELP)?,
            Ok(Command::Quit) => break,
            Err(e) => writeln!(stdout, "{:#}", e)?,
        }

        print_screen(&mut stdout, &screen)?;

        if host.is_closed() {
            writeln!(stdout, "session closed")?;
            break;
        }
    }

    for event in [Lifecycle::Pause, Lifecycle::Stop, Lifecycle::Destroy] {
        manager.lifecycle(event);
    }

    Ok(())
}

fn print_screen(stdout: &mut impl Write, screen: &Screen) -> Result<(), Error> {
    let lines = screen.take();
    if lines.is_empty() {
        return Ok(());
    }

    writeln!(stdout, "--")?;
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush().context("can't flush standard output")
}

fn main() -> Result<(), Error> {
    let path = env::args().nth(1).unwrap_or_else(|| SETTINGS_PATH.to_string());
    let settings =
        Settings::load(&path).with_context(|| format!("can't load settings from {}", path))?;

    init_logging(&settings).context("can't initialize logging")?;
    tracing::info!(run_id = get_run_id(), settings = %path, "wristnav started");

    let result = run(&settings);
    if let Err(e) = &result {
        tracing::error!(error = %format!("{:#}", e), "wristnav stopped with an error");
    }

    shutdown_logging();
    result
}
