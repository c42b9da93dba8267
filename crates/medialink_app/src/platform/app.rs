use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use log::LevelFilter;
use medialink_core::{update, AppState, Msg};
use medialink_engine::{
    ensure_data_dir, ChatCompletionsClient, EngineHandle, FileKeyValueStore, KeyValueStore,
    MemoryKeyValueStore, SystemClipboard, SystemOpener,
};

use super::config::{AppConfig, Args, LOG_FILENAME};
use super::effects::{EffectRunner, InboxSink};
use super::ui;
use super::ui::input::AppEvent;

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let loaded = AppConfig::load(args.config.as_deref());
    let config = loaded.config;

    let data_dir = config.data_dir();
    ensure_data_dir(&data_dir)
        .with_context(|| format!("cannot use data directory {}", data_dir.display()))?;
    engine_logging::initialize(
        config.log.into(),
        LevelFilter::Info,
        &data_dir.join(LOG_FILENAME),
    );
    for warning in &loaded.warnings {
        engine_warn!("{}", warning);
    }
    engine_info!(
        "Starting medialink config={:?} data_dir={:?} ephemeral={}",
        loaded.source,
        data_dir,
        args.ephemeral
    );

    let store: Arc<dyn KeyValueStore> = if args.ephemeral {
        Arc::new(MemoryKeyValueStore::new())
    } else {
        Arc::new(FileKeyValueStore::open(&data_dir).context("failed to open state store")?)
    };

    let api_key = config.api_key();
    if api_key.is_none() {
        engine_warn!("{} is not set", config.api_key_env);
        eprintln!(
            "Warning: {} is not set; link generation will fail until it is.",
            config.api_key_env
        );
    }
    let client = ChatCompletionsClient::new(config.inference_settings(api_key))
        .context("failed to set up inference client")?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let engine = EngineHandle::new(store, Arc::new(client), Arc::new(InboxSink::new(tx.clone())))
        .context("failed to start engine")?;
    let runner = EffectRunner::new(
        engine,
        Box::new(SystemClipboard::new()),
        Box::new(SystemOpener),
    );

    spawn_input_reader(tx);

    let mut session = Session::new(runner, io::stdout());
    session.start()?;
    while let Ok(event) = rx.recv() {
        if !session.handle(event)? {
            break;
        }
    }
    engine_info!("Exiting");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(ui::input::parse_line(&line)).is_err() {
                return;
            }
        }
        // EOF quits.
        let _ = tx.send(AppEvent::QuitRequested);
    });
}

/// Owns the state and applies events to it, writing screens to `out`.
pub(crate) struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Session<W> {
    pub(crate) fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    pub(crate) fn start(&mut self) -> io::Result<()> {
        // Initial "Loading..." before the gate read resolves.
        self.state.consume_dirty();
        write!(self.out, "{}", ui::render::render(&self.state.view()))?;
        self.dispatch(Msg::Started)
    }

    /// Returns `false` once the user asked to quit.
    pub(crate) fn handle(&mut self, event: AppEvent) -> io::Result<bool> {
        match event {
            AppEvent::Core(msg) => self.dispatch(msg)?,
            AppEvent::HelpRequested => {
                let screen = self.state.view().screen;
                write!(self.out, "{}", ui::render::render_actions(screen))?;
                self.prompt()?;
            }
            AppEvent::Unrecognized(line) => {
                writeln!(self.out, "Unknown command: {line} (type \"help\")")?;
                self.prompt()?;
            }
            AppEvent::Blank => self.prompt()?,
            AppEvent::QuitRequested => return Ok(false),
        }
        Ok(true)
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut pending = VecDeque::from([msg]);
        while let Some(msg) = pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            let outcome = self.runner.run(effects);
            for notification in &outcome.notifications {
                writeln!(
                    self.out,
                    "{}",
                    ui::render::render_notification(notification, &Local::now())
                )?;
            }
            pending.extend(outcome.follow_ups);

            if self.state.consume_dirty() {
                write!(self.out, "{}", ui::render::render(&self.state.view()))?;
            }
        }
        self.prompt()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}", ui::constants::PROMPT)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }
}
