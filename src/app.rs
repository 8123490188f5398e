//! Terminal front-end. Each stdin line is a new value of the location input.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use funcy_core::Config;
use funcy_weather::render::INPUT_PLACEHOLDER;
use funcy_weather::{
    render, request_lookup, Applied, LookupResult, SessionStore, WeatherController,
    WeatherPipeline, WeatherServiceMessage,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One read from stdin.
#[derive(Debug, PartialEq, Eq)]
enum StdinEvent {
    Line(String),
    Skipped,
    Closed,
}

impl StdinEvent {
    /// Lines that aren't valid UTF-8 are skipped. Other read errors end the session.
    fn from_read(read: io::Result<Option<String>>) -> io::Result<Self> {
        match read {
            Ok(Some(line)) => Ok(Self::Line(line)),
            Ok(None) => Ok(Self::Closed),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping unreadable input line: {}", e);
                Ok(Self::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}

pub struct App {
    controller: WeatherController,
    pipeline: Arc<WeatherPipeline>,
    store: SessionStore,
    tx: UnboundedSender<WeatherServiceMessage>,
    rx: Option<UnboundedReceiver<WeatherServiceMessage>>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let pipeline = WeatherPipeline::new(&config.weather)?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            controller: WeatherController::new(config.weather.stale_responses),
            pipeline: Arc::new(pipeline),
            store: SessionStore::new(&config.config_dir),
            tx,
            rx: Some(rx),
        })
    }

    /// One lookup, printed, then exit.
    pub async fn run_once(&mut self, location: &str) -> Result<()> {
        if let Some(ticket) = self.controller.set_query(location) {
            let outcome = self.pipeline.lookup(&ticket.query).await;
            self.apply(LookupResult {
                seq: ticket.seq,
                query: ticket.query,
                outcome,
            });
        }

        self.redraw();
        Ok(())
    }

    /// Read lines until stdin closes, then wait out the current lookup.
    pub async fn run_interactive(&mut self) -> Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("Interactive session already running"))?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        println!("{}", INPUT_PLACEHOLDER);
        self.restore();
        self.redraw();

        loop {
            if !stdin_open && !self.controller.is_loading() {
                break;
            }

            tokio::select! {
                read = lines.next_line(), if stdin_open => match StdinEvent::from_read(read)? {
                    StdinEvent::Line(line) => {
                        self.input(line);
                        self.redraw();
                    }
                    StdinEvent::Skipped => {}
                    StdinEvent::Closed => stdin_open = false,
                },
                Some(WeatherServiceMessage::LookupDone(result)) = rx.recv() => {
                    if self.apply(result) {
                        self.redraw();
                    }
                }
                else => break,
            }
        }

        Ok(())
    }

    /// Put the saved location back in the input. Returns true if a lookup was dispatched.
    fn restore(&mut self) -> bool {
        let ticket = self.controller.restore_session(&self.store);

        let query = &self.controller.state().query;
        if !query.is_empty() {
            println!("> {}", query);
        }

        match ticket {
            Some(ticket) => {
                request_lookup(&self.tx, Arc::clone(&self.pipeline), ticket);
                true
            }
            None => false,
        }
    }

    fn input(&mut self, raw: String) {
        if let Some(ticket) = self.controller.set_query(raw) {
            request_lookup(&self.tx, Arc::clone(&self.pipeline), ticket);
        }
    }

    /// Returns false when the result was stale and nothing changed.
    fn apply(&mut self, result: LookupResult) -> bool {
        self.controller.apply_with_session(result, &self.store) != Applied::Stale
    }

    fn redraw(&self) {
        println!("\n{}", render(self.controller.state()));
    }
}
