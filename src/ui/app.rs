//! Event loop driver
//!
//! Owns the current [`ViewState`], feeds it events, and runs the one effect
//! there is: a spawned pair query whose outcome comes back as an event.

use console::style;
use eyre::{eyre, Result};
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use super::state::{Effect, Event, ViewState};
use super::widgets;
use crate::chain::RpcClient;
use crate::pair::{PairData, PairQuery};

pub struct App<R> {
    query: Arc<PairQuery<R>>,
    state: ViewState,
    results_tx: mpsc::UnboundedSender<Event>,
    results_rx: mpsc::UnboundedReceiver<Event>,
    spinner: Option<ProgressBar>,
}

impl<R: RpcClient + 'static> App<R> {
    pub fn new(query: Arc<PairQuery<R>>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            query,
            state: ViewState::default(),
            results_tx,
            results_rx,
            spinner: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies `event`; returns true when it started a query.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let transition = self.state.apply(event);
        let previous = std::mem::replace(&mut self.state, transition.state);
        self.sync_spinner(&previous);

        match transition.effect {
            Some(Effect::StartQuery(address)) => {
                self.spawn_query(address);
                true
            }
            None => false,
        }
    }

    fn spawn_query(&self, address: String) {
        debug!("Starting query for {}", address);
        let query = self.query.clone();
        let tx = self.results_tx.clone();

        tokio::spawn(async move {
            let event = match query.fetch_pair_data(&address).await {
                Ok(data) => Event::QuerySucceeded(data),
                Err(_) => Event::QueryFailed,
            };
            // receiver lives as long as the app
            let _ = tx.send(event);
        });
    }

    /// Waits for the in-flight query to report back.
    pub async fn next_completion(&mut self) -> Option<Event> {
        if !self.state.is_loading {
            return None;
        }
        self.results_rx.recv().await
    }

    fn sync_spinner(&mut self, previous: &ViewState) {
        if self.state.is_loading && !previous.is_loading {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Fetching {} ...", self.state.input.trim()));
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        } else if !self.state.is_loading {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }

    /// Single query: returns the pair data or the notice as an error.
    pub async fn run_once(&mut self, address: &str) -> Result<PairData> {
        self.dispatch(Event::InputChanged(address.to_string()));
        if self.dispatch(Event::Submit) {
            if let Some(event) = self.next_completion().await {
                self.dispatch(event);
            }
        }

        match (self.state.notice, &self.state.last_result) {
            (Some(notice), _) => Err(eyre!(notice.message())),
            (None, Some(data)) => Ok(data.clone()),
            (None, None) => Err(eyre!("query produced no result")),
        }
    }

    /// Interactive session: every line from `lines` is typed and submitted.
    pub async fn run(&mut self, mut lines: mpsc::Receiver<String>) -> Result<()> {
        println!("{}", widgets::view(&self.state));
        let mut input_open = true;

        loop {
            tokio::select! {
                line = lines.recv(), if input_open => match line {
                    Some(line) => self.submit_line(line),
                    None => input_open = false,
                },
                Some(event) = self.results_rx.recv() => {
                    self.dispatch(event);
                    println!("{}", widgets::view(&self.state));
                }
                _ = tokio::signal::ctrl_c() => break,
            }

            if !input_open && !self.state.is_loading {
                break;
            }
        }

        Ok(())
    }

    fn submit_line(&mut self, line: String) {
        if self.state.is_loading {
            println!("{}", style("A query is already running, input ignored").dim());
            return;
        }
        if line.trim().is_empty() {
            return;
        }

        self.dispatch(Event::InputChanged(line));
        if !self.dispatch(Event::Submit) {
            println!("{}", widgets::view(&self.state));
        }
    }
}
