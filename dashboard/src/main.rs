use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use office_dashboard_core::river::RiverReading;
use office_dashboard_fetcher::clock::{CLOCK_PERIOD, spawn_clock};
use office_dashboard_fetcher::config::DashboardConfig;
use office_dashboard_fetcher::{River, Transit, TransitBoard, WidgetState};
use ratatui::DefaultTerminal;
use reqwest::Client as HTTPClient;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ui;

const TARGET: &str = "office_dashboard";

struct Feeds {
    clock: watch::Receiver<DateTime<Utc>>,
    river: watch::Receiver<WidgetState<RiverReading>>,
    transit: watch::Receiver<WidgetState<TransitBoard>>,
}

impl Feeds {
    fn snapshot(&mut self) -> ui::Dashboard {
        let now = *self.clock.borrow_and_update();
        let river = self.river.borrow_and_update().clone();
        let transit = self.transit.borrow_and_update().clone();
        ui::Dashboard::new(now, &river, &transit)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from_env();
    init_tracing(config.log_file.as_deref())?;

    let http_client = HTTPClient::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    info!(
        target: TARGET,
        event = "dashboard.started",
        station_query = config.station_query.as_str(),
        "Starting dashboard"
    );

    let (river_handle, river) =
        office_dashboard_fetcher::spawn(River::new(), http_client.clone());
    let (transit_handle, transit) =
        office_dashboard_fetcher::spawn(Transit::new(&config.station_query), http_client);
    let (clock_handle, clock) = spawn_clock(CLOCK_PERIOD);

    let mut feeds = Feeds {
        clock,
        river,
        transit,
    };
    let mut terminal = ratatui::try_init().context("initializing terminal")?;
    let result = run(&mut terminal, &mut feeds).await;
    ratatui::restore();

    for handle in [clock_handle, river_handle, transit_handle] {
        handle.stop();
    }
    info!(target: TARGET, event = "dashboard.stopped", "Dashboard closed");
    result
}

/// Redraws whenever the clock ticks or a widget publishes new state, until
/// the user quits.
async fn run(terminal: &mut DefaultTerminal, feeds: &mut Feeds) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        let dashboard = feeds.snapshot();
        terminal.draw(|frame| ui::draw(frame, &dashboard))?;

        tokio::select! {
            changed = feeds.clock.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = feeds.river.changed() => {}
            _ = feeds.transit.changed() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit(&key) => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("reading terminal events"),
                None => break,
            },
        }
    }
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// The terminal belongs to the UI, so logs only go to a file when one is configured.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // Enable log level filtering via `RUST_LOG` env var
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        let press = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_quit(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&press(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
