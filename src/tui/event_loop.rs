use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute, terminal,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::tui::state::{AppAction, MapApp};

const TICK: Duration = Duration::from_millis(150);

impl MapApp {
    /// Takes over the terminal until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(
                    stdout,
                    DisableMouseCapture,
                    terminal::LeaveAlternateScreen,
                    cursor::Show
                );
                let _ = terminal::disable_raw_mode();
            }
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("enable raw mode")?;
        execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)?;
        let _guard = TuiGuard;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        self.controller.search_on_load();
        self.event_loop(&mut terminal).await
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        loop {
            {
                let presenter = self.presenter.clone();
                let presenter = presenter.lock().await;
                let in_flight = self.controller.in_flight();
                terminal.draw(|f| self.view(f, presenter.widget(), in_flight))?;
            }
            if self.should_quit {
                info!("quit requested");
                return Ok(());
            }

            tokio::select! {
                _ = tick.tick() => {
                    if self.controller.in_flight() > 0 {
                        self.spinner_state = self.spinner_state.wrapping_add(1);
                    }
                }
                maybe_event = events.next() => {
                    let action = match maybe_event {
                        Some(Ok(Event::Key(k))) => self.map_key(k),
                        Some(Ok(Event::Mouse(m))) => self.map_mouse(m),
                        Some(Ok(_)) => AppAction::None,
                        Some(Err(e)) => return Err(e).context("read terminal event"),
                        None => return Ok(()),
                    };
                    if action != AppAction::None {
                        debug!(?action, "dispatching action");
                    }
                    self.apply(action).await;
                }
            }
        }
    }
}
