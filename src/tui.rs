//! Terminal backend and event stream.
//!
//! [`Tui`] owns a crossterm terminal and a background task that turns terminal input and
//! two timers (tick, render) into [`Event`]s on an unbounded channel. [`TuiEnum`] puts the
//! real terminal and the in-memory [`TestTui`] behind one interface so the app loop can be
//! driven in tests.
//!
//! ```text
//!  crossterm EventStream ─┐
//!  tick interval ─────────┼─▶ event_tx ─▶ event_rx ─▶ App::run
//!  render interval ───────┘
//! ```
//!
//! The task sends [`Event::Init`] once, then forwards events until its
//! [`CancellationToken`] is cancelled or the receiver is gone. Only key presses are kept,
//! releases and repeats are dropped. Mouse capture and bracketed paste are switched on in
//! [`Tui::enter`] according to [`TuiConfig`].
//!
//! Rates are events per second and must be finite and above zero. [`Tui::new`] rejects
//! anything else before touching the terminal. [`Tui::suspend`] leaves the alternate
//! screen and raises `SIGTSTP`. [`restore`] puts the terminal back without a [`Tui`] and is
//! what the panic hook calls.

use std::{
    io::{Stderr, stderr},
    time::Duration,
};

use color_eyre::eyre::{Result, eyre};
use crossterm::event::{KeyCode, KeyModifiers};
use futures::{FutureExt, StreamExt};
use ratatui::{
    Frame, Terminal,
    backend::{CrosstermBackend, TestBackend},
    crossterm::{
        cursor,
        event::{
            DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
            Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent,
        },
        terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    },
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::config::TuiConfig;

#[derive(Clone, Debug)]
pub enum Event {
    /// Sent once when the event task starts
    Init,
    /// The terminal event stream failed or ended
    Error,
    Tick,
    Render,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

impl Event {
    /// Key releases and repeats are dropped, only presses are kept
    fn from_crossterm(event: CrosstermEvent) -> Option<Self> {
        Some(match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Key(_) => return None,
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(x, y) => Event::Resize(x, y),
            CrosstermEvent::FocusLost => Event::FocusLost,
            CrosstermEvent::FocusGained => Event::FocusGained,
            CrosstermEvent::Paste(s) => Event::Paste(s),
        })
    }
}

impl From<KeyCode> for Event {
    fn from(value: KeyCode) -> Self {
        Event::Key(KeyEvent::new(value, KeyModifiers::NONE))
    }
}
impl From<char> for Event {
    fn from(value: char) -> Self {
        KeyCode::Char(value).into()
    }
}

pub enum TuiEnum {
    Crossterm(Tui),
    #[allow(dead_code)]
    Test(TestTui),
}

impl From<Tui> for TuiEnum {
    fn from(tui: Tui) -> Self {
        TuiEnum::Crossterm(tui)
    }
}
impl From<TestTui> for TuiEnum {
    fn from(tui: TestTui) -> Self {
        TuiEnum::Test(tui)
    }
}
impl TuiEnum {
    pub fn enter(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.enter(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub fn exit(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.exit(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    /// Stop the process until it is continued, then take the terminal back
    pub fn suspend(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => {
                tui.suspend()?;
                tui.resume()
            }
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        match self {
            TuiEnum::Crossterm(tui) => tui.next().await,
            TuiEnum::Test(_) => Ok(Event::Tick),
        }
    }

    pub fn draw(&mut self, f: impl FnOnce(&mut Frame)) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => {
                tui.terminal.draw(f)?;
            }
            TuiEnum::Test(tui) => {
                tui.terminal.draw(f)?;
            }
        }
        Ok(())
    }
}

/// Leave raw mode and the alternate screen without needing a [`Tui`]
pub fn restore() -> Result<()> {
    if crossterm::terminal::is_raw_mode_enabled()? {
        crossterm::execute!(
            stderr(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        crossterm::terminal::disable_raw_mode()?;
    }
    Ok(())
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    tick_delay: Duration,
    render_delay: Duration,
    features: TuiConfig,
}

impl Tui {
    /// `tick_rate` and `frame_rate` are per second
    pub fn new(tick_rate: f64, frame_rate: f64, features: TuiConfig) -> Result<Self> {
        let tick_delay = delay(tick_rate)?;
        let render_delay = delay(frame_rate)?;
        let terminal = Terminal::new(CrosstermBackend::new(stderr()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            task: None,
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            tick_delay,
            render_delay,
            features,
        })
    }

    fn start(&mut self) {
        self.stop();
        self.cancellation_token = CancellationToken::new();
        self.task = Some(tokio::spawn(pump_events(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            self.tick_delay,
            self.render_delay,
        )));
    }

    /// Cancel the event task and wait for it, aborting it after 50 ms
    fn stop(&mut self) {
        self.cancellation_token.cancel();
        let Some(task) = self.task.take() else {
            return;
        };
        let mut waited = 0;
        while !task.is_finished() {
            if waited == 50 {
                task.abort();
            }
            if waited >= 100 {
                error!("Event task did not stop within 100 ms");
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
            waited += 1;
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        let mut out = stderr();
        crossterm::execute!(out, EnterAlternateScreen, cursor::Hide)?;
        if self.features.mouse {
            crossterm::execute!(out, EnableMouseCapture)?;
        }
        if self.features.paste {
            crossterm::execute!(out, EnableBracketedPaste)?;
        }
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop();
        self.terminal.flush()?;
        restore()
    }

    pub fn suspend(&mut self) -> Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::signal::SIGTSTP)?;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.enter()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.event_rx
            .recv()
            .await
            .ok_or_else(|| eyre!("Event channel closed"))
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!("Unable to exit Terminal: {:?}", e);
        }
    }
}

/// Interval between two events at `rate` events per second
fn delay(rate: f64) -> Result<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(eyre!("Rate must be a positive number, got {rate}"));
    }
    Duration::try_from_secs_f64(1.0 / rate).map_err(|e| eyre!("Rate {rate} is out of range: {e}"))
}

async fn pump_events(
    event_tx: UnboundedSender<Event>,
    cancellation_token: CancellationToken,
    tick_delay: Duration,
    render_delay: Duration,
) {
    let mut reader = EventStream::new();
    let mut tick_interval = tokio::time::interval(tick_delay);
    let mut render_interval = tokio::time::interval(render_delay);

    // the receiver is only dropped while the app shuts down
    if event_tx.send(Event::Init).is_err() {
        return;
    }
    loop {
        let event = tokio::select! {
            _ = cancellation_token.cancelled() => break,
            maybe_event = reader.next().fuse() => match maybe_event {
                Some(Ok(crossterm_event)) => match Event::from_crossterm(crossterm_event) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(_)) | None => Event::Error,
            },
            _ = tick_interval.tick() => Event::Tick,
            _ = render_interval.tick() => Event::Render,
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}

/// In-memory terminal for tests
pub struct TestTui {
    terminal: Terminal<TestBackend>,
}

#[cfg(test)]
impl TestTui {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            terminal: Terminal::new(TestBackend::new(width, height)).unwrap(),
        }
    }
}

#[cfg(test)]
impl TuiEnum {
    pub fn backend(&self) -> &TestBackend {
        match self {
            TuiEnum::Crossterm(_) => panic!("Not a test backend"),
            TuiEnum::Test(tui) => tui.terminal.backend(),
        }
    }
}
