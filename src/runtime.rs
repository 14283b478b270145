use std::sync::mpsc::{self, Receiver, RecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of app events (keyboard, resize, and the once-per-second tick)
pub trait SessionEventSource: Send + 'static {
    /// Block until the next event arrives. Returns Err once the source is
    /// exhausted.
    fn recv(&self) -> Result<SessionEvent, RecvError>;
}

/// Production event source using crossterm plus a repeating tick thread.
///
/// Both producer threads feed one channel, so ticks and key events reach the
/// single consumer strictly serialized; a tick can never overlap another
/// event's handling.
pub struct CrosstermEventSource {
    rx: Receiver<SessionEvent>,
}

impl CrosstermEventSource {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            thread::sleep(tick_interval);
            if tick_tx.send(SessionEvent::Tick).is_err() {
                break;
            }
        });

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SessionEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SessionEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl SessionEventSource for CrosstermEventSource {
    fn recv(&self) -> Result<SessionEvent, RecvError> {
        self.rx.recv()
    }
}

/// Test event source for unit tests; ticks are injected explicitly, so no
/// real time has to pass.
pub struct TestEventSource {
    rx: Receiver<SessionEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }
}

impl SessionEventSource for TestEventSource {
    fn recv(&self) -> Result<SessionEvent, RecvError> {
        self.rx.recv()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: SessionEventSource> {
    event_source: E,
}

impl<E: SessionEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; None once the source is exhausted
    pub fn step(&self) -> Option<SessionEvent> {
        self.event_source.recv().ok()
    }
}
