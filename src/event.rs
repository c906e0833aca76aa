use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::error::Result;

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// Terminal resized to `(width, height)`.
    Resize(u16, u16),
    /// Nothing happened during one poll interval.
    Tick,
}

/// Async event handler that polls crossterm events and forwards them via a channel.
///
/// Events are consumed one at a time by the main loop; each is fully handled
/// before the next is read.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new EventHandler with the given poll interval.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                        _ => continue,
                    }
                } else {
                    Event::Tick
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event (waits until one is available).
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| crate::error::AppError::Terminal("Event channel closed".into()))
    }
}
