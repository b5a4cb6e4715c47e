//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Resize
//! bursts are coalesced: only the last size is delivered, once the terminal
//! has been quiet for the debounce window.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// Quiet period before a resize is forwarded.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Holds back resize events until they stop arriving.
#[derive(Debug, Default)]
struct ResizeDebounce {
    pending: Option<(u16, u16, Instant)>,
}

impl ResizeDebounce {
    fn push(&mut self, width: u16, height: u16, now: Instant) {
        self.pending = Some((width, height, now));
    }

    /// The settled size, if the window has elapsed.
    fn take_settled(&mut self, now: Instant) -> Option<(u16, u16)> {
        match self.pending {
            Some((w, h, at)) if now.duration_since(at) >= RESIZE_DEBOUNCE => {
                self.pending = None;
                Some((w, h))
            }
            _ => None,
        }
    }

    /// How long to poll so a pending resize is flushed on time.
    fn poll_timeout(&self, tick_rate: Duration, now: Instant) -> Duration {
        match self.pending {
            Some((_, _, at)) => {
                let due = (at + RESIZE_DEBOUNCE).saturating_duration_since(now);
                due.min(tick_rate)
            }
            None => tick_rate,
        }
    }
}

/// Map one crossterm event; resizes are held back in `resize`.
fn translate(event: CtEvent, resize: &mut ResizeDebounce, now: Instant) -> Option<AppEvent> {
    match event {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(w, h) => {
            resize.push(w, h, now);
            None
        }
        _ => None,
    }
}

/// Spawns a blocking reader that polls the terminal for events and sends
/// them through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // `event::poll` blocks, so keep it off the async workers.
    tokio::task::spawn_blocking(move || {
        let mut resize = ResizeDebounce::default();
        loop {
            let timeout = resize.poll_timeout(tick_rate, Instant::now());
            let has_event = event::poll(timeout).unwrap_or(false);
            let app_event = if has_event {
                event::read()
                    .ok()
                    .and_then(|ev| translate(ev, &mut resize, Instant::now()))
            } else {
                Some(AppEvent::Tick)
            };

            if let Some((w, h)) = resize.take_settled(Instant::now()) {
                if tx.send(AppEvent::Resize(w, h)).is_err() {
                    break;
                }
            }
            if let Some(ev) = app_event {
                if tx.send(ev).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}
