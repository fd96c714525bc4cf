use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::GatewayResult;
use crate::gateway::{AccessPoint, DeviceDetail, KnownSnapshot, RadioState};

/// Monotonic id tagging every dispatched user-facing operation
pub type OpId = u64;

/// Result of a background gateway call, delivered exactly once per dispatch
#[derive(Debug, Clone)]
pub enum Outcome {
    Scanned(GatewayResult<Vec<AccessPoint>>),
    Known(GatewayResult<KnownSnapshot>),
    Connected {
        op: OpId,
        ssid: String,
        result: GatewayResult<()>,
    },
    Disconnected {
        op: OpId,
        identifier: String,
        result: GatewayResult<()>,
    },
    Forgotten {
        op: OpId,
        identifier: String,
        result: GatewayResult<()>,
    },
    RadioToggled(GatewayResult<RadioState>),
    RadioStatus(GatewayResult<RadioState>),
    DeviceDetail(GatewayResult<DeviceDetail>),
}

/// Synthetic events produced by coordinator timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    ConnectTimeout { op: OpId },
    ClearStatus { token: u64 },
}

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Animation / render tick
    Tick,
    /// Terminal resize
    Resize(u16, u16),
    Gateway(Outcome),
    Timer(TimerEvent),
}

/// Collects terminal input and ticks into one queue. Background tasks
/// push their results into the same queue through [`EventHandler::sender`].
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Spawns the input and tick tasks.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));

        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let event = match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Ok(_)) => continue,
                    Some(Err(_)) | None => return,
                };
                if input_tx.send(event).is_err() {
                    return;
                }
            }
        });

        let tick_tx = tx.clone();
        let tick_stop = stop.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_stop.load(Ordering::Relaxed) || tick_tx.send(Event::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx, stop }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal the input and tick tasks to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
