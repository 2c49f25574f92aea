//! Everything the app loop waits on, merged into one channel.
//!
//! A background task multiplexes three sources:
//!
//!   terminal input   -> Key / Redraw (on resize)
//!   frame interval   -> Redraw
//!   message log      -> Messages (initial snapshot, then every change)
//!
//! The task stops when the [`Events`] handle is dropped.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use heroes_core::MessageLog;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Time to draw a frame. Also sent right after a resize.
    Redraw,
    /// The message log changed.
    Messages(Arc<Vec<String>>),
}

pub struct Events {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl Events {
    /// Start reading from the real terminal.
    pub fn start(messages: &MessageLog, frame_rate: Duration) -> Self {
        Self::from_input(EventStream::new(), messages, frame_rate)
    }

    fn from_input<S>(input: S, messages: &MessageLog, frame_rate: Duration) -> Self
    where
        S: Stream<Item = io::Result<CrosstermEvent>> + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(
            input,
            messages.subscribe(),
            frame_rate,
            tx,
            cancel.clone(),
        ));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for Events {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump<S>(
    mut input: S,
    mut messages: watch::Receiver<Arc<Vec<String>>>,
    frame_rate: Duration,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) where
    S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
{
    let mut frames = tokio::time::interval(frame_rate);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut input_open = true;
    let mut messages_open = true;

    let initial = messages.borrow_and_update().clone();
    if tx.send(Event::Messages(initial)).is_err() {
        return;
    }

    loop {
        let event = tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            next = input.next(), if input_open => match next {
                Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    Event::Key(key)
                }
                Some(Ok(CrosstermEvent::Resize(..))) => Event::Redraw,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    debug!(error = %e, "terminal input failed");
                    input_open = false;
                    continue;
                }
                None => {
                    input_open = false;
                    continue;
                }
            },

            changed = messages.changed(), if messages_open => {
                if changed.is_err() {
                    messages_open = false;
                    continue;
                }
                Event::Messages(messages.borrow_and_update().clone())
            }

            _ = frames.tick() => Event::Redraw,
        };

        if tx.send(event).is_err() {
            break;
        }
    }

    debug!("event reader stopped");
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use futures::stream;

    use super::*;

    const SLOW: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn message_log_changes_arrive_as_events() {
        let messages = MessageLog::new();
        messages.add("fetched heroes");
        let mut events = Events::from_input(stream::pending(), &messages, SLOW);

        // The interval fires once immediately
        let mut first = Vec::new();
        for _ in 0..2 {
            first.push(events.next().await);
        }
        assert!(first.iter().any(|e| matches!(
            e,
            Some(Event::Messages(lines)) if lines.as_slice() == ["fetched heroes".to_owned()]
        )));

        messages.clear();
        let Some(Event::Messages(lines)) = events.next().await else {
            panic!("expected cleared snapshot");
        };
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn key_presses_pass_through_and_closed_input_is_tolerated() {
        let messages = MessageLog::new();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let input = stream::iter(vec![Ok(CrosstermEvent::Key(key))]);
        let mut events = Events::from_input(input, &messages, SLOW);

        let mut seen_key = false;
        for _ in 0..3 {
            if let Some(Event::Key(k)) = events.next().await {
                assert_eq!(k.code, KeyCode::Char('q'));
                seen_key = true;
            }
        }
        assert!(seen_key);

        // Input is exhausted, but the log still reaches the app
        messages.add("deleted hero id=12");
        let Some(Event::Messages(lines)) = events.next().await else {
            panic!("expected message snapshot");
        };
        assert_eq!(lines.len(), 1);
    }
}
