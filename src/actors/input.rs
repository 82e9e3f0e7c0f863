//! Terminal input actor: forwards crossterm events onto the message queue.

use crossterm::event::{Event, EventStream};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tea::Message;
use crate::{mlog_debug, mlog_warn};

use super::ActorHandle;

pub struct InputActor {
    msg_tx: mpsc::UnboundedSender<Message>,
}

impl InputActor {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { msg_tx }
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        mlog_debug!("InputActor::spawn");

        tokio::spawn(forward(EventStream::new(), self.msg_tx, cancel_clone));

        ActorHandle::new(cancel)
    }
}

/// Pump `events` onto the queue until cancelled. A read error or the end of
/// the stream is reported as `InputClosed` so the session can still quit.
pub async fn forward<S>(
    mut events: S,
    msg_tx: mpsc::UnboundedSender<Message>,
    cancel: CancellationToken,
) where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                mlog_debug!("InputActor cancelled");
                return;
            }
            event = events.next() => {
                let event = match event {
                    Some(Ok(event)) => event,
                    Some(Err(e)) => {
                        mlog_warn!("InputActor: failed to read event: {}", e);
                        let _ = msg_tx.send(Message::InputClosed(e.to_string()));
                        return;
                    }
                    None => {
                        mlog_warn!("InputActor: event stream ended");
                        let _ = msg_tx.send(Message::InputClosed("event stream ended".to_string()));
                        return;
                    }
                };
                let Some(msg) = to_message(event) else {
                    continue;
                };
                mlog_debug!("InputActor: {:?}", msg);
                if msg_tx.send(msg).is_err() {
                    mlog_debug!("InputActor: message channel closed");
                    return;
                }
            }
        }
    }
}

/// Map a terminal event to a message; focus and mouse events are dropped.
pub fn to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) => Some(Message::Key(key)),
        Event::Paste(text) => Some(Message::Paste(text)),
        Event::Resize(width, height) => Some(Message::Resize(width, height)),
        _ => None,
    }
}
