use std::sync::Arc;

use git2::RemoteCallbacks;
use log::trace;
use thiserror::Error;

/// Returned by a dispatcher when the remote client listening for progress
/// went away. The relay absorbs this; losing the progress channel must not
/// abort the clone.
#[derive(Error, Debug)]
#[error("progress client disconnected")]
pub struct ClientDisconnected;

/// Human-readable clone progress, one label per update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressMessage {
    Label(String),
}

/// Sink for progress messages, typically backed by some remote client
/// connection outside this crate.
pub trait ProgressDispatcher: Send + Sync {
    fn send(&self, message: ProgressMessage) -> Result<(), ClientDisconnected>;
}

/// Translates transport callbacks into labels for a dispatcher.
pub struct ProgressRelay {
    dispatcher: Arc<dyn ProgressDispatcher>,
}

impl ProgressRelay {
    pub fn new(dispatcher: Arc<dyn ProgressDispatcher>) -> Self {
        ProgressRelay { dispatcher }
    }

    /// Wires sideband text and object-transfer progress into the callbacks
    /// used for the clone. Transfer progress is throttled to whole-percent
    /// changes to keep the label stream small.
    pub fn attach(&self, callbacks: &mut RemoteCallbacks<'_>) {
        let dispatcher = self.dispatcher.clone();
        callbacks.sideband_progress(move |data| {
            if let Ok(text) = std::str::from_utf8(data) {
                let text = text.trim();
                if !text.is_empty() {
                    send_label(dispatcher.as_ref(), text.to_string());
                }
            }
            true
        });

        let dispatcher = self.dispatcher.clone();
        let mut last_percent = 0;
        callbacks.transfer_progress(move |stats| {
            let total = stats.total_objects();
            if total > 0 {
                let received = stats.received_objects();
                let percent = received * 100 / total;
                if percent != last_percent {
                    last_percent = percent;
                    send_label(
                        dispatcher.as_ref(),
                        format!("Receiving objects: {percent}% ({received}/{total})"),
                    );
                }
            }
            true
        });
    }
}

fn send_label(dispatcher: &dyn ProgressDispatcher, label: String) {
    if dispatcher.send(ProgressMessage::Label(label)).is_err() {
        trace!("Progress client disconnected, dropping message");
    }
}
