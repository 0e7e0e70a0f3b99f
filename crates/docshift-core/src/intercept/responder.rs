//! Single-use reply handle for one inbound message.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;

/// Replying consumes the responder, so a message gets at most one reply.
/// Dropping it without replying completes the exchange with no payload.
#[derive(Debug)]
pub struct Responder {
    tx: oneshot::Sender<Value>,
}

impl Responder {
    pub fn channel() -> (Self, oneshot::Receiver<Value>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Send `value` back. A sender that has gone away is not an error.
    pub fn reply<T: Serialize>(self, value: T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("encode reply: {}", e);
                return;
            }
        };
        if self.tx.send(value).is_err() {
            tracing::debug!("reply dropped: sender went away");
        }
    }
}
