//! Line protocol used by the control socket: one JSON message per line in,
//! one JSON object per line out.
//!
//! - `{"reply": <value>}` when the handler replied
//! - `{}` when it finished without a reply
//! - `{"error": "..."}` when the line is not a valid message

use serde_json::{json, Value};

use super::{Interceptor, Message, Responder};
use crate::verify::Verifier;

pub async fn handle_line<V: Verifier>(interceptor: &Interceptor<V>, line: &str) -> Value {
    let message: Message = match serde_json::from_str(line) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!("bad control message {:?}: {}", line, e);
            return json!({ "error": format!("invalid message: {e}") });
        }
    };
    let (responder, rx) = Responder::channel();
    interceptor.dispatch(message, responder).await;
    match rx.await {
        Ok(value) => json!({ "reply": value }),
        Err(_) => json!({}),
    }
}
