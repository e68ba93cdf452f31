//! Live channel connection.
//!
//! Binds the frame codec in [`crate::core::live`] to a browser WebSocket.
//! The socket answers the handshake and pings, forwards tree notifications
//! to a callback, and reconnects after a fixed delay when it drops.

use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::Message;
use gloo_net::websocket::futures::WebSocket;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::config::live::RECONNECT_DELAY_MS;
use crate::core::live::{Frame, LiveEvent, decode_frame};

type EventHandler = Rc<dyn Fn(LiveEvent)>;

/// Handle to a running live channel. Closing it stops reconnection.
pub struct LiveSocket {
    abort: AbortHandle,
}

impl LiveSocket {
    /// Connect to `url` and keep the connection alive until [`close`].
    ///
    /// [`close`]: LiveSocket::close
    pub fn connect(url: String, on_event: impl Fn(LiveEvent) + 'static) -> Self {
        let (abort, registration) = AbortHandle::new_pair();
        let handler: EventHandler = Rc::new(on_event);

        spawn_local(async move {
            let _ = Abortable::new(run(url, handler), registration).await;
            log::debug!("Live channel stopped");
        });

        Self { abort }
    }

    /// Drop the connection and stop reconnecting.
    pub fn close(&self) {
        self.abort.abort();
    }
}

async fn run(url: String, on_event: EventHandler) {
    loop {
        match session(&url, &on_event).await {
            Ok(()) => log::info!("Live channel closed by server"),
            Err(message) => {
                log::warn!("Live channel error: {}", message);
                on_event(LiveEvent::ConnectError(message));
            }
        }
        TimeoutFuture::new(RECONNECT_DELAY_MS).await;
        log::debug!("Reconnecting live channel to {}", url);
    }
}

/// One connection lifetime. `Ok` when the server closed the session.
async fn session(url: &str, on_event: &EventHandler) -> Result<(), String> {
    let socket = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut sink, mut stream) = socket.split();

    while let Some(message) = stream.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(_)) => continue,
            Err(e) => return Err(e.to_string()),
        };

        let frame = decode_frame(&text);
        if let Some(reply) = frame.reply() {
            sink.send(Message::Text(reply.to_string()))
                .await
                .map_err(|e| e.to_string())?;
        }

        let closing = matches!(frame, Frame::Close | Frame::Disconnected);
        if let Some(event) = frame.into_live_event() {
            on_event(event);
        }
        if closing {
            return Ok(());
        }
    }

    Err("connection closed".to_string())
}
