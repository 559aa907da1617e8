//! WebSocket transport adapter for the event broadcaster.
//!
//! Each accepted connection becomes one broadcaster subscriber; events flow
//! out as one JSON object per text message. Delivery is fire-and-forget and
//! reconnection is the client's responsibility.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::broadcast::Broadcaster;
use crate::error::Result;

/// Bind `addr` and serve subscribers until the task is dropped.
pub async fn serve(addr: &str, broadcaster: Arc<Broadcaster>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "WebSocket feed listening");
    serve_on(listener, broadcaster).await
}

/// Accept-loop over an already-bound listener (lets tests bind port 0).
pub async fn serve_on(listener: TcpListener, broadcaster: Arc<Broadcaster>) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(handle_connection(stream, peer, Arc::clone(&broadcaster)));
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, broadcaster: Arc<Broadcaster>) {
    let mut ws = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(error) => {
            warn!(%peer, %error, "WebSocket handshake failed");
            return;
        }
    };

    let mut subscription = broadcaster.subscribe();
    info!(%peer, subscriber = %subscription.id, "Subscriber connected");

    loop {
        tokio::select! {
            event = subscription.receiver.recv() => {
                match event {
                    Some(json) => {
                        // At-most-once: a failed send ends the subscription.
                        if ws.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            incoming = ws.next() => {
                match incoming {
                    Some(Ok(Message::Ping(data))) => {
                        if ws.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // The feed is one-way; anything a subscriber says is ignored.
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        debug!(%peer, %error, "WebSocket error");
                        break;
                    }
                }
            }
        }
    }

    broadcaster.unsubscribe(subscription.id);
    info!(%peer, subscriber = %subscription.id, "Subscriber disconnected");
}
