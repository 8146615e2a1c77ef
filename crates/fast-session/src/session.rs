//! Session lifecycle: connect, authorize, exchange, close.

use crate::error::{SessionError, SessionResult};
use crate::message::{service_error, AuthorizeRequest};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{
    connect_async_tls_with_config, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Connection parameters for the trading service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// WebSocket endpoint, without the app id query
    /// (e.g., "wss://ws.binaryws.com/websockets/v3").
    pub ws_url: String,
    /// Application/client identifier appended as `?app_id=`.
    pub app_id: u32,
    /// Authorization token sent in the handshake.
    pub api_token: String,
    /// Timeout applied to every network step (connect, send, receive).
    pub step_timeout: Duration,
}

impl SessionConfig {
    /// Full endpoint URL with the app id query.
    pub fn endpoint(&self) -> String {
        format!("{}?app_id={}", self.ws_url, self.app_id)
    }
}

/// Identity of one session, used to pin proposals to the connection that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One authenticated connection to the trading service.
///
/// Scoped to a single contract negotiation. The owner must call
/// [`Session::close`] when the negotiation ends; dropping the session
/// closes the underlying connection either way.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    step_timeout: Duration,
}

impl Session {
    /// Connect and authorize.
    ///
    /// Performs the `{"authorize": <token>}` handshake and awaits exactly
    /// one response. A response carrying an error field fails with
    /// [`SessionError::Auth`] after closing the connection. No retries: a
    /// single handshake failure is fatal for this call.
    pub async fn open(config: &SessionConfig) -> SessionResult<Self> {
        let endpoint = config.endpoint();
        debug!(url = %config.ws_url, app_id = config.app_id, "Connecting to trading service");

        let (stream, _response) = timeout(
            config.step_timeout,
            connect_async_tls_with_config(&endpoint, None, true, None),
        )
        .await
        .map_err(|_| SessionError::Timeout(config.step_timeout))??;

        let mut session = Self {
            id: SessionId::new(),
            stream,
            step_timeout: config.step_timeout,
        };

        let response = match session
            .exchange(&AuthorizeRequest::new(config.api_token.clone()))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                session.close().await;
                return Err(e);
            }
        };

        if let Some(error) = service_error(&response) {
            warn!(session = %session.id, message = %error.message, "Authorization rejected");
            session.close().await;
            return Err(SessionError::Auth {
                message: error.message,
            });
        }

        debug!(session = %session.id, "Session authorized");
        Ok(session)
    }

    /// This session's identity.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Send one JSON request and await exactly one JSON response.
    ///
    /// Control frames (ping/pong) are handled transparently; a close frame
    /// or stream end is [`SessionError::Closed`]. Both the send and the
    /// receive are bounded by the configured step timeout.
    pub async fn exchange<T: Serialize>(&mut self, request: &T) -> SessionResult<Value> {
        let text = serde_json::to_string(request)?;
        timeout(self.step_timeout, self.stream.send(Message::Text(text)))
            .await
            .map_err(|_| SessionError::Timeout(self.step_timeout))??;

        loop {
            let frame = timeout(self.step_timeout, self.stream.next())
                .await
                .map_err(|_| SessionError::Timeout(self.step_timeout))?;

            match frame {
                Some(Ok(Message::Text(text))) => {
                    return Ok(serde_json::from_str(&text)?);
                }
                Some(Ok(Message::Ping(data))) => {
                    self.stream.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Close(_))) => return Err(SessionError::Closed),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Err(SessionError::Closed),
            }
        }
    }

    /// Close the connection, best effort.
    ///
    /// Called on every exit path of a negotiation so no connection leaks
    /// on error; a failure to deliver the close frame is ignored because
    /// dropping the stream releases the socket regardless.
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
        debug!(session = %self.id, "Session closed");
    }
}
