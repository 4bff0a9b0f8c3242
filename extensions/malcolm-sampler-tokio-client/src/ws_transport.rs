use crate::Endpoint;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use malcolm_sampler::frame::{Frame, FrameCodec};
use malcolm_sampler_caller::{SamplerChannel, SamplerTransport};
use std::io;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Error as WsError, protocol::Message as WsMessage},
};

/// Connects to the sampler route of a service, one WebSocket per call.
#[derive(Debug, Clone)]
pub struct WsTransport {
    endpoint: Endpoint,
    url: String,
}

impl WsTransport {
    /// Creates a transport for a service address.
    ///
    /// Nothing is dialed until a call is made.
    ///
    /// # Arguments
    ///
    /// * `address` - A `host:port` string, see `Endpoint::parse`.
    ///
    /// # Returns
    ///
    /// `InvalidInput` if the address cannot be parsed.
    pub fn new(address: &str) -> Result<Self, io::Error> {
        Ok(Self::from_endpoint(Endpoint::parse(address)?))
    }

    pub fn from_endpoint(endpoint: Endpoint) -> Self {
        let url = endpoint.ws_url();
        WsTransport { endpoint, url }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The WebSocket URL every channel connects to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SamplerTransport for WsTransport {
    type Channel = WsChannel;

    /// Performs the WebSocket handshake. Tungstenite errors are mapped to
    /// `io::Error`, keeping the original kind for socket failures such as
    /// `ConnectionRefused`.
    async fn open_channel(&self) -> io::Result<WsChannel> {
        let (stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(ws_to_io)?;

        tracing::debug!("Connected to {}", self.url);

        Ok(WsChannel {
            stream,
            closed: false,
        })
    }
}

/// A single WebSocket connection carrying one call.
///
/// Dropping the channel drops the socket, so the connection is released even
/// if `close` is never reached.
pub struct WsChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    closed: bool,
}

#[async_trait]
impl SamplerChannel for WsChannel {
    async fn send_frame(&mut self, frame: Frame) -> io::Result<()> {
        let bytes = Bytes::from(FrameCodec::encode(&frame)?);
        self.stream
            .send(WsMessage::Binary(bytes))
            .await
            .map_err(ws_to_io)
    }

    async fn recv_frame(&mut self) -> io::Result<Option<Frame>> {
        loop {
            match self.stream.next().await {
                None => return Ok(None),
                Some(Err(err)) => return Err(ws_to_io(err)),
                Some(Ok(WsMessage::Binary(bytes))) => {
                    return Ok(Some(FrameCodec::decode(&bytes)?));
                }
                Some(Ok(WsMessage::Close(_))) => {
                    self.closed = true;
                    return Ok(None);
                }
                Some(Ok(WsMessage::Text(_))) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "unexpected text message",
                    ));
                }
                // Pings are answered by tungstenite on the next read.
                Some(Ok(_)) => continue,
            }
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        match self.stream.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(err) => Err(ws_to_io(err)),
        }
    }
}

fn ws_to_io(err: WsError) -> io::Error {
    match err {
        WsError::Io(err) => err,
        other => io::Error::other(other),
    }
}
