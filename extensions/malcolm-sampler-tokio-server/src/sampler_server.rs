//! Note: `SamplerServer` is a reference implementation without authentication
//! or authorization. It is meant for trusted networks, local development and
//! integration tests.

use crate::SamplerService;
use axum::{
    Router,
    extract::ConnectInfo,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use bytes::Bytes;
use futures_util::StreamExt;
use malcolm_sampler::CallStatus;
use malcolm_sampler::frame::{Frame, FrameCodec, FrameKind};
use malcolm_sampler_service::{SamplerMethod, SamplerProtocol, constants::SAMPLER_WS_ROUTE};
use std::io;
use std::marker::PhantomData;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    net::{TcpListener, ToSocketAddrs},
    time::timeout,
};

/// The maximum time to wait for a frame from the client before giving up on
/// the connection.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// A fully received request stream.
struct InboundCall {
    method_id: u64,
    payloads: Vec<Vec<u8>>,
}

/// A call that could not be answered with a response stream.
struct Rejection {
    status: CallStatus,
    message: String,
}

impl Rejection {
    fn system(message: impl Into<String>) -> Self {
        Rejection {
            status: CallStatus::SystemError,
            message: message.into(),
        }
    }

    fn into_frame(self) -> Frame {
        Frame::error(self.status, &self.message)
    }
}

impl From<io::Error> for Rejection {
    fn from(err: io::Error) -> Self {
        Rejection::system(err.to_string())
    }
}

/// Serves a `SamplerService` over WebSockets using wire variant `P`.
///
/// Every connection carries one call: the client sends `Open`, its request
/// units and `End`; the server answers with `Data` frames and `End`, or a
/// single `Error` frame.
pub struct SamplerServer<S, P>
where
    S: SamplerService,
    P: SamplerProtocol,
{
    service: Arc<S>,
    _protocol: PhantomData<P>,
}

impl<S, P> SamplerServer<S, P>
where
    S: SamplerService,
    P: SamplerProtocol,
{
    /// Wraps `service` in a server speaking wire variant `P`.
    pub fn new(service: S) -> Self {
        Self::with_shared(Arc::new(service))
    }

    /// Serves a service the caller keeps a reference to.
    pub fn with_shared(service: Arc<S>) -> Self {
        SamplerServer {
            service,
            _protocol: PhantomData,
        }
    }

    pub fn service(&self) -> Arc<S> {
        self.service.clone()
    }

    /// Binds to an address and starts serving.
    ///
    /// # Arguments
    ///
    /// * `addr` - Any `ToSocketAddrs`, such as "127.0.0.1:8080" or a
    ///   `SocketAddr`.
    ///
    /// # Returns
    ///
    /// The bound address once the server stops, or the bind/serve error.
    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> Result<SocketAddr, axum::BoxError> {
        let listener = TcpListener::bind(addr).await?;
        Arc::new(self).serve_with_listener(listener).await
    }

    /// Convenience wrapper around `serve` for a host and port.
    pub async fn serve_on(self, host: &str, port: u16) -> Result<SocketAddr, axum::BoxError> {
        self.serve(format!("{host}:{port}")).await
    }

    /// Starts serving on a pre-bound `TcpListener`, e.g. one bound to port 0.
    ///
    /// # Arguments
    ///
    /// * `listener` - An already bound listener. Connections queued on it
    ///   before this call are accepted once serving starts.
    ///
    /// # Returns
    ///
    /// The listener's local address once the server stops.
    pub async fn serve_with_listener(
        self: Arc<Self>,
        listener: TcpListener,
    ) -> Result<SocketAddr, axum::BoxError> {
        let address = listener.local_addr()?;
        let app = Router::new().route(
            SAMPLER_WS_ROUTE,
            get({
                let server = self.clone();
                move |ws, conn| Self::ws_handler(ws, conn, server)
            }),
        );
        tracing::info!("{} server running on {:?}", P::VERSION, address);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(address)
    }

    async fn ws_handler(
        ws: WebSocketUpgrade,
        ConnectInfo(addr): ConnectInfo<SocketAddr>,
        server: Arc<Self>,
    ) -> impl IntoResponse {
        tracing::debug!("Client connected: {}", addr);
        ws.on_upgrade(move |socket| server.handle_socket(socket, addr))
    }

    async fn handle_socket(self: Arc<Self>, mut socket: WebSocket, addr: SocketAddr) {
        let replies = match read_call(&mut socket).await {
            Ok(Some(call)) => match self.dispatch(call).await {
                Ok(frames) => frames,
                Err(rejection) => {
                    tracing::warn!(
                        "Rejecting call from {} ({:?}): {}",
                        addr,
                        rejection.status,
                        rejection.message
                    );
                    vec![rejection.into_frame()]
                }
            },
            Ok(None) => {
                tracing::debug!("Client {} left before completing a call", addr);
                return;
            }
            Err(rejection) => {
                tracing::warn!("Malformed call from {}: {}", addr, rejection.message);
                vec![rejection.into_frame()]
            }
        };

        let messages = match replies
            .iter()
            .map(FrameCodec::encode)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(messages) => messages,
            Err(err) => {
                tracing::error!("Cannot encode response for {}: {}", addr, err);
                let frame = Rejection::system(err.to_string()).into_frame();
                FrameCodec::encode(&frame).into_iter().collect()
            }
        };

        for message in messages {
            if let Err(err) = socket.send(Message::Binary(Bytes::from(message))).await {
                tracing::info!("Client {} disconnected mid-response: {}", addr, err);
                return;
            }
        }

        // Let the client close first so the final frames are not cut off.
        while let Ok(Some(Ok(msg))) = timeout(CLIENT_TIMEOUT, socket.next()).await {
            if let Message::Close(_) = msg {
                break;
            }
        }

        tracing::debug!("Terminated connection for {}", addr);
    }

    async fn dispatch(&self, call: InboundCall) -> Result<Vec<Frame>, Rejection> {
        let InboundCall {
            method_id,
            payloads,
        } = call;

        let responses = if method_id == <P::RegisterBoundaries as SamplerMethod>::METHOD_ID {
            self.register_boundaries(payloads).await?
        } else if method_id == <P::RegisterPosterior as SamplerMethod>::METHOD_ID {
            self.register_posterior(payloads).await?
        } else if method_id == <P::RequestSamples as SamplerMethod>::METHOD_ID {
            self.request_samples(payloads).await?
        } else {
            return Err(Rejection {
                status: CallStatus::MethodNotFound,
                message: format!("unknown method {:#018x}", method_id),
            });
        };

        let mut frames: Vec<Frame> = responses.into_iter().map(Frame::data).collect();
        frames.push(Frame::end());

        Ok(frames)
    }

    async fn register_boundaries(
        &self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, Rejection> {
        let bytes = single_payload(&payloads, <P::RegisterBoundaries as SamplerMethod>::NAME)?;
        let request = <P::RegisterBoundaries as SamplerMethod>::decode_request(bytes)?;

        let dimension = request.dimension as usize;
        if request.infima.len() != dimension || request.suprema.len() != dimension {
            return Err(Rejection::system(format!(
                "dimension {} does not match {} infima and {} suprema",
                dimension,
                request.infima.len(),
                request.suprema.len()
            )));
        }

        let handle = self
            .service
            .register_boundaries(request)
            .await
            .map_err(service_failure)?;

        Ok(vec![<P::RegisterBoundaries as SamplerMethod>::encode_response(handle)])
    }

    async fn register_posterior(
        &self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, Rejection> {
        let batches = payloads
            .iter()
            .map(|bytes| <P::RegisterPosterior as SamplerMethod>::decode_request(bytes))
            .collect::<Result<Vec<_>, _>>()?;

        let handle = self
            .service
            .register_posterior(batches)
            .await
            .map_err(service_failure)?;

        Ok(vec![<P::RegisterPosterior as SamplerMethod>::encode_response(handle)])
    }

    async fn request_samples(
        &self,
        payloads: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, Rejection> {
        let bytes = single_payload(&payloads, <P::RequestSamples as SamplerMethod>::NAME)?;
        let request = <P::RequestSamples as SamplerMethod>::decode_request(bytes)?;

        let chunks = self
            .service
            .request_samples(request)
            .await
            .map_err(service_failure)?;

        Ok(chunks
            .into_iter()
            .map(<P::RequestSamples as SamplerMethod>::encode_response)
            .collect())
    }
}

fn single_payload<'a>(payloads: &'a [Vec<u8>], name: &str) -> Result<&'a [u8], Rejection> {
    match payloads {
        [payload] => Ok(payload.as_slice()),
        _ => Err(Rejection::system(format!(
            "{} expects exactly one request message, got {}",
            name,
            payloads.len()
        ))),
    }
}

fn service_failure(err: crate::ServiceError) -> Rejection {
    tracing::error!("Service handler failed: {}", err);
    Rejection {
        status: CallStatus::Fail,
        message: err.to_string(),
    }
}

/// Reads `Open`, any number of `Data` frames, and `End`.
///
/// Returns `Ok(None)` if the client goes away before sending anything.
async fn read_call(socket: &mut WebSocket) -> Result<Option<InboundCall>, Rejection> {
    let open = match read_frame(socket).await? {
        Some(frame) => frame,
        None => return Ok(None),
    };

    let method_id = open
        .method_id()
        .map_err(|_| Rejection::system("call must start with an Open frame"))?;

    let mut payloads = Vec::new();
    loop {
        let frame = read_frame(socket).await?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "client closed before the request stream ended",
            )
        })?;

        match frame.kind {
            FrameKind::Data => payloads.push(frame.payload),
            FrameKind::End => break,
            other => {
                return Err(Rejection::system(format!(
                    "unexpected {:?} frame in request stream",
                    other
                )));
            }
        }
    }

    Ok(Some(InboundCall {
        method_id,
        payloads,
    }))
}

async fn read_frame(socket: &mut WebSocket) -> Result<Option<Frame>, io::Error> {
    loop {
        let next = timeout(CLIENT_TIMEOUT, socket.next())
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "client timed out"))?;

        match next {
            None | Some(Ok(Message::Close(_))) => return Ok(None),
            Some(Err(err)) => return Err(io::Error::other(err)),
            Some(Ok(Message::Binary(bytes))) => return Ok(Some(FrameCodec::decode(&bytes)?)),
            Some(Ok(Message::Text(_))) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "unexpected text message",
                ));
            }
            Some(Ok(_)) => continue,
        }
    }
}
