use malcolm_sampler::frame::Frame;
use std::io;

/// One call's worth of bidirectional frame exchange with the service.
///
/// A channel is opened for a single call and never reused. Implementations
/// must release the underlying connection when dropped, so that error paths
/// which skip `close` still tear the channel down.
#[async_trait::async_trait]
pub trait SamplerChannel: Send {
    async fn send_frame(&mut self, frame: Frame) -> Result<(), io::Error>;

    /// Returns `Ok(None)` once the service has closed its side of the channel.
    async fn recv_frame(&mut self) -> Result<Option<Frame>, io::Error>;

    /// Gracefully closes the channel.
    async fn close(&mut self) -> Result<(), io::Error>;
}

/// Opens channels to a single, fixed service endpoint.
#[async_trait::async_trait]
pub trait SamplerTransport: Send + Sync {
    type Channel: SamplerChannel;

    async fn open_channel(&self) -> Result<Self::Channel, io::Error>;
}
