use async_trait::async_trait;
use malcolm_sampler_service::{BoundariesRequest, Handle, PosteriorBatch, SampleChunk, SampleRequest};

/// Error returned by a service handler. Reported to the caller as `Fail`.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Application logic behind a `SamplerServer`.
///
/// Handlers see the shared request types, so one implementation serves every
/// wire variant.
#[async_trait]
pub trait SamplerService: Send + Sync + 'static {
    async fn register_boundaries(&self, request: BoundariesRequest) -> Result<Handle, ServiceError>;

    /// Receives the whole posterior stream, in the order it was sent.
    async fn register_posterior(&self, batches: Vec<PosteriorBatch>) -> Result<Handle, ServiceError>;

    /// Produces the response stream for a sampling request. Each chunk is sent
    /// as its own message.
    async fn request_samples(&self, request: SampleRequest) -> Result<Vec<SampleChunk>, ServiceError>;
}
