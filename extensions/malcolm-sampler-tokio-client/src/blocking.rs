//! Synchronous wrapper for callers that do not run inside an async runtime.
//!
//! Each call blocks the current thread until the exchange with the service
//! has finished. Must not be used from within a Tokio runtime.

use crate::{Endpoint, TokioSamplerClient, WsTransport};
use malcolm_sampler::{Boundaries, Point, SamplerError, SessionState};
use malcolm_sampler_service::{Handle, SamplerProtocol};
use tokio::runtime::{Builder, Runtime};

/// Blocking sampler client speaking protocol `P`.
pub struct BlockingSamplerClient<P: SamplerProtocol> {
    runtime: Runtime,
    inner: TokioSamplerClient<P>,
}

impl<P: SamplerProtocol> BlockingSamplerClient<P> {
    /// Creates a client for a `host:port` address.
    ///
    /// # Arguments
    ///
    /// * `address` - The service address, see `Endpoint::parse`.
    ///
    /// # Returns
    ///
    /// A transport error if the address is invalid or the runtime cannot be
    /// built. No connection is made yet.
    pub fn new(address: &str) -> Result<Self, SamplerError> {
        Self::from_endpoint(Endpoint::parse(address)?)
    }

    pub fn from_endpoint(endpoint: Endpoint) -> Result<Self, SamplerError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        Ok(BlockingSamplerClient {
            runtime,
            inner: TokioSamplerClient::new(WsTransport::from_endpoint(endpoint)),
        })
    }

    pub fn state(&self) -> SessionState {
        self.inner.state()
    }

    pub fn boundaries(&self) -> Option<&Boundaries> {
        self.inner.boundaries()
    }

    pub fn boundaries_handle(&self) -> Option<&Handle> {
        self.inner.boundaries_handle()
    }

    pub fn posterior_handle(&self) -> Option<&Handle> {
        self.inner.posterior_handle()
    }

    /// Blocking form of `SamplerClient::register_boundaries`.
    pub fn register_boundaries<I>(&mut self, pairs: I) -> Result<(), SamplerError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.runtime.block_on(self.inner.register_boundaries(pairs))
    }

    pub fn register_posterior<Q>(&mut self, points: &[Q], values: &[f64]) -> Result<(), SamplerError>
    where
        Q: AsRef<[f64]>,
    {
        self.runtime
            .block_on(self.inner.register_posterior(points, values))
    }

    /// Blocking form of `SamplerClient::request_samples`.
    pub fn request_samples(&self, amount: u32) -> Result<Vec<Point>, SamplerError> {
        self.runtime.block_on(self.inner.request_samples(amount))
    }

    /// Gives back the async client, dropping the owned runtime.
    pub fn into_inner(self) -> TokioSamplerClient<P> {
        self.inner
    }
}
