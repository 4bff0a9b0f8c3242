use crate::{
    SamplerTransport, read_next_response, read_unary_response, release_channel,
    send_request_stream,
};
use malcolm_sampler::{Boundaries, Point, SamplerError, SessionState, reshape_chunk, sample_origin};
use malcolm_sampler_service::{
    BoundariesRequest, Handle, PosteriorBatch, SampleRequest, SamplerMethod, SamplerProtocol,
};
use std::marker::PhantomData;

/// Client-side session with a remote sampling service.
///
/// The client registers a bounding region, then a batch of posterior
/// observations, and finally requests sample points. Each operation opens its
/// own channel through `T` and closes it before returning, on success and on
/// failure alike. `P` selects the wire variant.
///
/// The session only moves forward (`Uninitialized → BoundariesSet →
/// PosteriorSet`). The region is fixed once registered, so `D` never changes
/// for the lifetime of the client. The posterior may be registered again and
/// the newest handle wins.
pub struct SamplerClient<T, P>
where
    T: SamplerTransport,
    P: SamplerProtocol,
{
    transport: T,
    boundaries: Option<Boundaries>,
    boundaries_handle: Option<Handle>,
    posterior_handle: Option<Handle>,
    state: SessionState,
    _protocol: PhantomData<P>,
}

impl<T, P> SamplerClient<T, P>
where
    T: SamplerTransport,
    P: SamplerProtocol,
{
    /// Creates a client in the `Uninitialized` state.
    ///
    /// No channel is opened until the first operation; each operation asks
    /// `transport` for a fresh one.
    pub fn new(transport: T) -> Self {
        SamplerClient {
            transport,
            boundaries: None,
            boundaries_handle: None,
            posterior_handle: None,
            state: SessionState::Uninitialized,
            _protocol: PhantomData,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The registered region, if any.
    pub fn boundaries(&self) -> Option<&Boundaries> {
        self.boundaries.as_ref()
    }

    /// `D`, once boundaries are registered.
    pub fn dimension(&self) -> Option<usize> {
        self.boundaries.as_ref().map(Boundaries::dimension)
    }

    pub fn boundaries_handle(&self) -> Option<&Handle> {
        self.boundaries_handle.as_ref()
    }

    pub fn posterior_handle(&self) -> Option<&Handle> {
        self.posterior_handle.as_ref()
    }

    /// Registers the sampling region with the service.
    ///
    /// The pairs are validated and copied before anything is sent; the stored
    /// copy becomes the domain for origin draws in `request_samples`.
    ///
    /// # Arguments
    ///
    /// * `pairs` - One `(low, high)` pair per axis.
    ///
    /// # Returns
    ///
    /// `PreconditionFailed` if a region is already registered,
    /// `InvalidBoundaries` if the pairs are rejected, or a transport error.
    pub async fn register_boundaries<I>(&mut self, pairs: I) -> Result<(), SamplerError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        if self.state.has_boundaries() {
            return Err(SamplerError::PreconditionFailed(
                "boundaries are already registered for this session",
            ));
        }

        let boundaries = Boundaries::new(pairs)?;
        let request = BoundariesRequest::from(&boundaries);

        let handle = self
            .call_unary::<P::RegisterBoundaries>(vec![
                <P::RegisterBoundaries as SamplerMethod>::encode_request(request),
            ])
            .await?;

        tracing::info!(
            "Registered {}-dimensional boundaries as {}",
            boundaries.dimension(),
            handle
        );

        self.boundaries = Some(boundaries);
        self.boundaries_handle = Some(handle);
        self.state = self.state.advance(SessionState::BoundariesSet);

        Ok(())
    }

    /// Streams posterior observations to the service, one unit per point, in
    /// input order. Each unit carries the boundaries handle, the point and a
    /// single-element value list.
    ///
    /// # Arguments
    ///
    /// * `points` - Evaluated points, each with exactly `D` coordinates.
    /// * `values` - The posterior value of each point, in the same order.
    ///
    /// # Returns
    ///
    /// `PreconditionFailed` before boundaries are registered, or a
    /// `DimensionMismatch`-kind error if the lengths differ or a point has the
    /// wrong dimension. These checks run before any channel is opened.
    pub async fn register_posterior<Q>(
        &mut self,
        points: &[Q],
        values: &[f64],
    ) -> Result<(), SamplerError>
    where
        Q: AsRef<[f64]>,
    {
        let (boundaries, boundaries_handle) = match (&self.boundaries, &self.boundaries_handle) {
            (Some(boundaries), Some(handle)) => (boundaries, handle),
            _ => {
                return Err(SamplerError::PreconditionFailed(
                    "boundaries must be registered before the posterior",
                ));
            }
        };

        if points.len() != values.len() {
            return Err(SamplerError::LengthMismatch {
                points: points.len(),
                values: values.len(),
            });
        }

        let mut payloads = Vec::with_capacity(points.len());
        for (point, &value) in points.iter().zip(values) {
            let point = point.as_ref();
            boundaries.check_point(point)?;

            payloads.push(<P::RegisterPosterior as SamplerMethod>::encode_request(
                PosteriorBatch {
                    handle: boundaries_handle.clone(),
                    coordinates: point.to_vec(),
                    posterior_values: vec![value],
                },
            ));
        }

        let handle = self.call_unary::<P::RegisterPosterior>(payloads).await?;

        tracing::info!(
            "Registered {} posterior observation(s) as {}",
            points.len(),
            handle
        );

        self.posterior_handle = Some(handle);
        self.state = self.state.advance(SessionState::PosteriorSet);

        Ok(())
    }

    /// Requests sample points from the service.
    ///
    /// A fresh origin is drawn uniformly inside the registered region on every
    /// call. The service streams flat coordinate chunks which are split into
    /// points of `D` coordinates, keeping the order in which they arrive.
    ///
    /// The whole stream is read before returning. The number of points is
    /// whatever the service sends and may differ from `amount`.
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of samples to ask for. Passed through unchanged.
    ///
    /// # Returns
    ///
    /// The points in arrival order, each with `D` coordinates. Fails with
    /// `PreconditionFailed` until both handles exist, and with a
    /// `DimensionMismatch`-kind error if a chunk is not a whole number of
    /// points.
    pub async fn request_samples(&self, amount: u32) -> Result<Vec<Point>, SamplerError> {
        let (boundaries, posterior_handle) = match (&self.boundaries, &self.posterior_handle) {
            (Some(boundaries), Some(handle)) => (boundaries, handle),
            (None, _) => {
                return Err(SamplerError::PreconditionFailed(
                    "boundaries must be registered before requesting samples",
                ));
            }
            (Some(_), None) => {
                return Err(SamplerError::PreconditionFailed(
                    "posterior must be registered before requesting samples",
                ));
            }
        };

        let dimension = boundaries.dimension();
        let origin = sample_origin(boundaries, &mut rand::rng());

        let payload = <P::RequestSamples as SamplerMethod>::encode_request(SampleRequest {
            handle: posterior_handle.clone(),
            origin,
            amount,
        });

        let mut channel = self.transport.open_channel().await?;
        let result = Self::exchange_samples(&mut channel, payload, dimension, amount).await;
        release_channel(channel).await;

        result
    }

    /// Performs a call that expects exactly one response message.
    async fn call_unary<M>(&self, payloads: Vec<Vec<u8>>) -> Result<M::Response, SamplerError>
    where
        M: SamplerMethod,
    {
        tracing::debug!("Opening channel for {}", M::NAME);

        let mut channel = self.transport.open_channel().await?;
        let result = Self::exchange_unary::<M>(&mut channel, payloads).await;
        release_channel(channel).await;

        result
    }

    async fn exchange_unary<M>(
        channel: &mut T::Channel,
        payloads: Vec<Vec<u8>>,
    ) -> Result<M::Response, SamplerError>
    where
        M: SamplerMethod,
    {
        send_request_stream(channel, M::METHOD_ID, payloads).await?;
        read_unary_response::<M, _>(channel).await
    }

    async fn exchange_samples(
        channel: &mut T::Channel,
        payload: Vec<u8>,
        dimension: usize,
        amount: u32,
    ) -> Result<Vec<Point>, SamplerError> {
        send_request_stream(
            channel,
            <P::RequestSamples as SamplerMethod>::METHOD_ID,
            vec![payload],
        )
        .await?;

        let mut points = Vec::new();
        let mut chunks = 0usize;
        while let Some(bytes) = read_next_response(channel).await? {
            let chunk = <P::RequestSamples as SamplerMethod>::decode_response(&bytes)?;
            points.extend(reshape_chunk(&chunk.coordinates, dimension)?);
            chunks += 1;
        }

        tracing::debug!(
            "Received {} point(s) in {} chunk(s) for {} requested",
            points.len(),
            chunks,
            amount
        );

        Ok(points)
    }
}
