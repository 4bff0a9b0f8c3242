use async_trait::async_trait;
use malcolm_sampler::{CallStatus, SamplerError, SamplerErrorKind, SessionState};
use malcolm_sampler_service::{
    Appraiser, BoundariesRequest, Handle, MalcolmSampler, PosteriorBatch, SampleChunk,
    SampleRequest, SamplerProtocol,
};
use malcolm_sampler_tokio_client::{TokioSamplerClient, WsTransport, blocking::BlockingSamplerClient};
use malcolm_sampler_tokio_server::{
    SamplerServer, SamplerService, ServiceError, utils::bind_ephemeral_listener,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Records what it receives and answers every sample request with the origin
/// followed by two points at the center of the registered region.
#[derive(Default)]
struct RecordingService {
    reject_samples: bool,
    boundaries: Mutex<Option<BoundariesRequest>>,
    posterior: Mutex<Vec<PosteriorBatch>>,
    sample_requests: Mutex<Vec<SampleRequest>>,
}

#[async_trait]
impl SamplerService for RecordingService {
    async fn register_boundaries(&self, request: BoundariesRequest) -> Result<Handle, ServiceError> {
        *self.boundaries.lock().unwrap() = Some(request);
        Ok(Handle::from("bounds-7"))
    }

    async fn register_posterior(&self, batches: Vec<PosteriorBatch>) -> Result<Handle, ServiceError> {
        self.posterior.lock().unwrap().extend(batches);
        Ok(Handle::from("posterior-7"))
    }

    async fn request_samples(&self, request: SampleRequest) -> Result<Vec<SampleChunk>, ServiceError> {
        if self.reject_samples {
            return Err("walk diverged".into());
        }

        let center: Vec<f64> = {
            let boundaries = self.boundaries.lock().unwrap();
            let boundaries = boundaries.as_ref().ok_or("no boundaries")?;
            boundaries
                .infima
                .iter()
                .zip(&boundaries.suprema)
                .map(|(low, high)| (low + high) / 2.0)
                .collect()
        };

        let chunks = vec![
            SampleChunk {
                coordinates: request.origin.clone(),
            },
            SampleChunk {
                coordinates: center.iter().chain(&center).copied().collect(),
            },
        ];
        self.sample_requests.lock().unwrap().push(request);

        Ok(chunks)
    }
}

async fn spawn_server<P: SamplerProtocol>(service: Arc<RecordingService>) -> SocketAddr {
    let (listener, addr) = bind_ephemeral_listener().await.unwrap();
    let server = Arc::new(SamplerServer::<_, P>::with_shared(service));

    tokio::spawn(async move {
        let _ = server.serve_with_listener(listener).await;
    });

    addr
}

async fn full_session<P: SamplerProtocol>() {
    let service = Arc::new(RecordingService::default());
    let addr = spawn_server::<P>(service.clone()).await;

    let mut client = TokioSamplerClient::<P>::new(WsTransport::new(&addr.to_string()).unwrap());

    client
        .register_boundaries(vec![(0.0, 2.0), (-4.0, 4.0)])
        .await
        .unwrap();
    assert_eq!(client.state(), SessionState::BoundariesSet);
    assert_eq!(client.boundaries_handle(), Some(&Handle::from("bounds-7")));

    client
        .register_posterior(&[[0.5, 1.0], [1.5, -3.0]], &[0.25, 0.75])
        .await
        .unwrap();
    assert_eq!(client.state(), SessionState::PosteriorSet);

    let posterior = service.posterior.lock().unwrap().clone();
    assert_eq!(posterior.len(), 2);
    assert_eq!(posterior[1].coordinates, vec![1.5, -3.0]);
    assert_eq!(posterior[1].posterior_values, vec![0.75]);
    assert!(
        posterior
            .iter()
            .all(|batch| batch.handle == Handle::from("bounds-7"))
    );

    let points = client.request_samples(3).await.unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[1], vec![1.0, 0.0]);
    assert_eq!(points[2], vec![1.0, 0.0]);

    let origin = &points[0];
    assert!(client.boundaries().unwrap().contains(origin));

    let requests = service.sample_requests.lock().unwrap();
    assert_eq!(requests[0].handle, Handle::from("posterior-7"));
    assert_eq!(requests[0].amount, 3);
    assert_eq!(&requests[0].origin, origin);
}

#[tokio::test]
async fn malcolm_sampler_session_over_websocket() {
    full_session::<MalcolmSampler>().await;
}

#[tokio::test]
async fn appraiser_session_over_websocket() {
    full_session::<Appraiser>().await;
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let (listener, addr) = bind_ephemeral_listener().await.unwrap();
    drop(listener);

    let mut client =
        TokioSamplerClient::<MalcolmSampler>::new(WsTransport::new(&addr.to_string()).unwrap());

    let err = client
        .register_boundaries(vec![(0.0, 1.0)])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SamplerErrorKind::TransportError);
    assert_eq!(client.state(), SessionState::Uninitialized);
    assert!(client.boundaries().is_none());
}

#[tokio::test]
async fn service_failure_surfaces_as_remote_error() {
    let service = Arc::new(RecordingService {
        reject_samples: true,
        ..Default::default()
    });
    let addr = spawn_server::<Appraiser>(service).await;

    let mut client =
        TokioSamplerClient::<Appraiser>::new(WsTransport::new(&addr.to_string()).unwrap());
    client.register_boundaries(vec![(0.0, 1.0)]).await.unwrap();
    client.register_posterior(&[[0.5]], &[1.0]).await.unwrap();

    match client.request_samples(5).await {
        Err(SamplerError::Remote { status, message }) => {
            assert_eq!(status, CallStatus::Fail);
            assert_eq!(message, "walk diverged");
        }
        other => panic!("expected a remote failure, got {:?}", other),
    }

    // A failed walk leaves the session usable.
    assert_eq!(client.state(), SessionState::PosteriorSet);
}

#[tokio::test]
async fn client_and_server_must_agree_on_the_variant() {
    let addr = spawn_server::<Appraiser>(Arc::new(RecordingService::default())).await;

    let mut client =
        TokioSamplerClient::<MalcolmSampler>::new(WsTransport::new(&addr.to_string()).unwrap());

    match client.register_boundaries(vec![(0.0, 1.0)]).await {
        Err(SamplerError::Remote { status, .. }) => {
            assert_eq!(status, CallStatus::MethodNotFound)
        }
        other => panic!("expected MethodNotFound, got {:?}", other),
    }
}

#[test]
fn blocking_client_runs_a_full_session() {
    let service = Arc::new(RecordingService::default());
    let (addr_tx, addr_rx) = std::sync::mpsc::channel();

    {
        let service = service.clone();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let (listener, addr) = bind_ephemeral_listener().await.unwrap();
                addr_tx.send(addr).unwrap();

                let server = Arc::new(SamplerServer::<_, MalcolmSampler>::with_shared(service));
                let _ = server.serve_with_listener(listener).await;
            });
        });
    }

    let addr = addr_rx.recv().unwrap();
    let mut client = BlockingSamplerClient::<MalcolmSampler>::new(&addr.to_string()).unwrap();

    client.register_boundaries(vec![(10.0, 20.0)]).unwrap();
    client
        .register_posterior(&[vec![12.0], vec![18.0]], &[1.0, 2.0])
        .unwrap();

    let points = client.request_samples(2).unwrap();

    assert_eq!(points.len(), 3);
    assert!((10.0..=20.0).contains(&points[0][0]));
    assert_eq!(points[1], vec![15.0]);
    assert_eq!(client.posterior_handle(), Some(&Handle::from("posterior-7")));
    assert_eq!(service.posterior.lock().unwrap().len(), 2);
}
