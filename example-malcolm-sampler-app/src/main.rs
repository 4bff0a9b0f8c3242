use example_malcolm_sampler_app::{ToySampler, config::DemoConfig};
use malcolm_sampler_service::{Appraiser, MalcolmSampler, ProtocolVersion, SamplerProtocol};
use malcolm_sampler_tokio_client::{Endpoint, TokioSamplerClient, WsTransport};
use malcolm_sampler_tokio_server::{SamplerServer, utils::bind_ephemeral_listener};
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type DemoResult = Result<(), Box<dyn Error + Send + Sync>>;

#[tokio::main]
async fn main() -> DemoResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DemoConfig::from_env()?;

    match config.protocol {
        ProtocolVersion::Appraiser => run::<Appraiser>(config.endpoint).await,
        ProtocolVersion::MalcolmSampler => run::<MalcolmSampler>(config.endpoint).await,
    }
}

async fn run<P: SamplerProtocol>(endpoint: Option<Endpoint>) -> DemoResult {
    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => {
            // No remote service configured; serve the toy sampler locally.
            let (listener, addr) = bind_ephemeral_listener().await?;
            let server = Arc::new(SamplerServer::<_, P>::new(ToySampler::new()));
            tokio::spawn(async move {
                if let Err(err) = server.serve_with_listener(listener).await {
                    tracing::error!("Toy sampler stopped: {}", err);
                }
            });
            Endpoint::parse(&addr.to_string())?
        }
    };

    tracing::info!("Speaking {} to {}", P::VERSION, endpoint);

    let mut client = TokioSamplerClient::<P>::new(WsTransport::from_endpoint(endpoint));

    client
        .register_boundaries(vec![(-1.0, 1.0), (0.0, 10.0)])
        .await?;

    let observations = [[-0.5, 2.0], [0.0, 5.0], [0.5, 8.0]];
    let densities = [0.1, 0.7, 0.2];
    client.register_posterior(&observations, &densities).await?;

    let samples = client.request_samples(40).await?;

    println!("Received {} sample(s):", samples.len());
    for point in &samples {
        println!("  {:?}", point);
    }

    Ok(())
}
