pub mod blocking;

mod endpoint;
pub use endpoint::Endpoint;

mod ws_transport;
pub use ws_transport::{WsChannel, WsTransport};

pub use malcolm_sampler_caller::SamplerClient;
pub use malcolm_sampler_service::{Appraiser, MalcolmSampler, ProtocolVersion};

/// An async sampler client speaking protocol `P` over WebSockets.
pub type TokioSamplerClient<P> = SamplerClient<WsTransport, P>;
