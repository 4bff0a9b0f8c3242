mod sampler_server;
pub use sampler_server::{CLIENT_TIMEOUT, SamplerServer};

mod service;
pub use service::{SamplerService, ServiceError};

pub mod utils;

pub use malcolm_sampler_service::constants::SAMPLER_WS_ROUTE as WS_ROUTE;
