use malcolm_sampler_service::ProtocolVersion;
use malcolm_sampler_tokio_client::Endpoint;
use std::env;
use std::io;

/// `host:port` of a running service. When unset, the demo serves itself.
pub const ENDPOINT_ENV: &str = "MALCOLM_SAMPLER_ENDPOINT";

/// Wire variant to speak: `appraiser` or `malcolm-sampler`.
pub const PROTOCOL_ENV: &str = "MALCOLM_SAMPLER_PROTOCOL";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub endpoint: Option<Endpoint>,
    pub protocol: ProtocolVersion,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, io::Error> {
        Self::from_vars(env::var(ENDPOINT_ENV).ok(), env::var(PROTOCOL_ENV).ok())
    }

    pub fn from_vars(endpoint: Option<String>, protocol: Option<String>) -> Result<Self, io::Error> {
        let endpoint = endpoint
            .filter(|value| !value.trim().is_empty())
            .map(|value| Endpoint::parse(&value))
            .transpose()?;

        let protocol = match protocol {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => ProtocolVersion::default(),
        };

        Ok(DemoConfig { endpoint, protocol })
    }
}
