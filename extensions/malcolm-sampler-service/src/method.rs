use crate::{BoundariesRequest, Handle, PosteriorBatch, SampleChunk, SampleRequest};
use std::fmt;
use std::io;
use std::str::FromStr;

/// Couples a method ID with the serialization of one request unit and one
/// response unit.
///
/// Streaming is expressed by the call shape, not the trait: a client-streaming
/// method sends several encoded `Request`s, a server-streaming method answers
/// with several encoded `Response`s.
pub trait SamplerMethod {
    /// A unique identifier for the method, see `sampler_method_id!`.
    const METHOD_ID: u64;

    /// Method name as it appears in logs.
    const NAME: &'static str;

    type Request;
    type Response;

    fn encode_request(request: Self::Request) -> Vec<u8>;

    /// Decodes raw request bytes into a typed request.
    ///
    /// # Arguments
    /// * `bytes` - Serialized request payload.
    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error>;

    fn encode_response(response: Self::Response) -> Vec<u8>;

    /// Decodes raw response bytes into a typed response.
    ///
    /// # Arguments
    /// * `bytes` - Serialized response payload.
    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error>;
}

/// A wire variant of the sampling service.
///
/// Each variant names its three methods and how their messages are laid out;
/// the domain-level request and response types are shared, so client and
/// server logic never depend on which variant is in use.
pub trait SamplerProtocol: Send + Sync + 'static {
    const VERSION: ProtocolVersion;

    type RegisterBoundaries: SamplerMethod<Request = BoundariesRequest, Response = Handle>;
    type RegisterPosterior: SamplerMethod<Request = PosteriorBatch, Response = Handle>;
    type RequestSamples: SamplerMethod<Request = SampleRequest, Response = SampleChunk>;
}

/// Runtime selector for the supported wire variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVersion {
    /// `PutBoundaries` / `RegisterTrueSamples` / `Walk`, bare string handles.
    Appraiser,
    /// `AddBoundaries` / `AddPosterior` / `MakeSamples`, wrapped handles.
    #[default]
    MalcolmSampler,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::Appraiser => write!(f, "appraiser"),
            ProtocolVersion::MalcolmSampler => write!(f, "malcolm-sampler"),
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "appraiser" => Ok(ProtocolVersion::Appraiser),
            "malcolm-sampler" | "malcolm_sampler" | "malcolmsampler" => {
                Ok(ProtocolVersion::MalcolmSampler)
            }
            other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown protocol version: {}", other),
            )),
        }
    }
}
