//! The newer "MalcolmSampler" interface. Handles are wrapped in a `Uuid`
//! message rather than sent as bare strings.

use crate::codec::decode_wire;
use crate::{
    BoundariesRequest, Handle, PosteriorBatch, ProtocolVersion, SampleChunk, SampleRequest,
    SamplerMethod, SamplerProtocol, sampler_method_id,
};
use bitcode::{Decode, Encode};
use std::io;

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct Boundaries {
    pub dimension: u32,
    pub infima: Vec<f64>,
    pub suprema: Vec<f64>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct Uuid {
    pub value: String,
}

impl From<Handle> for Uuid {
    fn from(handle: Handle) -> Self {
        Uuid {
            value: handle.into_string(),
        }
    }
}

impl From<Uuid> for Handle {
    fn from(uuid: Uuid) -> Self {
        Handle::new(uuid.value)
    }
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct PosteriorSample {
    pub uuid: Uuid,
    pub coordinates: Vec<f64>,
    pub posterior_values: Vec<f64>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct SamplesRequest {
    pub uuid: Uuid,
    pub origin: Vec<f64>,
    pub amount: u32,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct Samples {
    pub coordinates: Vec<f64>,
}

pub struct AddBoundaries;

impl SamplerMethod for AddBoundaries {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.MalcolmSampler/AddBoundaries");
    const NAME: &'static str = "AddBoundaries";

    type Request = BoundariesRequest;
    type Response = Handle;

    fn encode_request(request: Self::Request) -> Vec<u8> {
        bitcode::encode(&Boundaries {
            dimension: request.dimension,
            infima: request.infima,
            suprema: request.suprema,
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error> {
        let raw = decode_wire::<Boundaries>(bytes)?;
        Ok(BoundariesRequest {
            dimension: raw.dimension,
            infima: raw.infima,
            suprema: raw.suprema,
        })
    }

    fn encode_response(handle: Self::Response) -> Vec<u8> {
        bitcode::encode(&Uuid::from(handle))
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error> {
        Ok(decode_wire::<Uuid>(bytes)?.into())
    }
}

pub struct AddPosterior;

impl SamplerMethod for AddPosterior {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.MalcolmSampler/AddPosterior");
    const NAME: &'static str = "AddPosterior";

    type Request = PosteriorBatch;
    type Response = Handle;

    fn encode_request(batch: Self::Request) -> Vec<u8> {
        bitcode::encode(&PosteriorSample {
            uuid: batch.handle.into(),
            coordinates: batch.coordinates,
            posterior_values: batch.posterior_values,
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error> {
        let raw = decode_wire::<PosteriorSample>(bytes)?;
        Ok(PosteriorBatch {
            handle: raw.uuid.into(),
            coordinates: raw.coordinates,
            posterior_values: raw.posterior_values,
        })
    }

    fn encode_response(handle: Self::Response) -> Vec<u8> {
        bitcode::encode(&Uuid::from(handle))
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error> {
        Ok(decode_wire::<Uuid>(bytes)?.into())
    }
}

pub struct MakeSamples;

impl SamplerMethod for MakeSamples {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.MalcolmSampler/MakeSamples");
    const NAME: &'static str = "MakeSamples";

    type Request = SampleRequest;
    type Response = SampleChunk;

    fn encode_request(request: Self::Request) -> Vec<u8> {
        bitcode::encode(&SamplesRequest {
            uuid: request.handle.into(),
            origin: request.origin,
            amount: request.amount,
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error> {
        let raw = decode_wire::<SamplesRequest>(bytes)?;
        Ok(SampleRequest {
            handle: raw.uuid.into(),
            origin: raw.origin,
            amount: raw.amount,
        })
    }

    fn encode_response(chunk: Self::Response) -> Vec<u8> {
        bitcode::encode(&Samples {
            coordinates: chunk.coordinates,
        })
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error> {
        let raw = decode_wire::<Samples>(bytes)?;
        Ok(SampleChunk {
            coordinates: raw.coordinates,
        })
    }
}

/// Marker type selecting the MalcolmSampler wire variant.
pub struct MalcolmSampler;

impl SamplerProtocol for MalcolmSampler {
    const VERSION: ProtocolVersion = ProtocolVersion::MalcolmSampler;

    type RegisterBoundaries = AddBoundaries;
    type RegisterPosterior = AddPosterior;
    type RequestSamples = MakeSamples;
}
