//! The older "Appraiser" interface. Handles travel as bare strings.

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
    pub uuid: String,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct TrueSamples {
    pub uuid: String,
    pub coordinates: Vec<f64>,
    pub posterior_values: Vec<f64>,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct WalkRequest {
    pub uuid: String,
    pub starting_point: Vec<f64>,
    pub number_of_samples: u32,
}

#[derive(Encode, Decode, PartialEq, Debug)]
pub struct Samples {
    pub coordinates: Vec<f64>,
}

fn encode_uuid(handle: Handle) -> Vec<u8> {
    bitcode::encode(&Uuid {
        uuid: handle.into_string(),
    })
}

fn decode_uuid(bytes: &[u8]) -> Result<Handle, io::Error> {
    let raw = decode_wire::<Uuid>(bytes)?;
    Ok(Handle::new(raw.uuid))
}

pub struct PutBoundaries;

impl SamplerMethod for PutBoundaries {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.Appraiser/PutBoundaries");
    const NAME: &'static str = "PutBoundaries";

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
        encode_uuid(handle)
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error> {
        decode_uuid(bytes)
    }
}

pub struct RegisterTrueSamples;

impl SamplerMethod for RegisterTrueSamples {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.Appraiser/RegisterTrueSamples");
    const NAME: &'static str = "RegisterTrueSamples";

    type Request = PosteriorBatch;
    type Response = Handle;

    fn encode_request(batch: Self::Request) -> Vec<u8> {
        bitcode::encode(&TrueSamples {
            uuid: batch.handle.into_string(),
            coordinates: batch.coordinates,
            posterior_values: batch.posterior_values,
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error> {
        let raw = decode_wire::<TrueSamples>(bytes)?;
        Ok(PosteriorBatch {
            handle: Handle::new(raw.uuid),
            coordinates: raw.coordinates,
            posterior_values: raw.posterior_values,
        })
    }

    fn encode_response(handle: Self::Response) -> Vec<u8> {
        encode_uuid(handle)
    }

    fn decode_response(bytes: &[u8]) -> Result<Self::Response, io::Error> {
        decode_uuid(bytes)
    }
}

pub struct Walk;

impl SamplerMethod for Walk {
    const METHOD_ID: u64 = sampler_method_id!("malcolm.Appraiser/Walk");
    const NAME: &'static str = "Walk";

    type Request = SampleRequest;
    type Response = SampleChunk;

    fn encode_request(request: Self::Request) -> Vec<u8> {
        bitcode::encode(&WalkRequest {
            uuid: request.handle.into_string(),
            starting_point: request.origin,
            number_of_samples: request.amount,
        })
    }

    fn decode_request(bytes: &[u8]) -> Result<Self::Request, io::Error> {
        let raw = decode_wire::<WalkRequest>(bytes)?;
        Ok(SampleRequest {
            handle: Handle::new(raw.uuid),
            origin: raw.starting_point,
            amount: raw.number_of_samples,
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

/// Marker type selecting the Appraiser wire variant.
pub struct Appraiser;

impl SamplerProtocol for Appraiser {
    const VERSION: ProtocolVersion = ProtocolVersion::Appraiser;

    type RegisterBoundaries = PutBoundaries;
    type RegisterPosterior = RegisterTrueSamples;
    type RequestSamples = Walk;
}
