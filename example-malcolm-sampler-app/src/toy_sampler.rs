use async_trait::async_trait;
use malcolm_sampler_service::{
    BoundariesRequest, Handle, PosteriorBatch, SampleChunk, SampleRequest,
};
use malcolm_sampler_tokio_server::{SamplerService, ServiceError};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Upper bound on points per response chunk.
pub const MAX_CHUNK_POINTS: usize = 16;

struct Region {
    infima: Vec<f64>,
    suprema: Vec<f64>,
}

/// In-process stand-in for a real sampler.
///
/// Returns `amount` points drawn uniformly inside the registered region,
/// starting with the requested origin. The posterior is only counted.
#[derive(Default)]
pub struct ToySampler {
    regions: Mutex<HashMap<Handle, Region>>,
    posteriors: Mutex<HashMap<Handle, (Handle, usize)>>,
}

impl ToySampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations stored under a posterior handle.
    pub fn observation_count(&self, posterior: &Handle) -> Option<usize> {
        let posteriors = self.posteriors.lock().ok()?;
        posteriors.get(posterior).map(|(_, count)| *count)
    }

    fn draw(region: &Region, origin: &[f64], amount: usize) -> Vec<SampleChunk> {
        let mut rng = rand::rng();
        let mut coordinates = Vec::with_capacity(amount * origin.len());

        if amount > 0 {
            coordinates.extend_from_slice(origin);
        }
        for _ in 1..amount {
            for (low, high) in region.infima.iter().zip(&region.suprema) {
                coordinates.push(rng.random_range(*low..=*high));
            }
        }

        let dimension = origin.len().max(1);
        coordinates
            .chunks(MAX_CHUNK_POINTS * dimension)
            .map(|chunk| SampleChunk {
                coordinates: chunk.to_vec(),
            })
            .collect()
    }
}

fn new_handle() -> Handle {
    Handle::new(Uuid::new_v4().to_string())
}

#[async_trait]
impl SamplerService for ToySampler {
    async fn register_boundaries(&self, request: BoundariesRequest) -> Result<Handle, ServiceError> {
        let ordered = request
            .infima
            .iter()
            .zip(&request.suprema)
            .all(|(low, high)| low.is_finite() && high.is_finite() && low <= high);
        if !ordered {
            return Err("every axis needs finite bounds with low <= high".into());
        }

        let handle = new_handle();

        self.regions.lock().map_err(|_| "region table poisoned")?.insert(
            handle.clone(),
            Region {
                infima: request.infima,
                suprema: request.suprema,
            },
        );

        tracing::info!("Stored {}-dimensional region {}", request.dimension, handle);
        Ok(handle)
    }

    async fn register_posterior(&self, batches: Vec<PosteriorBatch>) -> Result<Handle, ServiceError> {
        let region = batches
            .first()
            .map(|batch| batch.handle.clone())
            .ok_or("posterior stream was empty")?;

        if batches.iter().any(|batch| batch.handle != region) {
            return Err("posterior stream mixes regions".into());
        }

        {
            let regions = self.regions.lock().map_err(|_| "region table poisoned")?;
            if !regions.contains_key(&region) {
                return Err(format!("unknown region {}", region).into());
            }
        }

        let handle = new_handle();
        self.posteriors
            .lock()
            .map_err(|_| "posterior table poisoned")?
            .insert(handle.clone(), (region, batches.len()));

        tracing::info!("Stored {} observation(s) as {}", batches.len(), handle);
        Ok(handle)
    }

    async fn request_samples(&self, request: SampleRequest) -> Result<Vec<SampleChunk>, ServiceError> {
        let region_handle = {
            let posteriors = self
                .posteriors
                .lock()
                .map_err(|_| "posterior table poisoned")?;
            posteriors
                .get(&request.handle)
                .map(|(region, _)| region.clone())
                .ok_or_else(|| format!("unknown posterior {}", request.handle))?
        };

        let regions = self.regions.lock().map_err(|_| "region table poisoned")?;
        let region = regions
            .get(&region_handle)
            .ok_or_else(|| format!("unknown region {}", region_handle))?;

        if request.origin.len() != region.infima.len() {
            return Err(format!(
                "origin has {} coordinates, region has {}",
                request.origin.len(),
                region.infima.len()
            )
            .into());
        }

        Ok(Self::draw(region, &request.origin, request.amount as usize))
    }
}
