use malcolm_sampler::Boundaries;
use std::fmt;

/// An opaque, server-issued token referencing registered state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Handle(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Handle(value)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Handle(value.to_owned())
    }
}

/// Registers an axis-aligned region.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundariesRequest {
    pub dimension: u32,
    pub infima: Vec<f64>,
    pub suprema: Vec<f64>,
}

impl From<&Boundaries> for BoundariesRequest {
    fn from(boundaries: &Boundaries) -> Self {
        BoundariesRequest {
            dimension: boundaries.dimension() as u32,
            infima: boundaries.infima(),
            suprema: boundaries.suprema(),
        }
    }
}

/// One streamed posterior observation.
///
/// `posterior_values` can hold several values per point on the wire, but the
/// client always sends exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorBatch {
    pub handle: Handle,
    pub coordinates: Vec<f64>,
    pub posterior_values: Vec<f64>,
}

/// Asks the service to walk from `origin` for roughly `amount` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    pub handle: Handle,
    pub origin: Vec<f64>,
    pub amount: u32,
}

/// A flat run of concatenated points, `D` coordinates each.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleChunk {
    pub coordinates: Vec<f64>,
}
