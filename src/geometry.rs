use crate::SamplerError;
use rand::Rng;

/// A single point; always carries exactly `D` coordinates for the session's
/// registered dimension.
pub type Point = Vec<f64>;

/// An axis-aligned box: one `(low, high)` pair per axis.
///
/// Construction copies the caller's pairs, so mutating the original sequence
/// afterwards has no effect on a registered region.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundaries {
    bounds: Vec<(f64, f64)>,
}

impl Boundaries {
    /// Builds a region from `(low, high)` pairs.
    ///
    /// Rejects an empty sequence, non-finite bounds, and any axis with
    /// `low > high`. Degenerate axes (`low == high`) are accepted.
    pub fn new<I>(pairs: I) -> Result<Self, SamplerError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let bounds: Vec<(f64, f64)> = pairs.into_iter().collect();

        if bounds.is_empty() {
            return Err(SamplerError::InvalidBoundaries(
                "at least one axis is required".into(),
            ));
        }

        for (axis, &(low, high)) in bounds.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() {
                return Err(SamplerError::InvalidBoundaries(format!(
                    "axis {} has a non-finite bound ({}, {})",
                    axis, low, high
                )));
            }
            if low > high {
                return Err(SamplerError::InvalidBoundaries(format!(
                    "axis {} has infimum {} above supremum {}",
                    axis, low, high
                )));
            }
        }

        Ok(Boundaries { bounds })
    }

    /// Number of axes (`D`).
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    /// Lower bounds, in axis order.
    pub fn infima(&self) -> Vec<f64> {
        self.bounds.iter().map(|&(low, _)| low).collect()
    }

    /// Upper bounds, in axis order.
    pub fn suprema(&self) -> Vec<f64> {
        self.bounds.iter().map(|&(_, high)| high).collect()
    }

    /// Whether `point` has `D` coordinates and lies inside the closed box.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && point
                .iter()
                .zip(&self.bounds)
                .all(|(&x, &(low, high))| low <= x && x <= high)
    }

    /// Fails with `DimensionMismatch` unless `point` has exactly `D` coordinates.
    pub fn check_point(&self, point: &[f64]) -> Result<(), SamplerError> {
        if point.len() != self.dimension() {
            return Err(SamplerError::DimensionMismatch {
                expected: self.dimension(),
                actual: point.len(),
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<(f64, f64)>> for Boundaries {
    type Error = SamplerError;

    fn try_from(pairs: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Boundaries::new(pairs)
    }
}

impl TryFrom<&[[f64; 2]]> for Boundaries {
    type Error = SamplerError;

    fn try_from(pairs: &[[f64; 2]]) -> Result<Self, Self::Error> {
        Boundaries::new(pairs.iter().map(|&[low, high]| (low, high)))
    }
}

/// Draws a starting point uniformly inside `boundaries`.
///
/// Every axis gets its own draw `r * high + (1 - r) * low` with `r` in
/// `[0, 1)`. The interpolated form never computes `high - low`, which
/// overflows for regions wider than `f64::MAX`.
pub fn sample_origin<R: Rng + ?Sized>(boundaries: &Boundaries, rng: &mut R) -> Point {
    let origin: Point = boundaries
        .pairs()
        .iter()
        .map(|&(low, high)| {
            let r: f64 = rng.random();
            // Rounding can land one ulp outside the box.
            (r * high + (1.0 - r) * low).max(low).min(high)
        })
        .collect();

    tracing::trace!(?origin, "Drew sampling origin");

    origin
}

/// Splits a flat coordinate buffer into consecutive points of `dimension`
/// coordinates each, preserving order.
///
/// An empty buffer yields no points. A buffer whose length is not a multiple
/// of `dimension` is rejected rather than truncated.
pub fn reshape_chunk(coordinates: &[f64], dimension: usize) -> Result<Vec<Point>, SamplerError> {
    if dimension == 0 || coordinates.len() % dimension != 0 {
        return Err(SamplerError::MisalignedChunk {
            dimension,
            len: coordinates.len(),
        });
    }

    Ok(coordinates
        .chunks_exact(dimension)
        .map(|point| point.to_vec())
        .collect())
}

/// Concatenates points into a single flat buffer; the inverse of `reshape_chunk`.
pub fn flatten_points<P: AsRef<[f64]>>(points: &[P]) -> Vec<f64> {
    points
        .iter()
        .flat_map(|point| point.as_ref().iter().copied())
        .collect()
}
