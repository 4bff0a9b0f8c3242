pub mod config;

mod toy_sampler;
pub use toy_sampler::{MAX_CHUNK_POINTS, ToySampler};
