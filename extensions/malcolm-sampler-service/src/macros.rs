use xxhash_rust::const_xxh3::xxh3_64 as const_xxh3_64;

pub const fn method_id_hash(name: &str) -> u64 {
    const_xxh3_64(name.as_bytes())
}

/// Compile-time method ID generator using xxHash3.
///
/// The ID is derived from the fully qualified method name, so the two protocol
/// variants never collide even where their methods do the same job.
///
/// ## Example
///
/// ```rust
/// use malcolm_sampler_service::sampler_method_id;
/// let put = sampler_method_id!("malcolm.Appraiser/PutBoundaries");
/// let add = sampler_method_id!("malcolm.MalcolmSampler/AddBoundaries");
/// assert_ne!(put, add);
/// ```
#[macro_export]
macro_rules! sampler_method_id {
    ($name:literal) => {{
        const ID: u64 = $crate::method_id_hash($name);
        ID
    }};
}
