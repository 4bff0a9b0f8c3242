pub mod appraiser;
pub mod constants;
pub mod malcolm;

mod codec;

mod macros;
pub use macros::*;

mod messages;
pub use messages::*;

mod method;
pub use method::*;

pub use appraiser::Appraiser;
pub use malcolm::MalcolmSampler;
pub use malcolm_sampler::CallStatus;
