mod call_status;
pub use call_status::CallStatus;

pub mod constants;

mod error;
pub use error::{SamplerError, SamplerErrorKind};

pub mod frame;

mod geometry;
pub use geometry::{Boundaries, Point, flatten_points, reshape_chunk, sample_origin};

mod session;
pub use session::SessionState;
