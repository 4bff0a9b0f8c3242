mod call;
pub use call::*;

mod client;
pub use client::SamplerClient;

mod transport;
pub use transport::*;
