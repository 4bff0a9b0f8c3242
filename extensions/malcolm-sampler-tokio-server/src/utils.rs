mod bind_ephemeral_listener;
pub use bind_ephemeral_listener::bind_ephemeral_listener;
