/// HTTP route on which the sampler WebSocket endpoint is served.
pub const SAMPLER_WS_ROUTE: &str = "/ws";
