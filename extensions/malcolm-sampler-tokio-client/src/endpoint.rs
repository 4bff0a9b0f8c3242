use malcolm_sampler_service::constants::SAMPLER_WS_ROUTE;
use std::fmt;
use std::io;
use std::str::FromStr;

/// A `host:port` service address.
///
/// IPv6 hosts keep their brackets (`[::1]:7000`) so the host can be spliced
/// straight back into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Builds an endpoint from a host and port.
    ///
    /// # Arguments
    ///
    /// * `host` - A hostname, an IPv4 address, or an IPv6 address in brackets.
    /// * `port` - The service port.
    ///
    /// # Returns
    ///
    /// `InvalidInput` for an empty host, a host containing `/`, or a host with
    /// a `:` that is not a bracketed IPv6 literal.
    pub fn new(host: &str, port: u16) -> Result<Self, io::Error> {
        if host.is_empty() || host.contains('/') || !Self::colons_are_bracketed(host) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid host: {:?}", host),
            ));
        }

        Ok(Endpoint {
            host: host.to_owned(),
            port,
        })
    }

    fn colons_are_bracketed(host: &str) -> bool {
        if !host.contains(':') {
            return !host.contains('[') && !host.contains(']');
        }

        match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            Some(inner) => !inner.is_empty() && !inner.contains(['[', ']']),
            None => false,
        }
    }

    /// Parses `host:port`, splitting on the last `:`.
    pub fn parse(address: &str) -> Result<Self, io::Error> {
        let (host, port) = address.trim().rsplit_once(':').ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected host:port, got {:?}", address),
            )
        })?;

        let port = port.parse::<u16>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid port in {:?}: {}", address, e),
            )
        })?;

        Endpoint::new(host, port)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// WebSocket URL of the sampler route on this endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, SAMPLER_WS_ROUTE)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::parse(s)
    }
}
