use malcolm_sampler_tokio_client::{Endpoint, WsTransport};
use std::io::ErrorKind;

#[test]
fn parses_host_and_port() {
    let endpoint = Endpoint::parse("localhost:50051").unwrap();

    assert_eq!(endpoint.host(), "localhost");
    assert_eq!(endpoint.port(), 50051);
    assert_eq!(endpoint.to_string(), "localhost:50051");
    assert_eq!(endpoint.ws_url(), "ws://localhost:50051/ws");
}

#[test]
fn keeps_ipv6_brackets() {
    let endpoint: Endpoint = "[::1]:7000".parse().unwrap();

    assert_eq!(endpoint.host(), "[::1]");
    assert_eq!(endpoint.ws_url(), "ws://[::1]:7000/ws");
}

#[test]
fn rejects_malformed_addresses() {
    for address in [
        "localhost",
        ":8080",
        "localhost:",
        "localhost:99999",
        "a/b:80",
        "::1:7000",
        "[::1:7000",
        "[]:7000",
    ] {
        let err = Endpoint::parse(address).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{}", address);
    }
}

#[test]
fn transport_targets_the_sampler_route() {
    let transport = WsTransport::new("127.0.0.1:9000").unwrap();

    assert_eq!(transport.url(), "ws://127.0.0.1:9000/ws");
    assert_eq!(transport.endpoint().port(), 9000);
}

#[test]
fn rejects_unbracketed_ipv6_host() {
    let err = Endpoint::new("::1", 7000).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let endpoint = Endpoint::new("[::1]", 7000).unwrap();
    assert_eq!(endpoint.ws_url(), "ws://[::1]:7000/ws");
}

#[test]
fn accepts_socket_addr_display() {
    let v4: std::net::SocketAddr = "127.0.0.1:4000".parse().unwrap();
    let v6: std::net::SocketAddr = "[::1]:4001".parse().unwrap();

    assert_eq!(
        Endpoint::parse(&v4.to_string()).unwrap().ws_url(),
        "ws://127.0.0.1:4000/ws"
    );
    assert_eq!(
        Endpoint::parse(&v6.to_string()).unwrap().ws_url(),
        "ws://[::1]:4001/ws"
    );
}
