//! Skips mock-server tests in sandboxes that cannot bind a localhost socket.
//!
//! Set `BIRD_ENRICHER_REQUIRE_SOCKET_TESTS=1` to turn a skip into a failure.

#![allow(dead_code)]

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

const REQUIRE_SOCKETS_ENV: &str = "BIRD_ENRICHER_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_SOCKETS_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let caller = Location::caller();
    assert!(
        !sockets_required(),
        "cannot bind a localhost socket for the test at {caller}; unset {REQUIRE_SOCKETS_ENV} to skip instead"
    );
    eprintln!("[socket-bound-test] skipping test at {caller}: cannot bind a localhost socket");
    true
}

/// Starts a mock server, or returns `None` when the test should be skipped.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        return None;
    }
    Some(MockServer::start().await)
}
