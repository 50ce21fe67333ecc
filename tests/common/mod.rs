#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Once;

use httpmock::MockServer;

pub const API_PATH: &str = "/ratReader/api.php";

static NO_PROXY: Once = Once::new();

/// Keep loopback traffic away from any proxy configured in the environment
pub fn bypass_proxy() {
    NO_PROXY.call_once(|| std::env::set_var("NO_PROXY", "127.0.0.1,localhost"));
}

/// A local mock server standing in for the Rat Reader host
pub fn start_server() -> MockServer {
    bypass_proxy();
    MockServer::start()
}

/// The API endpoint URL on `server`
pub fn api_url(server: &MockServer) -> String {
    server.url(API_PATH)
}

/// A URL on which nothing is listening
pub fn refused_url() -> String {
    bypass_proxy();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, API_PATH)
}
