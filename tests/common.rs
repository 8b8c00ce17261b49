use std::net::SocketAddr;

use my_api_devops::{http::HttpServer, types::Result};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;

pub struct RunningServer {
    pub address: SocketAddr,
    pub token: CancellationToken,
    pub handle: JoinHandle<Result<()>>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }
}

/// Starts a fresh server on an ephemeral localhost port.
pub async fn spawn_server() -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind an ephemeral port");
    let address = listener.local_addr().expect("listener should have an address");
    let token = CancellationToken::new();

    let server = HttpServer::new(address, false);
    let server_token = token.clone();
    let handle = tokio::spawn(async move { server.serve_on(listener, server_token).await });

    RunningServer { address, token, handle }
}
