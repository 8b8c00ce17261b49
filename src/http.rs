use std::{io, net::SocketAddr};

use axum::{routing::get, Json, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::types::{GreetingResponse, Result, StatusResponse};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to bind {address}: {source}")]
    Bind { address: SocketAddr, source: io::Error },
}

#[derive(OpenApi)]
#[openapi(
    paths(greeting::home, check::status),
    components(schemas(GreetingResponse, StatusResponse))
)]
pub struct HttpServer {
    address: SocketAddr,
    api_docs: bool,
}

impl HttpServer {
    pub fn new(address: SocketAddr, api_docs: bool) -> Self {
        Self { address, api_docs }
    }

    pub fn router(&self) -> Router {
        let app = Router::new().merge(greeting::routes()).merge(check::routes());
        let app = if self.api_docs {
            app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", Self::openapi()))
        } else {
            app
        };
        app.layer(TraceLayer::new_for_http())
    }

    pub async fn serve(&self, token: CancellationToken) -> Result<()> {
        let address = self.address;
        let listener =
            TcpListener::bind(address).await.map_err(|source| Error::Bind { address, source })?;
        self.serve_on(listener, token).await
    }

    /// Serves on an already bound listener until the token is cancelled. In-flight requests are
    /// drained before returning.
    pub async fn serve_on(&self, listener: TcpListener, token: CancellationToken) -> Result<()> {
        tracing::info!("🚀 Listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
            .map_err(Into::into)
    }
}

mod greeting {
    use super::*;

    pub fn routes() -> Router {
        Router::new().route("/", get(home))
    }

    /// Greeting
    #[utoipa::path(get, path = "/",
        responses((status = 200, description = "Ok", body = GreetingResponse)))]
    pub async fn home() -> Json<GreetingResponse> {
        Json(GreetingResponse::default())
    }
}

mod check {
    use super::*;

    pub fn routes() -> Router {
        Router::new().route("/status", get(status))
    }

    /// Liveness probe. Always `ok` while the process can serve requests.
    #[utoipa::path(get, path = "/status",
        responses((status = 200, description = "Ok", body = StatusResponse)))]
    pub async fn status() -> Json<StatusResponse> {
        Json(StatusResponse::default())
    }
}
