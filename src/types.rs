use std::error::Error;
pub use std::result::Result as stdResult;

use serde::Serialize;
use utoipa::ToSchema;

pub type Result<T> = stdResult<T, Box<dyn Error + Send + Sync>>;

pub const GREETING: &str = "Test Of Deployment! This is my DevOps Project.";
pub const SERVICE_NAME: &str = "my-api-devops";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GreetingResponse {
    #[schema(value_type = String, example = "Test Of Deployment! This is my DevOps Project.")]
    pub message: &'static str,
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self { message: GREETING }
    }
}

/// Liveness of the service. `status` is always `ok` while the process serves requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
    #[schema(value_type = String, example = "my-api-devops")]
    pub service: &'static str,
}

impl Default for StatusResponse {
    fn default() -> Self {
        Self { status: "ok", service: SERVICE_NAME }
    }
}
