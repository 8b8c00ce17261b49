#[tokio::main]
async fn main() -> my_api_devops::types::Result<()> {
    my_api_devops::start().await
}
