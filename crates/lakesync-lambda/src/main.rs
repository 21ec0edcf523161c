// AWS Lambda binary entry point
//
// Build with: cargo build -p lakesync-lambda
//
// The lambda_runtime crate provides the tokio runtime, so we use #[tokio::main]

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    lakesync_lambda::run().await
}
