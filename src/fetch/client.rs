use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes requests against the attendance server.
///
/// Implementations may decorate requests (see [`super::ApiKey`]) before
/// delegating to an inner client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
