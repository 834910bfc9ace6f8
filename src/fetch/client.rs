use async_trait::async_trait;
use reqwest::{Request, Response};

/// Anything that can execute a prepared request; lets tests and wrappers
/// stand in for the real client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
