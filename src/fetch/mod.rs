//! HTTP plumbing shared by the spreadsheet loader and the boundary lookup.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};

/// Issues a GET for `url` and returns the body.
///
/// Non-2xx responses are reported as errors rather than handed back as bodies.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned an error status"))?;

    Ok(resp.bytes().await?.to_vec())
}
