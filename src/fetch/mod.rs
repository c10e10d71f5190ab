//! HTTP access to the attendance server.
//!
//! [`HttpClient`] is the seam: [`BasicClient`] talks to the network directly
//! and [`ApiKey`] decorates any client with a credential header.

mod auth;
mod basic;
mod client;
#[cfg(test)]
pub(crate) mod recording;

pub use auth::ApiKey;
pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

/// Issues a `GET` for `url` and returns the response body.
///
/// Non-success statuses are returned as errors.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}
