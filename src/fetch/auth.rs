use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that sends a credential as an HTTP header on
/// every request.
///
/// The header name and value are validated once, at construction.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name '{header_name}'"))?;
        let mut value = HeaderValue::from_str(key).context("API key is not a valid header value")?;
        value.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            value,
        })
    }

    /// Uses `Authorization: Bearer <token>`.
    pub fn bearer(inner: C, token: &str) -> Result<Self> {
        Self::new(inner, AUTHORIZATION.as_str(), &format!("Bearer {token}"))
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetch_bytes;
    use crate::fetch::recording::RecordingClient;

    #[test]
    fn test_bearer_uses_authorization_header() {
        let client = ApiKey::bearer(RecordingClient::new(200, "[]"), "secret").unwrap();
        assert_eq!(client.header_name(), &AUTHORIZATION);
        assert!(client.value.is_sensitive());
        assert_eq!(client.value.to_str().unwrap(), "Bearer secret");
    }

    #[test]
    fn test_rejects_invalid_header_values() {
        assert!(ApiKey::bearer(RecordingClient::new(200, "[]"), "line\nbreak").is_err());
        assert!(ApiKey::new(RecordingClient::new(200, "[]"), "bad header", "key").is_err());
    }

    #[tokio::test]
    async fn test_bearer_header_reaches_inner_client() {
        let client = ApiKey::bearer(RecordingClient::new(200, "[]"), "secret").unwrap();

        let body = fetch_bytes(&client, "http://127.0.0.1:8000/get-attendance")
            .await
            .unwrap();

        assert_eq!(body, b"[]");
        let requests = client.inner.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://127.0.0.1:8000/get-attendance");
        assert_eq!(
            requests[0].1.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer secret"
        );
    }

    #[tokio::test]
    async fn test_custom_header_name() {
        let client = ApiKey::new(RecordingClient::new(200, "[]"), "X-Api-Key", "k3y").unwrap();

        fetch_bytes(&client, "https://school.example/attendance")
            .await
            .unwrap();

        let requests = client.inner.requests();
        assert_eq!(requests[0].1.get("x-api-key").unwrap().to_str().unwrap(), "k3y");
        assert!(requests[0].1.get(AUTHORIZATION).is_none());
    }
}
