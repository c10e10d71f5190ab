use super::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::sync::Mutex;

/// Answers every request with a canned status and body, keeping the URL and
/// headers of each request it saw.
pub(crate) struct RecordingClient {
    status: u16,
    body: &'static str,
    requests: Mutex<Vec<(String, HeaderMap)>>,
}

impl RecordingClient {
    pub(crate) fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<(String, HeaderMap)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.requests
            .lock()
            .unwrap()
            .push((req.url().to_string(), req.headers().clone()));

        let resp = http::Response::builder()
            .status(self.status)
            .body(self.body)
            .unwrap();
        Ok(reqwest::Response::from(resp))
    }
}
