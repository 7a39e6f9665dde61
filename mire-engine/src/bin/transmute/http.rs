// http.rs - Blocking transport over isahc

use std::time::Duration;

use isahc::config::Configurable;
use isahc::{HttpClient, ReadResponseExt, Request};
use mire_engine::error::EditError;
use mire_engine::transmute::Transport;

const TIMEOUT: Duration = Duration::from_secs(120);

pub struct IsahcTransport {
    client: Option<HttpClient>,
}

impl IsahcTransport {
    /// Falls back to isahc's shared client if a dedicated one can't be built.
    pub fn new() -> Self {
        let client = HttpClient::builder().timeout(TIMEOUT).build();
        if let Err(e) = &client {
            tracing::warn!(error = %e, "using default http client");
        }
        Self { client: client.ok() }
    }
}

impl Transport for IsahcTransport {
    fn post_json(&self, url: &str, api_key: &str, body: &str) -> Result<String, EditError> {
        let req = Request::post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", api_key)
            .body(body.to_string())
            .map_err(|e| EditError::Transport(e.to_string()))?;

        let sent = match &self.client {
            Some(client) => client.send(req),
            None => isahc::send(req),
        };
        let mut resp = sent.map_err(|e| EditError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().map_err(|e| EditError::Transport(e.to_string()))?;
        tracing::debug!(status = status.as_u16(), len = text.len(), "response");

        if !status.is_success() {
            return Err(EditError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}
