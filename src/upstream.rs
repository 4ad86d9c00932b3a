use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::models::{ChatAppResponse, ChatMessage};

#[derive(Clone)]
pub struct ChatApiClient {
    client: Client,
    base_url: String,
}

impl ChatApiClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build chat api http client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn chat(&self, messages: &[ChatMessage], overrides: &Value) -> Result<ChatAppResponse> {
        #[derive(Serialize)]
        struct ChatReq<'a> {
            messages: &'a [ChatMessage],
            context: ChatReqContext<'a>,
        }

        #[derive(Serialize)]
        struct ChatReqContext<'a> {
            overrides: &'a Value,
        }

        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(url)
            .json(&ChatReq {
                messages,
                context: ChatReqContext { overrides },
            })
            .send()
            .await
            .context("failed to call chat api")?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("chat api returned {status}: {}", normalize_err_body(&body));
        }

        response
            .json::<ChatAppResponse>()
            .await
            .context("failed to decode chat api response")
    }
}

fn normalize_err_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        if let Some(detail) = json.get("detail").and_then(|v| v.as_str()) {
            return detail.to_string();
        }
        if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
            return err.to_string();
        }
    }

    trimmed.to_string()
}
