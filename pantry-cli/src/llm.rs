use anyhow::{Context, Result, bail};
use pantry_advice::{
    AdviceRequest, ChatMessage, advice_messages, clean_model_output, offline_advice,
    recipe_messages,
};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LlmSection;

/// OpenAI-compatible chat completions client (OpenRouter by default).
#[derive(Debug, Clone)]
pub struct AdviceClient {
    http: reqwest::Client,
    url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    api_key: String,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn first_content(resp: Resp) -> Option<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|s| !s.trim().is_empty())
}

impl AdviceClient {
    /// `None` when no API key is available; callers fall back to offline advice.
    pub fn from_config(llm: &LlmSection) -> Option<Self> {
        let api_key = llm.resolve_api_key()?;
        Some(Self {
            http: reqwest::Client::new(),
            url: completions_url(&llm.base_url),
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
            api_key,
        })
    }

    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = Req {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(url = %self.url, model = %self.model, "requesting completion");
        let resp = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .context("llm request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("llm error: {status} {txt}");
        }

        let out: Resp = resp.json().await.context("parse llm response")?;
        first_content(out).ok_or_else(|| anyhow::anyhow!("llm returned no content"))
    }

    pub async fn advise(&self, req: &AdviceRequest) -> Result<String> {
        let raw = self.complete(&advice_messages(req)).await?;
        Ok(clean_model_output(&raw))
    }

    pub async fn recipes(&self, reqs: &[AdviceRequest]) -> Result<String> {
        let raw = self.complete(&recipe_messages(reqs)).await?;
        Ok(clean_model_output(&raw))
    }
}

/// Model advice when possible, deterministic text otherwise. Never fails.
pub async fn advice_or_offline(client: Option<&AdviceClient>, req: &AdviceRequest) -> String {
    match client {
        Some(c) => match c.advise(req).await {
            Ok(text) => text,
            Err(e) => {
                warn!(item = %req.name, "advice generation failed: {e:#}");
                offline_advice(req)
            }
        },
        None => offline_advice(req),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        assert_eq!(
            completions_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_first_content() {
        let resp: Resp = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Use today!"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(resp).as_deref(), Some("Use today!"));

        let empty: Resp = serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(first_content(empty).is_none());
    }
}
