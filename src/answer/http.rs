//! HTTP answer service.
//!
//! One request per prompt:
//!
//! ```text
//! POST <endpoint>            {"question": "<prompt>"}
//! 200 OK                     {"answer": "<text>"}
//! ```
//!
//! No conversation history is sent; the service sees each prompt alone.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::answer::{AnswerError, AnswerService};

#[derive(Serialize, Debug)]
struct QuestionRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize, Debug)]
struct AnswerResponse {
    answer: String,
}

pub struct HttpAnswerService {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpAnswerService {
    pub fn new(endpoint: &str) -> Result<Self, AnswerError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| AnswerError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;
        Ok(Self {
            endpoint,
            client: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String, AnswerError> {
        info!(
            "POST {} (question_len={})",
            self.endpoint,
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&QuestionRequest { question: prompt })
            .send()
            .await
            .map_err(|e| AnswerError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Answer service response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Answer service error: {} - {}", status.as_u16(), body);
            return Err(AnswerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnswerError::Network(e.to_string()))?;
        let parsed: AnswerResponse =
            serde_json::from_str(&body).map_err(|e| AnswerError::Parse(e.to_string()))?;

        debug!("Answer received ({} bytes)", parsed.answer.len());
        Ok(parsed.answer)
    }
}
