// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jiff::civil::Date;
use lumina_core::{ColorTag, ExtractError, ExtractSource, ExtractedEvent, Extractor};
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::ExtractorConfig;
use crate::error::RemoteError;
use crate::http::{HttpClient, join_url};
use crate::photo::prepare_image;

const API_KEY_HEADER: &str = "x-goog-api-key";

const QUOTE_PROMPT: &str = "Generate a very short optimistic daily quote. One sentence. \
                            Return JSON with 'zh' and 'en' keys.";

/// A one-sentence quote in Chinese and English.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyQuote {
    /// Chinese text.
    pub zh: String,
    /// English text.
    pub en: String,
}

impl Default for DailyQuote {
    fn default() -> Self {
        Self {
            zh: "今天也要像苹果一样清脆乐观！".to_string(),
            en: "Stay crisp and optimistic today!".to_string(),
        }
    }
}

/// Extractor backed by the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiExtractor {
    http: HttpClient,
    url: Url,
    api_key: String,
}

impl GeminiExtractor {
    /// Creates an extractor for `config.model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the base URL is invalid, or
    /// HTTP client creation fails.
    pub fn new(config: &ExtractorConfig) -> Result<Self, RemoteError> {
        if config.api_key.trim().is_empty() {
            return Err(RemoteError::Config("extractor API key is empty".to_string()));
        }

        let method = format!("{}:generateContent", config.model);
        let url = join_url(&config.base_url, &["v1beta", "models", &method])?;
        let http = HttpClient::new(config.timeout_secs, &config.user_agent, None)?;
        Ok(Self {
            http,
            url,
            api_key: config.api_key.clone(),
        })
    }

    /// Asks the model for today's quote, falling back to a built-in one when
    /// the request fails or the reply is not a quote.
    #[tracing::instrument(skip(self))]
    pub async fn daily_quote(&self) -> DailyQuote {
        let parts = vec![json!({ "text": QUOTE_PROMPT })];
        let text = match self.generate(parts, quote_schema()).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!("model returned no quote");
                return DailyQuote::default();
            }
            Err(e) => {
                tracing::warn!(err = %e, "failed to fetch daily quote");
                return DailyQuote::default();
            }
        };

        match serde_json::from_str::<DailyQuote>(&text) {
            Ok(quote) if !quote.zh.trim().is_empty() && !quote.en.trim().is_empty() => quote,
            Ok(_) => DailyQuote::default(),
            Err(e) => {
                tracing::warn!(err = %e, "daily quote is not valid JSON");
                DailyQuote::default()
            }
        }
    }

    async fn generate(
        &self,
        parts: Vec<Value>,
        schema: Value,
    ) -> Result<Option<String>, RemoteError> {
        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let req = self
            .http
            .build_request(Method::POST, self.url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body);
        let resp: GenerateResponse = self
            .http
            .execute(req)
            .await?
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        Ok(resp.into_text())
    }
}

#[async_trait]
impl Extractor for GeminiExtractor {
    #[tracing::instrument(skip(self, source), fields(source = source.kind()))]
    async fn extract(
        &self,
        source: ExtractSource,
        today: Date,
    ) -> Result<Option<ExtractedEvent>, ExtractError> {
        let parts = match source {
            ExtractSource::Image { bytes, mime } => {
                tracing::debug!(%mime, bytes = bytes.len(), "preparing image");
                let jpeg = tokio::task::spawn_blocking(move || prepare_image(&bytes))
                    .await
                    .map_err(|e| ExtractError::Source(e.to_string()))??;
                vec![
                    json!({ "inlineData": { "mimeType": "image/jpeg", "data": STANDARD.encode(jpeg) } }),
                    json!({ "text": image_prompt(today) }),
                ]
            }
            ExtractSource::Transcript(text) => vec![
                json!({ "text": text_prompt("voice note", today) }),
                json!({ "text": text }),
            ],
            ExtractSource::Text(text) => vec![
                json!({ "text": text_prompt("description", today) }),
                json!({ "text": text }),
            ],
        };

        let Some(text) = self.generate(parts, response_schema()).await? else {
            tracing::debug!("model returned no candidate text");
            return Ok(None);
        };
        ExtractedEvent::from_json(&text)
    }
}

fn color_names() -> String {
    ColorTag::ALL
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

fn image_prompt(today: Date) -> String {
    format!(
        "Extract the event shown in this image. Today is {today}. \
         Return a JSON object with: name, date (YYYY-MM-DD), time (HH:mm), location, \
         color (one of: {colors}), duration (minutes), description, \
         reminderType (none, minutes, hours, days), reminderValue, \
         and repeat (none, daily, weekly, monthly, yearly).",
        today = today.strftime("%Y-%m-%d, %A"),
        colors = color_names(),
    )
}

fn text_prompt(kind: &str, today: Date) -> String {
    format!(
        "Extract the event described in the {kind} that follows. \
         Resolve relative dates against today, {today}. \
         Return a JSON object with: name, date (YYYY-MM-DD), time (HH:mm), location, \
         color (one of: {colors}), duration (minutes), and repeat (none, daily, weekly, monthly, yearly).",
        today = today.strftime("%Y-%m-%d, %A"),
        colors = color_names(),
    )
}

fn quote_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "zh": { "type": "STRING" },
            "en": { "type": "STRING" },
        },
        "required": ["zh", "en"],
    })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "date": { "type": "STRING" },
            "time": { "type": "STRING" },
            "location": { "type": "STRING" },
            "color": { "type": "STRING" },
            "duration": { "type": "NUMBER" },
            "description": { "type": "STRING" },
            "reminderType": { "type": "STRING" },
            "reminderValue": { "type": "NUMBER" },
            "repeat": { "type": "STRING", "description": "One of: none, daily, weekly, monthly, yearly" },
        },
        "required": ["name", "date", "time"],
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}
