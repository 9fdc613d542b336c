use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

const API_KEY_HEADER: &str = "x-goog-api-key";

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part
{   #[serde(default)]
    pub text: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content
{   pub parts: Vec<Part>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest
{   pub contents: Vec<Content>
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse
{   #[serde(default)]
    pub candidates: Vec<Candidate>
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate
{   pub content: Option<Content>
  , pub finish_reason: Option<String>
}

// ===== Gemini Client =====

/// Google Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiClient
{   api_key: String
  , model: String
  , api_base: String
  , http_client: reqwest::Client
}

impl GeminiClient
{   /// Create a client from explicit configuration
    ///
    /// Fails with `MissingApiKey` before any request is attempted.
    pub fn new(config: &crate::config::AgentConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating GeminiClient");
        let api_key = config.require_api_key()?.to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.provider.timeout_secs
        {   debug!("Request timeout: {}s", secs);
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Cannot build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(GeminiClient
        {   api_key
          , model: config.provider.model.clone()
          , api_base: config.provider.api_base().to_string()
          , http_client
        })
    }

    pub fn model(&self) -> &str
    {   &self.model
    }

    fn endpoint(&self) -> String
    {   format!(
          "{}/models/{}:generateContent",
          self.api_base, self.model
        )
    }
}

#[async_trait]
impl super::ModelClient for GeminiClient
{   async fn generate_content(&self, prompt: &str)
      -> Result<crate::request::ModelReply, crate::error::Error>
    {   debug!("Sending prompt to: {}", self.model);

        let request = GenerateContentRequest
        {   contents: vec![
              Content
              {   parts: vec![Part { text: prompt.to_string() }]
                , role: Some("user".to_string())
              }
            ]
        };

        trace!("Gemini request: {:?}", request);

        let response = self.http_client
          .post(self.endpoint())
          .header(API_KEY_HEADER, &self.api_key)
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            let e = e.without_url();
            error!("HTTP error: {}", e);
            if e.is_timeout()
            {   crate::error::Error::Timeout
            } else
            {   crate::error::Error::HttpError(e.to_string())
            }
          })?;

        let status = response.status();
        trace!("Gemini response status: {}", status);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {   error!("Gemini rate limit hit");
            return Err(crate::error::Error::RateLimitExceeded);
        }

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Gemini API error: {}", error_text);
            return Err(crate::error::Error::ApiError(
              format!("Gemini error ({}): {}", status, error_text)
            ));
        }

        let body: GenerateContentResponse
          = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Parse error: {}", e);
            if e.is_timeout()
            {   crate::error::Error::Timeout
            } else
            {   crate::error::Error::ParseError(e.to_string())
            }
          })?;

        let candidate = body.candidates.first()
          .ok_or_else(|| {
            error!("No candidates in response");
            crate::error::Error::NoCandidatesInResponse
          })?;
        trace!("Finish reason: {:?}", candidate.finish_reason);

        let text: String = candidate.content
          .iter()
          .flat_map(|c| c.parts.iter())
          .map(|p| p.text.as_str())
          .collect();

        // Blocked or truncated candidates come back without any parts
        if text.is_empty()
        {   if let Some(reason) = candidate.finish_reason.as_deref()
              .filter(|r| *r != "STOP")
            {   error!("Gemini returned no text: {}", reason);
                return Err(crate::error::Error::ApiError(format!(
                  "Gemini returned no text (finish reason: {})",
                  reason
                )));
            }
        }

        debug!("Gemini replied with {} bytes", text.len());
        Ok(crate::request::ModelReply { text })
    }
}
