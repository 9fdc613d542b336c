use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studynotes::config::{AgentConfig, ProviderConfig};
use studynotes::error::Error;
use studynotes::providers::{GeminiClient, ModelClient};

const MODEL: &str = "gemini-2.0-flash";
const ENDPOINT: &str = "/models/gemini-2.0-flash:generateContent";

fn config_for(server: &MockServer, timeout_secs: Option<u64>) -> AgentConfig
{   AgentConfig
    {   api_key: Some("test-key".to_string())
      , provider: ProviderConfig
        {   model: MODEL.to_string()
          , api_base: Some(server.uri())
          , timeout_secs
        }
    }
}

fn candidate_reply(parts: &[&str]) -> serde_json::Value
{   let parts: Vec<_> = parts.iter().map(|t| json!({"text": t})).collect();
    json!({
      "candidates": [{
        "content": {"parts": parts, "role": "model"},
        "finishReason": "STOP"
      }]
    })
}

#[test]
fn test_gemini_client_requires_api_key()
{   let config = AgentConfig::default();
    let err = GeminiClient::new(&config).unwrap_err();
    assert_eq!(err, Error::MissingApiKey("GEMINI_API_KEY".to_string()));
}

#[tokio::test]
async fn test_gemini_sends_prompt_and_joins_parts()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .and(header("x-goog-api-key", "test-key"))
      .and(body_partial_json(json!({
        "contents": [{"parts": [{"text": "Summarize this"}]}]
      })))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(candidate_reply(&["Hello, ", "world."]))
      )
      .expect(1)
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    let reply = assert_ok!(client.generate_content("Summarize this").await);
    assert_eq!(reply.text, "Hello, world.");
}

#[tokio::test]
async fn test_gemini_rate_limit()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(ResponseTemplate::new(429))
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    let err = assert_err!(client.generate_content("hi").await);
    assert_eq!(err, Error::RateLimitExceeded);
}

#[tokio::test]
async fn test_gemini_api_error_keeps_body()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(
        ResponseTemplate::new(403).set_body_string("API key not valid")
      )
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    match client.generate_content("hi").await
    {   Err(Error::ApiError(msg)) => {
          assert!(msg.contains("API key not valid"), "{}", msg);
        }
      , other => panic!("unexpected result: {:?}", other)
    }
}

#[tokio::test]
async fn test_gemini_without_candidates()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({"candidates": []}))
      )
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    let err = assert_err!(client.generate_content("hi").await);
    assert_eq!(err, Error::NoCandidatesInResponse);
}

#[tokio::test]
async fn test_gemini_malformed_body()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    let err = assert_err!(client.generate_content("hi").await);
    assert!(matches!(err, Error::ParseError(_)), "{:?}", err);
}

#[tokio::test]
async fn test_gemini_timeout()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(candidate_reply(&["late"]))
          .set_delay(Duration::from_secs(3))
      )
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, Some(1))));
    let err = assert_err!(client.generate_content("hi").await);
    assert_eq!(err, Error::Timeout);
}

#[tokio::test]
async fn test_gemini_transport_error_hides_api_key()
{   let config = AgentConfig
    {   api_key: Some("SUPERSECRET123".to_string())
      , provider: ProviderConfig
        {   model: MODEL.to_string()
          , api_base: Some("http://127.0.0.1:1".to_string())
          , timeout_secs: Some(5)
        }
    };

    let client = assert_ok!(GeminiClient::new(&config));
    let err = assert_err!(client.generate_content("hi").await);
    assert!(
      matches!(err, Error::HttpError(_) | Error::Timeout),
      "{:?}", err
    );
    assert!(!err.to_string().contains("SUPERSECRET123"), "{}", err);
    assert!(!format!("{:?}", err).contains("SUPERSECRET123"));
}

#[tokio::test]
async fn test_gemini_blocked_candidate_is_an_error()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(json!({
          "candidates": [{"finishReason": "SAFETY"}]
        }))
      )
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    match client.generate_content("hi").await
    {   Err(Error::ApiError(msg)) => {
          assert!(msg.contains("SAFETY"), "{}", msg);
        }
      , other => panic!("unexpected result: {:?}", other)
    }
}

#[tokio::test]
async fn test_gemini_empty_stop_reply_is_not_an_error()
{   let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(ENDPOINT))
      .respond_with(
        ResponseTemplate::new(200).set_body_json(candidate_reply(&[""]))
      )
      .mount(&server)
      .await;

    let client = assert_ok!(GeminiClient::new(&config_for(&server, None)));
    let reply = assert_ok!(client.generate_content("hi").await);
    assert_eq!(reply.text, "");
}
