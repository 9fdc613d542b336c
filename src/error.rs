use std::fmt;

/// Custom error type for studynotes operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Document text was empty or could not be extracted
    EmptyInput
  , /// Unsupported style, kind or question count
    InvalidParameter(String)
  , /// API key is missing for the model provider
    MissingApiKey(String)
  , /// The model client failed; carries its description
    ModelInvocationFailure(String)
  , /// Quiz JSON could not be decoded, even after slicing
    ResponseParseFailure
    {   message: String
      , raw_response: String
    }
  , /// Decoded quiz records do not have the expected shape
    SchemaViolation
    {   message: String
      , raw_response: String
    }
  , /// HTTP request error
    HttpError(String)
  , /// API returned an error response
    ApiError(String)
  , /// Failed to parse API response
    ParseError(String)
  , /// No candidates in API response
    NoCandidatesInResponse
  , /// Rate limit exceeded
    RateLimitExceeded
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Timeout error
    Timeout
  , /// Generic error
    Other(String)
}

impl Error
{   /// The unparsed model output attached to this error, if any
    pub fn raw_response(&self) -> Option<&str>
    {   match self
        {   Error::ResponseParseFailure { raw_response, .. }
          | Error::SchemaViolation { raw_response, .. } => {
              Some(raw_response.as_str())
            }
          , _ => None
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::EmptyInput => {
              write!(f,
                "Could not extract text from document or document is empty"
              )
            }
          , Error::InvalidParameter(msg) => {
              write!(f, "Invalid parameter: {}", msg)
            }
          , Error::MissingApiKey(name) => {
              write!(f, "Missing API key: {} is not set", name)
            }
          , Error::ModelInvocationFailure(msg) => {
              write!(f, "Error calling the model: {}", msg)
            }
          , Error::ResponseParseFailure { message, .. } => {
              write!(f, "{}", message)
            }
          , Error::SchemaViolation { message, .. } => {
              write!(f, "Unexpected quiz shape: {}", message)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoCandidatesInResponse => {
              write!(f, "API response contained no candidates")
            }
          , Error::RateLimitExceeded => {
              write!(f, "API rate limit exceeded")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
