//! Turns raw model text into results
//!
//! Quiz replies get a single pass: slice to the outermost brackets, decode,
//! convert. There is no retry and no second prompt.

use serde_json::Value;
use log::{debug, error, trace, warn};
use crate::quiz::{check_schema, QuestionRecord, QuizResult};

/// Summaries are returned exactly as the model wrote them
pub fn normalize_summary(raw_text: String) -> String
{   raw_text
}

/// Narrow `raw_text` to the span from the first `[` to the last `]`
///
/// Text without such a span is returned unchanged.
pub fn slice_json_array(raw_text: &str) -> &str
{   match (raw_text.find('['), raw_text.rfind(']'))
    {   (Some(first), Some(last)) if last > first => {
          &raw_text[first..=last]
        }
      , _ => raw_text
    }
}

/// Decode a quiz from the model's reply
pub fn normalize_quiz(raw_text: &str)
  -> Result<QuizResult, crate::error::Error>
{   let candidate = slice_json_array(raw_text);
    trace!("Quiz JSON candidate: {}", candidate);

    let values: Vec<Value> = serde_json::from_str(candidate)
      .map_err(|e| {
        error!("Quiz JSON decode failed: {}", e);
        crate::error::Error::ResponseParseFailure
        {   message: format!(
              "Failed to parse JSON from LLM response: {}", e
            )
          , raw_response: candidate.to_string()
        }
      })?;

    if let Some(i) = values.iter().position(|v| !v.is_object())
    {   error!("Quiz element {} is not an object", i);
        return Err(crate::error::Error::ResponseParseFailure
        {   message: format!(
              "Failed to parse JSON from LLM response: \
               element {} is not an object",
              i
            )
          , raw_response: candidate.to_string()
        });
    }

    let records: QuizResult = values
      .iter()
      .map(QuestionRecord::from_value)
      .collect();

    for (i, record) in records.iter().enumerate()
    {   for issue in record.schema_issues()
        {   warn!("Question {}: {}", i + 1, issue);
        }
    }
    debug!("Decoded {} quiz questions", records.len());
    Ok(records)
}

/// Like `normalize_quiz`, but records must have the requested shape
///
/// A `SchemaViolation` carries the model's reply exactly as received.
pub fn normalize_quiz_strict(raw_text: &str)
  -> Result<QuizResult, crate::error::Error>
{   let records = normalize_quiz(raw_text)?;
    check_schema(&records, raw_text)?;
    Ok(records)
}
