//! Quiz question records as decoded from model output

use serde::Serialize;
use serde_json::Value;
use log::trace;

/// Option labels a multiple choice question must use, in order
pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Ordered questions in the order the model produced them
pub type QuizResult = Vec<QuestionRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McqQuestion
{   #[serde(rename = "q")]
    pub prompt: String
  , pub options: Vec<String>
  , #[serde(rename = "answer")]
    pub correct_option_label: String
  , pub explanation: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortAnswerQuestion
{   #[serde(rename = "q")]
    pub prompt: String
  , pub answer: String
}

/// One quiz question
///
/// Serializes back to the same `type`-tagged shape the prompts ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum QuestionRecord
{   #[serde(rename = "mcq")]
    Mcq(McqQuestion)
  , #[serde(rename = "short_answer")]
    ShortAnswer(ShortAnswerQuestion)
  , /// `type` was missing or not one we asked for
    #[serde(rename = "unrecognized")]
    Unrecognized
    {   original_type: Option<String>
      , #[serde(rename = "q")]
        prompt: String
    }
}

impl QuestionRecord
{   /// Decode one element of the model's JSON array
    ///
    /// Missing or mistyped string fields become empty strings and
    /// non-string options are dropped; nothing here fails.
    pub fn from_value(value: &Value) -> Self
    {   let prompt = string_field(value, "q");
        match value.get("type").and_then(Value::as_str)
        {   Some("mcq") => QuestionRecord::Mcq(McqQuestion
            {   prompt
              , options: value.get("options")
                  .and_then(Value::as_array)
                  .map(|opts| {
                    opts.iter()
                      .filter_map(Value::as_str)
                      .map(str::to_string)
                      .collect()
                  })
                  .unwrap_or_default()
              , correct_option_label: string_field(value, "answer")
              , explanation: string_field(value, "explanation")
            })
          , Some("short_answer") => {
              QuestionRecord::ShortAnswer(ShortAnswerQuestion
              {   prompt
                , answer: string_field(value, "answer")
              })
            }
          , other => {
              trace!("Unrecognized question type: {:?}", other);
              QuestionRecord::Unrecognized
              {   original_type: value.get("type").map(|t| match t
                  {   Value::String(s) => s.clone()
                    , _ => t.to_string()
                  })
                , prompt
              }
            }
        }
    }

    /// Question text, whatever the variant
    pub fn prompt(&self) -> &str
    {   match self
        {   QuestionRecord::Mcq(q) => &q.prompt
          , QuestionRecord::ShortAnswer(q) => &q.prompt
          , QuestionRecord::Unrecognized { prompt, .. } => prompt
        }
    }

    /// Ways this record departs from the shape the prompt asked for
    pub fn schema_issues(&self) -> Vec<String>
    {   let mut issues = Vec::new();
        if self.prompt().trim().is_empty()
        {   issues.push("question text is empty".to_string());
        }
        match self
        {   QuestionRecord::Mcq(q) => {
              if q.options.len() != OPTION_LABELS.len()
              {   issues.push(format!(
                    "expected 4 options, found {}",
                    q.options.len()
                  ));
              }
              if !OPTION_LABELS.contains(&q.correct_option_label.trim())
              {   issues.push(format!(
                    "answer {:?} is not one of A, B, C, D",
                    q.correct_option_label
                  ));
              }
              if q.explanation.trim().is_empty()
              {   issues.push("explanation is empty".to_string());
              }
            }
          , QuestionRecord::ShortAnswer(q) => {
              if q.answer.trim().is_empty()
              {   issues.push("answer is empty".to_string());
              }
            }
          , QuestionRecord::Unrecognized { original_type, .. } => {
              issues.push(format!(
                "unrecognized question type {:?}",
                original_type
              ));
            }
        }
        issues
    }
}

/// Reject a quiz whose records do not match the requested shapes
///
/// `raw_response` is attached to the error for diagnosis.
pub fn check_schema(
  records: &[QuestionRecord]
, raw_response: &str
) -> Result<(), crate::error::Error>
{   let problems: Vec<String> = records
      .iter()
      .enumerate()
      .flat_map(|(i, record)| {
        record.schema_issues()
          .into_iter()
          .map(move |issue| format!("question {}: {}", i + 1, issue))
      })
      .collect();

    if problems.is_empty()
    {   return Ok(());
    }
    Err(crate::error::Error::SchemaViolation
    {   message: problems.join("; ")
      , raw_response: raw_response.to_string()
    })
}

fn string_field(value: &Value, key: &str) -> String
{   value.get(key)
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string()
}
