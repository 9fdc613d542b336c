//! Task request types and their parameters

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Question count used when the caller does not pick one
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Summary flavour requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle
{   /// Two short paragraphs
    Concise
  , /// A bulleted list
    BulletPoints
  , /// Simple language for students
    StudentFriendly
}

impl SummaryStyle
{   pub const ALL: [SummaryStyle; 3] = [
      SummaryStyle::Concise
    , SummaryStyle::BulletPoints
    , SummaryStyle::StudentFriendly
    ];

    /// Name used on the command line and in file names
    pub fn as_str(&self) -> &'static str
    {   match self
        {   SummaryStyle::Concise => "concise"
          , SummaryStyle::BulletPoints => "bullet_points"
          , SummaryStyle::StudentFriendly => "student_friendly"
        }
    }
}

impl fmt::Display for SummaryStyle
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStyle
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   SummaryStyle::ALL
          .into_iter()
          .find(|style| style.as_str() == s)
          .ok_or_else(|| {
            crate::error::Error::InvalidParameter(format!(
              "summary style {:?}; must be 'concise', \
               'bullet_points', or 'student_friendly'",
              s
            ))
          })
    }
}

/// Quiz flavour requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizKind
{   /// Only four-option questions
    #[serde(rename = "mcq")]
    MultipleChoice
  , /// 60% multiple choice, the rest short answer
    #[serde(rename = "mixed")]
    Mixed
}

impl QuizKind
{   pub const ALL: [QuizKind; 2] = [
      QuizKind::MultipleChoice
    , QuizKind::Mixed
    ];

    pub fn as_str(&self) -> &'static str
    {   match self
        {   QuizKind::MultipleChoice => "mcq"
          , QuizKind::Mixed => "mixed"
        }
    }
}

impl fmt::Display for QuizKind
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for QuizKind
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   QuizKind::ALL
          .into_iter()
          .find(|kind| kind.as_str() == s)
          .ok_or_else(|| {
            crate::error::Error::InvalidParameter(format!(
              "quiz kind {:?}; must be 'mcq' or 'mixed'",
              s
            ))
          })
    }
}

/// Input for one summary call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest
{   pub source_text: String
  , pub style: SummaryStyle
}

impl SummaryRequest
{   pub fn new(
      source_text: String
    , style: SummaryStyle
    ) -> Result<Self, crate::error::Error>
    {   ensure_text(&source_text)?;
        Ok(SummaryRequest
        {   source_text
          , style
        })
    }
}

/// Input for one quiz call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest
{   pub source_text: String
  , pub kind: QuizKind
  , pub question_count: usize
}

impl QuizRequest
{   pub fn new(
      source_text: String
    , kind: QuizKind
    , question_count: usize
    ) -> Result<Self, crate::error::Error>
    {   ensure_question_count(question_count)?;
        ensure_text(&source_text)?;
        Ok(QuizRequest
        {   source_text
          , kind
          , question_count
        })
    }
}

/// Raw completion returned by a model client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReply
{   pub text: String
}

pub(crate) fn ensure_question_count(count: usize)
  -> Result<(), crate::error::Error>
{   if count == 0
    {   return Err(crate::error::Error::InvalidParameter(
          "question count must be at least 1".to_string()
        ));
    }
    Ok(())
}

fn ensure_text(text: &str) -> Result<(), crate::error::Error>
{   if text.trim().is_empty()
    {   return Err(crate::error::Error::EmptyInput);
    }
    Ok(())
}
