//! Summary and quiz tasks over one text source and one model client

use std::path::Path;
use std::sync::Arc;
use log::{debug, error, info, trace};

use crate::error::Error;
use crate::normalize::{normalize_quiz, normalize_quiz_strict, normalize_summary};
use crate::prompts::{build_quiz_prompt, build_summary_prompt};
use crate::providers::ModelClient;
use crate::quiz::QuizResult;
use crate::request::{QuizKind, QuizRequest, SummaryRequest, SummaryStyle};
use crate::source::TextSource;

/// Turns documents into summaries and quizzes
///
/// Calls are independent: nothing is remembered between them, and a
/// failed model call or decode is final for that call.
pub struct StudyAgent
{   source: Arc<dyn TextSource>
  , model: Box<dyn ModelClient>
  , strict_schema: bool
}

impl StudyAgent
{   pub fn new(
      source: Box<dyn TextSource>
    , model: Box<dyn ModelClient>
    ) -> Self
    {   StudyAgent
        {   source: Arc::from(source)
          , model
          , strict_schema: false
        }
    }

    /// Reject quizzes whose records do not have the requested shape
    pub fn with_strict_schema(mut self, strict: bool) -> Self
    {   self.strict_schema = strict;
        self
    }

    /// Summarize `document` in the given style
    pub async fn summarize(
      &self
    , document: &Path
    , style: SummaryStyle
    ) -> Result<String, Error>
    {   info!("Summarizing {} ({})", document.display(), style);
        let request = SummaryRequest::new(
          self.extract_text(document).await
        , style
        )?;

        let prompt = build_summary_prompt(
          &request.source_text, request.style
        );
        let raw = self.invoke(&prompt).await?;
        Ok(normalize_summary(raw))
    }

    /// Build a quiz of `question_count` questions from `document`
    pub async fn generate_quiz(
      &self
    , document: &Path
    , kind: QuizKind
    , question_count: usize
    ) -> Result<QuizResult, Error>
    {   info!(
          "Generating {} {} questions from {}",
          question_count, kind, document.display()
        );
        crate::request::ensure_question_count(question_count)?;
        let request = QuizRequest::new(
          self.extract_text(document).await
        , kind
        , question_count
        )?;

        let prompt = build_quiz_prompt(
          &request.source_text, request.kind, request.question_count
        );
        let raw = self.invoke(&prompt).await?;
        let quiz = if self.strict_schema
        {   normalize_quiz_strict(&raw)?
        } else
        {   normalize_quiz(&raw)?
        };
        if quiz.len() != request.question_count
        {   debug!(
              "Asked for {} questions, model returned {}",
              request.question_count, quiz.len()
            );
        }
        Ok(quiz)
    }

    /// Runs the text source on the blocking pool
    async fn extract_text(&self, document: &Path) -> String
    {   let source = Arc::clone(&self.source);
        let document = document.to_path_buf();
        tokio::task::spawn_blocking(move || source.extract_text(&document))
          .await
          .unwrap_or_else(|e| {
            error!("Text extraction task failed: {}", e);
            String::new()
          })
    }

    async fn invoke(&self, prompt: &str) -> Result<String, Error>
    {   trace!("Prompt: {}", prompt);
        match self.model.generate_content(prompt).await
        {   Ok(reply) => {
              trace!("Raw reply: {}", reply.text);
              Ok(reply.text)
            }
          , Err(e) => {
              error!("Model call failed: {}", e);
              Err(Error::ModelInvocationFailure(e.to_string()))
            }
        }
    }
}
