//! Presentation helpers for the front end

use std::fmt::Write;
use std::path::Path;

use crate::quiz::QuestionRecord;
use crate::request::{QuizKind, SummaryStyle};

/// Heading shown above a summary, e.g. "Bullet Points Summary"
pub fn summary_title(style: SummaryStyle) -> String
{   format!("{} Summary", title_case(style.as_str()))
}

/// Heading shown above a quiz, e.g. "Mixed Quiz"
pub fn quiz_title(kind: QuizKind) -> String
{   format!("{} Quiz", title_case(kind.as_str()))
}

/// File name for a saved summary: `<stem>_<style>_summary.txt`
pub fn summary_file_name(document: &Path, style: SummaryStyle) -> String
{   let stem = document
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .filter(|s| !s.is_empty())
      .unwrap_or_else(|| "document".to_string());
    format!("{}_{}_summary.txt", stem, style.as_str())
}

/// Quiz as Markdown, answers included
pub fn render_quiz_markdown(questions: &[QuestionRecord]) -> String
{   let mut out = String::new();
    for (i, question) in questions.iter().enumerate()
    {   let _ = writeln!(
          out, "**Question {}:** {}\n", i + 1, question.prompt()
        );
        match question
        {   QuestionRecord::Mcq(q) => {
              for option in &q.options
              {   let _ = writeln!(out, "- {}", option);
              }
              let _ = writeln!(
                out, "\nCorrect Answer: {}", q.correct_option_label
              );
              let _ = writeln!(out, "Explanation: {}", q.explanation);
            }
          , QuestionRecord::ShortAnswer(q) => {
              let _ = writeln!(out, "Answer: {}", q.answer);
            }
          , QuestionRecord::Unrecognized { original_type, .. } => {
              let _ = writeln!(
                out,
                "(Unsupported question type: {})",
                original_type.as_deref().unwrap_or("missing")
              );
            }
        }
        out.push_str("\n---\n\n");
    }
    out
}

/// User-facing error text, with the raw model output when there is one
pub fn render_error(err: &crate::error::Error) -> String
{   match err.raw_response()
    {   Some(raw) => format!(
          "{}\n\nRaw LLM response (for debugging):\n{}",
          err, raw
        )
      , None => err.to_string()
    }
}

fn title_case(snake: &str) -> String
{   snake
      .split('_')
      .map(|word| {
        let mut chars = word.chars();
        match chars.next()
        {   Some(first) => {
              first.to_uppercase().chain(chars).collect::<String>()
            }
          , None => String::new()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
}
