//! Prompt templates for summaries and quizzes
//!
//! Every template embeds the source text verbatim between `---` lines.
//! The builders never look at the text itself; callers check for empty
//! input before getting here.

use crate::request::{QuizKind, SummaryStyle};

const QUALITY_LINE: &str
  = "Ensure the summary is clean, meaningful, readable, structured, \
     and avoids jargon where possible.";

const JSON_ONLY_LINE: &str
  = "Respond with ONLY the JSON array and nothing else: no introduction, \
     no closing remarks, no Markdown code fences.";

const MCQ_SHAPE: &str
  = r#"{"type": "mcq", "q": "Question text?", "options": ["A. Option A", "B. Option B", "C. Option C", "D. Option D"], "answer": "B", "explanation": "Because..."}"#;

const SHORT_ANSWER_SHAPE: &str
  = r#"{"type": "short_answer", "q": "Question text?", "answer": "Brief correct answer."}"#;

/// Split a mixed quiz into (multiple choice, short answer) counts
///
/// The multiple choice share is `floor(count * 0.6)`.
pub fn mixed_split(question_count: usize) -> (usize, usize)
{   let mcq_count = question_count * 3 / 5;
    (mcq_count, question_count - mcq_count)
}

/// Build the summary prompt for `style`
pub fn build_summary_prompt(
  source_text: &str
, style: SummaryStyle
) -> String
{   let (instruction, heading) = match style
    {   SummaryStyle::Concise => (
          "Please provide a concise summary of the following text \
           in two paragraphs."
        , "Concise Summary:"
        )
      , SummaryStyle::BulletPoints => (
          "Please provide a summary of the following text \
           in bullet points."
        , "Bullet Point Summary:"
        )
      , SummaryStyle::StudentFriendly => (
          "Please provide a student-friendly summary of the following \
           text in simple language."
        , "Student-Friendly Summary:"
        )
    };

    format!(
      "{instruction}\n\
       {QUALITY_LINE}\n\
       Text:\n\
       ---\n\
       {source_text}\n\
       ---\n\
       {heading}\n"
    )
}

/// Build the quiz prompt for `kind` asking for `question_count` questions
pub fn build_quiz_prompt(
  source_text: &str
, kind: QuizKind
, question_count: usize
) -> String
{   let instructions = match kind
    {   QuizKind::MultipleChoice => format!(
          "From the following text, generate exactly {question_count} \
           multiple-choice questions (MCQs).\n\
           Each MCQ must have 4 options labeled A, B, C and D, exactly one \
           correct answer given by its letter, and a one-line explanation \
           of the correct answer.\n\
           The questions should be challenging and cover key concepts from \
           the text.\n\
           Provide the output as a JSON array of objects, where each object \
           has the following structure:\n\
           {MCQ_SHAPE}\n"
        )
      , QuizKind::Mixed => {
          let (mcq_count, short_count) = mixed_split(question_count);
          format!(
            "From the following text, generate a mixed quiz with exactly \
             {question_count} questions.\n\
             {mcq_count} questions must be multiple-choice (MCQs) and \
             {short_count} questions must be short answer questions.\n\
             \n\
             For MCQs:\n\
             - Each MCQ must have 4 options labeled A, B, C and D, exactly \
             one correct answer given by its letter, and a one-line \
             explanation.\n\
             - Structure as: {MCQ_SHAPE}\n\
             \n\
             For short answer questions:\n\
             - Provide the question and a brief, correct answer.\n\
             - Structure as: {SHORT_ANSWER_SHAPE}\n\
             \n\
             The questions should be challenging and cover key concepts \
             from the text.\n\
             Provide the entire output as a single JSON array of objects.\n"
          )
        }
    };

    format!(
      "{instructions}\
       Ensure the JSON output is valid and can be directly parsed.\n\
       {JSON_ONLY_LINE}\n\
       Text:\n\
       ---\n\
       {source_text}\n\
       ---\n\
       JSON Output:\n"
    )
}
