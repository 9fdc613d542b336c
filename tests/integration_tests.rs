use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_test::{assert_err, assert_ok};

use studynotes::client::await_reply;
use studynotes::error::Error;
use studynotes::providers::ModelClient;
use studynotes::quiz::QuestionRecord;
use studynotes::request::ModelReply;
use studynotes::source::TextSource;
use studynotes::{QuizKind, StudyAgent, StudyBackend, SummaryStyle};

const NOTES: &str = "Machine learning is a subset of AI that lets systems \
                     learn from data. Supervised learning uses labeled data.";

const MIXED_REPLY: &str = r#"Here is your quiz:
[
  {"type": "mcq", "q": "What does supervised learning use?",
   "options": ["A. Labeled data", "B. Rewards", "C. Nothing", "D. Noise"],
   "answer": "A", "explanation": "It learns from labeled examples."},
  {"type": "short_answer", "q": "ML is a subset of what?", "answer": "AI"}
]"#;

/// Text source returning the same text for every document
struct FixedText(&'static str);

impl TextSource for FixedText
{   fn extract_text(&self, _document: &Path) -> String
    {   self.0.to_string()
    }
}

/// Text source recording which thread it ran on
struct ThreadRecordingText(Arc<Mutex<Option<std::thread::ThreadId>>>);

impl TextSource for ThreadRecordingText
{   fn extract_text(&self, _document: &Path) -> String
    {   *self.0.lock().unwrap() = Some(std::thread::current().id());
        NOTES.to_string()
    }
}

/// Model double that counts calls and remembers the last prompt
#[derive(Clone)]
struct ScriptedModel
{   reply: Result<String, Error>
  , calls: Arc<AtomicUsize>
  , last_prompt: Arc<Mutex<Option<String>>>
}

impl ScriptedModel
{   fn replying(text: &str) -> Self
    {   Self::with(Ok(text.to_string()))
    }

    fn failing(err: Error) -> Self
    {   Self::with(Err(err))
    }

    fn with(reply: Result<String, Error>) -> Self
    {   ScriptedModel
        {   reply
          , calls: Arc::new(AtomicUsize::new(0))
          , last_prompt: Arc::new(Mutex::new(None))
        }
    }

    fn calls(&self) -> usize
    {   self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String
    {   self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel
{   async fn generate_content(&self, prompt: &str)
      -> Result<ModelReply, Error>
    {   self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().map(|text| ModelReply { text })
    }
}

fn agent(text: &'static str, model: &ScriptedModel) -> StudyAgent
{   StudyAgent::new(Box::new(FixedText(text)), Box::new(model.clone()))
}

#[tokio::test]
async fn test_summarize_returns_model_text_unchanged()
{   let model = ScriptedModel::replying("  - point one\n- point two\n");
    let summary = agent(NOTES, &model)
      .summarize(Path::new("notes.pdf"), SummaryStyle::BulletPoints)
      .await;

    assert_eq!(summary, Ok("  - point one\n- point two\n".to_string()));
    assert_eq!(model.calls(), 1);
    let prompt = model.last_prompt();
    assert!(prompt.contains(NOTES));
    assert!(prompt.contains("bullet points"));
}

#[tokio::test]
async fn test_summarize_empty_text_skips_model()
{   let model = ScriptedModel::replying("unused");
    for text in ["", "   \n\t  "]
    {   let result = agent(text, &model)
          .summarize(Path::new("empty.pdf"), SummaryStyle::Concise)
          .await;
        assert_eq!(result, Err(Error::EmptyInput));
    }
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_quiz_empty_text_skips_model()
{   let model = ScriptedModel::replying("[]");
    let result = agent("", &model)
      .generate_quiz(Path::new("empty.pdf"), QuizKind::Mixed, 5)
      .await;
    assert_eq!(result, Err(Error::EmptyInput));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_quiz_zero_questions_is_invalid()
{   let model = ScriptedModel::replying("[]");
    let result = agent(NOTES, &model)
      .generate_quiz(Path::new("notes.pdf"), QuizKind::MultipleChoice, 0)
      .await;
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_model_failure_becomes_operation_error()
{   let model = ScriptedModel::failing(Error::RateLimitExceeded);
    let summary = agent(NOTES, &model)
      .summarize(Path::new("notes.pdf"), SummaryStyle::StudentFriendly)
      .await;
    assert_eq!(
      summary,
      Err(Error::ModelInvocationFailure(
        "API rate limit exceeded".to_string()
      ))
    );

    let quiz = agent(NOTES, &model)
      .generate_quiz(Path::new("notes.pdf"), QuizKind::Mixed, 3)
      .await;
    assert!(matches!(quiz, Err(Error::ModelInvocationFailure(_))));
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_mixed_quiz_decodes_both_variants()
{   let model = ScriptedModel::replying(MIXED_REPLY);
    let quiz = assert_ok!(
      agent(NOTES, &model)
        .generate_quiz(Path::new("notes.pdf"), QuizKind::Mixed, 2)
        .await
    );

    assert_eq!(quiz.len(), 2);
    match &quiz[0]
    {   QuestionRecord::Mcq(q) => {
          assert_eq!(q.prompt, "What does supervised learning use?");
          assert_eq!(q.options.len(), 4);
          assert_eq!(q.correct_option_label, "A");
        }
      , other => panic!("expected mcq, got {:?}", other)
    }
    match &quiz[1]
    {   QuestionRecord::ShortAnswer(q) => assert_eq!(q.answer, "AI")
      , other => panic!("expected short answer, got {:?}", other)
    }

    let prompt = model.last_prompt();
    assert!(prompt.contains("1 questions must be multiple-choice"));
    assert!(prompt.contains("1 questions must be short answer"));
    assert!(prompt.contains(NOTES));
}

#[tokio::test]
async fn test_unparseable_quiz_keeps_raw_response()
{   let model = ScriptedModel::replying("I could not make a quiz, sorry.");
    let err = assert_err!(
      agent(NOTES, &model)
        .generate_quiz(Path::new("notes.pdf"), QuizKind::MultipleChoice, 5)
        .await
    );
    assert!(err.to_string()
      .starts_with("Failed to parse JSON from LLM response:"));
    assert_eq!(err.raw_response(), Some("I could not make a quiz, sorry."));
}

#[tokio::test]
async fn test_short_quiz_is_returned_as_is()
{   let model = ScriptedModel::replying(
      r#"[{"type": "short_answer", "q": "Q?", "answer": "A"}]"#
    );
    let quiz = assert_ok!(
      agent(NOTES, &model)
        .generate_quiz(Path::new("notes.pdf"), QuizKind::Mixed, 5)
        .await
    );
    assert_eq!(quiz.len(), 1);
}

#[tokio::test]
async fn test_backend_initialization()
{   let model = ScriptedModel::replying("unused");
    let backend = StudyBackend::new(agent(NOTES, &model));
    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_backend_runs_both_tasks()
{   let model = ScriptedModel::replying(MIXED_REPLY);
    let backend = StudyBackend::new(agent(NOTES, &model));

    let summary_rx = assert_ok!(
      backend
        .summarize("notes.pdf".into(), SummaryStyle::Concise)
        .await
    );
    let quiz_rx = assert_ok!(
      backend
        .generate_quiz("notes.pdf".into(), QuizKind::Mixed, 2)
        .await
    );

    let summary = assert_ok!(await_reply(summary_rx).await);
    assert_eq!(summary, MIXED_REPLY);
    let quiz = assert_ok!(await_reply(quiz_rx).await);
    assert_eq!(quiz.len(), 2);
    assert_eq!(model.calls(), 2);

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_backend_reports_operation_errors()
{   let model = ScriptedModel::replying("unused");
    let backend = StudyBackend::new(agent("", &model));

    let rx = assert_ok!(
      backend
        .summarize("empty.pdf".into(), SummaryStyle::Concise)
        .await
    );
    assert_eq!(await_reply(rx).await, Err(Error::EmptyInput));
    assert_eq!(model.calls(), 0);

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_strict_agent_reports_schema_violation_with_raw_reply()
{   let raw = r#"Sure: [{"type":"mcq","q":"Q?","options":["A. x"],"answer":"Q"}]"#;
    let model = ScriptedModel::replying(raw);
    let strict = agent(NOTES, &model).with_strict_schema(true);

    let err = assert_err!(
      strict
        .generate_quiz(Path::new("notes.pdf"), QuizKind::MultipleChoice, 1)
        .await
    );
    assert!(matches!(err, Error::SchemaViolation { .. }), "{:?}", err);
    assert_eq!(err.raw_response(), Some(raw));

    let lenient = assert_ok!(
      agent(NOTES, &model)
        .generate_quiz(Path::new("notes.pdf"), QuizKind::MultipleChoice, 1)
        .await
    );
    assert_eq!(lenient.len(), 1);
}

#[tokio::test]
async fn test_text_extraction_runs_off_the_async_task()
{   let seen = Arc::new(Mutex::new(None));
    let model = ScriptedModel::replying("summary");
    let agent = StudyAgent::new(
      Box::new(ThreadRecordingText(Arc::clone(&seen)))
    , Box::new(model.clone())
    );

    let summary = agent
      .summarize(Path::new("notes.pdf"), SummaryStyle::Concise)
      .await;
    assert_eq!(summary, Ok("summary".to_string()));

    let extractor_thread = seen.lock().unwrap().expect("source was called");
    assert_ne!(extractor_thread, std::thread::current().id());
}
