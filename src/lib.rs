pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod quiz;
pub mod prompts;
pub mod normalize;
pub mod source;
pub mod agent;
pub mod client;
pub mod render;

/*

studynotes: summaries and quizzes from documents, written by an LLM.

studynotes/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and the backend command types
│   ├── main.rs         # Command line front end
│   ├── error.rs        # Error type shared by every layer
│   ├── config.rs       # Provider configuration (env / .env)
│   ├── request.rs      # Task requests, styles and kinds
│   ├── quiz.rs         # Question records
│   ├── prompts.rs      # Prompt templates
│   ├── normalize.rs    # Raw model text -> results
│   ├── source.rs       # Document text extraction
│   ├── agent.rs        # The two tasks: summarize, generate_quiz
│   ├── client.rs       # Backend task owning an agent
│   ├── render.rs       # Markdown output and file names
│   └── providers/
│       ├── mod.rs      # ModelClient trait
│       └── gemini.rs   # Google Gemini
└── tests/

*/

pub use agent::StudyAgent;
pub use client::StudyBackend;
pub use error::Error;
pub use quiz::{QuestionRecord, QuizResult};
pub use request::{QuizKind, SummaryStyle, DEFAULT_QUESTION_COUNT};

/// STUDYNOTES BACKEND INTERFACE:

// ===== Summarize =====

pub type SummarizeReply = Result<String, crate::error::Error>;
pub type SummarizeReplySender
  = tokio::sync::mpsc::UnboundedSender<SummarizeReply>;

pub struct SummarizeArgs
{   pub document: std::path::PathBuf
  , pub style: crate::SummaryStyle
  , pub reply: SummarizeReplySender
}

// ===== GenerateQuiz =====

pub type GenerateQuizReply
  = Result<crate::QuizResult, crate::error::Error>;
pub type GenerateQuizReplySender
  = tokio::sync::mpsc::UnboundedSender<GenerateQuizReply>;

pub struct GenerateQuizArgs
{   pub document: std::path::PathBuf
  , pub kind: crate::QuizKind
  , pub question_count: usize
  , pub reply: GenerateQuizReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== StudyHand (sender side) =====

pub struct StudyHand
{   pub summarize_tx
      : tokio::sync::mpsc::UnboundedSender<SummarizeArgs>
  , pub generate_quiz_tx
      : tokio::sync::mpsc::UnboundedSender<GenerateQuizArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== StudyFoot (receiver side) =====

pub struct StudyFoot
{   pub summarize_rx
      : tokio::sync::mpsc::UnboundedReceiver<SummarizeArgs>
  , pub generate_quiz_rx
      : tokio::sync::mpsc::UnboundedReceiver<GenerateQuizArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
