use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};
use log::{debug, error, info};

use studynotes::client::await_reply;
use studynotes::config::AgentConfig;
use studynotes::providers::GeminiClient;
use studynotes::render;
use studynotes::source::{DocumentTextSource, TextSource};
use studynotes::{QuizKind, StudyAgent, StudyBackend, SummaryStyle};

/// Summaries and quizzes from your documents
#[derive(Parser, Debug)]
#[command(name = "studynotes", version, about)]
struct Cli
{   /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool
  , #[command(subcommand)]
    command: Command
}

#[derive(Subcommand, Debug)]
enum Command
{   /// Print the text extracted from a document
    Preview
    {   file: PathBuf
    }
  , /// Summarize a document
    Summarize
    {   file: PathBuf
      , /// concise, bullet_points or student_friendly
        #[arg(long, default_value = "concise")]
        style: String
      , /// Save next to the current directory as <name>_<style>_summary.txt
        #[arg(long)]
        save: bool
      , /// Save to this path instead
        #[arg(long)]
        output: Option<PathBuf>
    }
  , /// Generate a quiz from a document
    Quiz
    {   file: PathBuf
      , /// mcq or mixed
        #[arg(long, default_value = "mcq")]
        kind: String
      , /// Number of questions
        #[arg(
          long,
          default_value_t = studynotes::DEFAULT_QUESTION_COUNT,
          value_parser = clap::value_parser!(u16).range(1..=10)
            .map(usize::from)
        )]
        count: usize
      , /// Print the quiz as JSON
        #[arg(long)]
        json: bool
      , /// Fail when questions do not have the requested shape
        #[arg(long)]
        strict: bool
    }
}

#[tokio::main]
async fn main() -> ExitCode
{   let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command).await
    {   Ok(()) => ExitCode::SUCCESS
      , Err(code) => code
    }
}

fn init_logging(verbose: bool)
{   let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or(default_level)
    ).init();
}

async fn run(command: Command) -> Result<(), ExitCode>
{   if let Command::Preview { file } = &command
    {   return preview(file);
    }

    let config = AgentConfig::from_env().map_err(fail)?;
    let model = GeminiClient::new(&config).map_err(|e| {
      eprintln!("{}", e);
      eprintln!(
        "Set GEMINI_API_KEY in your environment or .env file."
      );
      ExitCode::from(2)
    })?;
    info!("Using model {}", model.model());

    let strict = matches!(command, Command::Quiz { strict: true, .. });
    let agent = StudyAgent::new(
      Box::new(DocumentTextSource)
    , Box::new(model)
    ).with_strict_schema(strict);
    let backend = StudyBackend::new(agent);

    let outcome = match command
    {   Command::Summarize { file, style, save, output } => {
          summarize(&backend, file, &style, save, output).await
        }
      , Command::Quiz { file, kind, count, json, .. } => {
          quiz(&backend, file, &kind, count, json).await
        }
      , Command::Preview { .. } => Ok(())
    };

    if let Err(e) = backend.shutdown().await
    {   debug!("Backend shutdown: {}", e);
    }
    outcome
}

fn preview(file: &Path) -> Result<(), ExitCode>
{   let text = DocumentTextSource.extract_text(file);
    if text.trim().is_empty()
    {   eprintln!("Could not extract text from document for preview.");
        return Err(ExitCode::FAILURE);
    }
    println!("{}", text);
    Ok(())
}

async fn summarize(
  backend: &StudyBackend
, file: PathBuf
, style: &str
, save: bool
, output: Option<PathBuf>
) -> Result<(), ExitCode>
{   let style: SummaryStyle = style.parse().map_err(fail)?;
    let reply = backend
      .summarize(file.clone(), style)
      .await
      .map_err(fail)?;
    let summary = await_reply(reply).await.map_err(fail)?;

    println!("{}:\n", render::summary_title(style));
    println!("{}", summary);

    let target = output.or_else(|| {
      save.then(|| PathBuf::from(render::summary_file_name(&file, style)))
    });
    if let Some(path) = target
    {   std::fs::write(&path, &summary).map_err(|e| {
          error!("Cannot write {}: {}", path.display(), e);
          eprintln!("Could not save summary to {}: {}", path.display(), e);
          ExitCode::FAILURE
        })?;
        eprintln!("Saved summary to {}", path.display());
    }
    Ok(())
}

async fn quiz(
  backend: &StudyBackend
, file: PathBuf
, kind: &str
, count: usize
, json: bool
) -> Result<(), ExitCode>
{   let kind: QuizKind = kind.parse().map_err(fail)?;
    let reply = backend
      .generate_quiz(file, kind, count)
      .await
      .map_err(fail)?;
    let questions = await_reply(reply).await.map_err(fail)?;

    if json
    {   let pretty = serde_json::to_string_pretty(&questions)
          .map_err(|e| {
            eprintln!("Could not encode quiz: {}", e);
            ExitCode::FAILURE
          })?;
        println!("{}", pretty);
    } else
    {   println!("{}:\n", render::quiz_title(kind));
        print!("{}", render::render_quiz_markdown(&questions));
    }
    Ok(())
}

fn fail(err: studynotes::Error) -> ExitCode
{   eprintln!("{}", render::render_error(&err));
    ExitCode::FAILURE
}
