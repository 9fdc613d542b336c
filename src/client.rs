use std::path::PathBuf;
use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::StudyFoot;

/// Public API for the studynotes backend - owns the task
///
/// The agent lives inside the spawned task and handles one command at a
/// time, in arrival order.
pub struct StudyBackend
{   hand: crate::StudyHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl StudyBackend
{   /// Spawn a backend around `agent`
    /// Returns immediately - spawns background task
    pub fn new(agent: crate::StudyAgent) -> Self
    {   debug!("Creating StudyBackend with task ownership");

        let (summarize_tx, summarize_rx)
          = mpsc::unbounded_channel();
        let (generate_quiz_tx, generate_quiz_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::StudyHand
        {   summarize_tx
          , generate_quiz_tx
          , kill_process_tx
        };

        let foot = crate::StudyFoot
        {   summarize_rx
          , generate_quiz_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, agent).await
        });

        StudyBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a summary - returns almost immediately
    pub async fn summarize(
      &self
    , document: PathBuf
    , style: crate::SummaryStyle
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SummarizeReply>,
        crate::error::Error
      >
    {   debug!("summarize queuing command: {}", style);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SummarizeArgs
        {   document
          , style
          , reply: reply_tx
        };

        self.hand.summarize_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Queue a quiz - returns almost immediately
    pub async fn generate_quiz(
      &self
    , document: PathBuf
    , kind: crate::QuizKind
    , question_count: usize
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GenerateQuizReply>,
        crate::error::Error
      >
    {   debug!(
          "generate_quiz queuing command: {} x{}",
          kind, question_count
        );
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::GenerateQuizArgs
        {   document
          , kind
          , question_count
          , reply: reply_tx
        };

        self.hand.generate_quiz_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down StudyBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Timeout)
        }
    }
}

/// Wait for the single reply to a queued command
pub async fn await_reply<T>(
  mut reply_rx: mpsc::UnboundedReceiver<Result<T, crate::error::Error>>
) -> Result<T, crate::error::Error>
{   reply_rx.recv().await.unwrap_or_else(|| Err(disconnected()))
}

fn disconnected() -> crate::error::Error
{   error!("Backend channel closed");
    crate::error::Error::Other("Backend disconnected".to_string())
}

/// Main backend event loop
///
/// Each arm runs the agent to completion before the next command is
/// taken, so at most one model call is in flight.
async fn run_backend_loop(
  foot: crate::StudyFoot
, agent: crate::StudyAgent
)
{   debug!("Starting StudyBackend event loop");
    let StudyFoot
    {   mut summarize_rx
      , mut generate_quiz_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = summarize_rx.recv() => {
          debug!("Received Summarize: {}", cmd.document.display());
          let result = agent
            .summarize(&cmd.document, cmd.style)
            .await;
          let _ = cmd.reply.send(result);
        }
      , Some(cmd) = generate_quiz_rx.recv() => {
          debug!("Received GenerateQuiz: {}", cmd.document.display());
          let result = agent
            .generate_quiz(&cmd.document, cmd.kind, cmd.question_count)
            .await;
          let _ = cmd.reply.send(result);
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("StudyBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
