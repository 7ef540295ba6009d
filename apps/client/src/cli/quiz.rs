//! Interactive quiz loop.

use anyhow::Result;
use chrono::Utc;
use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use vocab_core::QuizState;

use crate::commands::{fetch_quiz, QuizOptions};
use crate::state::AppState;
use crate::store::{HttpStore, VocabularyStore};

/// Answer lines typed by the user.
///
/// Stdin is read on a detached thread so that leaving the quiz never waits
/// for a pending line.
pub struct AnswerLines {
    rx: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl AnswerLines {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Lines fed through the returned sender; dropping it ends the input.
    pub fn channel() -> (mpsc::UnboundedSender<io::Result<String>>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Fixed input, ending after the last line.
    pub fn from_text(text: &str) -> Self {
        let (tx, answers) = Self::channel();
        for line in text.lines() {
            let _ = tx.send(Ok(line.to_string()));
        }
        answers
    }

    /// Next line, or `None` at end of input.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.rx.recv().await.transpose()
    }
}

pub async fn execute(store: HttpStore, options: QuizOptions) -> Result<()> {
    run_quiz(
        Arc::new(AppState::new()),
        store,
        options,
        AnswerLines::stdin(),
        &mut io::stdout(),
        interrupted(),
    )
    .await
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Load a snapshot from `store` and play it, until done or `cancel` resolves.
///
/// Cancelling during the load leaves the quiz, so the fetch is discarded
/// whenever it finishes. Cancelling during play leaves the quiz without a
/// result.
pub async fn run_quiz<S, W, C>(
    state: Arc<AppState>,
    store: S,
    options: QuizOptions,
    mut answers: AnswerLines,
    output: &mut W,
    cancel: C,
) -> Result<()>
where
    S: VocabularyStore + 'static,
    W: Write,
    C: Future<Output = ()>,
{
    tokio::pin!(cancel);

    let ticket = state.quiz().begin_load();
    let load = tokio::spawn({
        let state = Arc::clone(&state);
        async move { fetch_quiz(&state, &store, ticket, options).await }
    });

    let loaded = tokio::select! {
        loaded = load => Some(loaded),
        _ = &mut cancel => None,
    };
    match loaded {
        Some(loaded) => {
            loaded??;
        }
        None => {
            state.quiz().leave();
            writeln!(output, "Quiz cancelled.")?;
            return Ok(());
        }
    }

    let played = tokio::select! {
        played = play(&state, &mut answers, output) => Some(played),
        _ = &mut cancel => None,
    };
    match played {
        Some(played) => played,
        None => {
            state.quiz().leave();
            writeln!(output)?;
            writeln!(output, "Quiz cancelled.")?;
            Ok(())
        }
    }
}

/// Ask every question of the loaded session, reading one answer per line.
///
/// End of input leaves the quiz without a result.
pub async fn play<W: Write>(
    state: &AppState,
    answers: &mut AnswerLines,
    output: &mut W,
) -> Result<()> {
    loop {
        let (position, total, word) = {
            let quiz = state.quiz();
            let session = quiz.session();
            match session.state() {
                QuizState::InProgress => (
                    session.index() + 1,
                    session.total(),
                    session.current_question()?.to_string(),
                ),
                QuizState::Completed => break,
                QuizState::NotStarted => return Ok(()),
            }
        };

        write!(output, "[{}/{}] {} = ", position, total, word)?;
        output.flush()?;

        let Some(answer) = answers.next_line().await? else {
            state.quiz().leave();
            writeln!(output)?;
            writeln!(output, "Quiz abandoned.")?;
            return Ok(());
        };

        let outcome = state.quiz().session_mut().submit_answer(&answer)?;
        if outcome.is_correct {
            writeln!(output, "  Correct!")?;
        } else {
            writeln!(output, "  Wrong, the answer is: {}", outcome.expected)?;
        }
    }

    let quiz = state.quiz();
    let session = quiz.session();
    let result = session.result()?;
    let stats = session.statistics(Utc::now());

    if result.total == 0 {
        writeln!(output, "No words to quiz on. Add some with `vocab add`.")?;
        return Ok(());
    }

    writeln!(output)?;
    writeln!(output, "Score: {}/{} ({:.0}%)", result.score, result.total, result.percentage())?;
    writeln!(
        output,
        "Correct: {}  Incorrect: {}",
        stats.correct_answers, stats.incorrect_answers
    )?;
    if let Some(difficulty) = stats.difficulty {
        writeln!(output, "Difficulty: {}", difficulty)?;
    }
    if let Some(secs) = stats.elapsed_seconds {
        writeln!(output, "Time: {}s", secs)?;
    }

    info!(score = result.score, total = result.total, "quiz completed");
    Ok(())
}
