//! Save prompts: how the host learns where to write.
//!
//! | Prompt            | Behavior                                            |
//! |-------------------|-----------------------------------------------------|
//! | `DirectoryPrompt` | never asks; saves under a fixed export directory    |
//! | `TerminalPrompt`  | asks on stdin: Enter = default, path, or `q`        |

use std::io::{self, BufRead, Write};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::protocol::SaveDialogOptions;

/// What the user decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Chosen(PathBuf),
    Canceled,
}

/// Asks where a file should be saved.
///
/// Implementations are shared across concurrent requests, one call per
/// request.
#[async_trait]
pub trait SavePrompt: Send + Sync {
    async fn choose_path(&self, options: &SaveDialogOptions) -> io::Result<PromptOutcome>;
}

// =============================================================================
// Directory Prompt
// =============================================================================

/// Non-interactive prompt: every file goes into `dir` under its default name.
#[derive(Debug, Clone)]
pub struct DirectoryPrompt {
    dir: PathBuf,
}

impl DirectoryPrompt {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl SavePrompt for DirectoryPrompt {
    async fn choose_path(&self, options: &SaveDialogOptions) -> io::Result<PromptOutcome> {
        let Some(name) = plain_file_name(&options.default_path) else {
            warn!(
                default_path = %options.default_path,
                "Rejected default path outside export dir"
            );
            return Ok(PromptOutcome::Canceled);
        };
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(PromptOutcome::Chosen(self.dir.join(name)))
    }
}

// =============================================================================
// Terminal Prompt
// =============================================================================

/// Interactive prompt on the controlling terminal.
///
/// A relative answer (and the default) resolves against `base_dir`.
#[derive(Debug, Clone)]
pub struct TerminalPrompt {
    base_dir: PathBuf,
}

impl TerminalPrompt {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl SavePrompt for TerminalPrompt {
    async fn choose_path(&self, options: &SaveDialogOptions) -> io::Result<PromptOutcome> {
        let question = format!(
            "{} [{}] ({}: {}) Enter to accept, q to cancel: ",
            options.title,
            options.default_path,
            options
                .filters
                .first()
                .map(|f| f.name.as_str())
                .unwrap_or("Files"),
            options
                .filters
                .first()
                .map(|f| f.extensions.join(", "))
                .unwrap_or_default(),
        );

        let answer = tokio::task::spawn_blocking(move || -> io::Result<Option<String>> {
            let mut stdout = io::stdout();
            stdout.write_all(question.as_bytes())?;
            stdout.flush()?;

            let mut line = String::new();
            let read = io::stdin().lock().read_line(&mut line)?;
            Ok((read > 0).then_some(line))
        })
        .await
        .map_err(io::Error::other)??;

        let outcome = match answer {
            Some(line) => interpret_answer(&line, &self.base_dir, &options.default_path),
            // EOF on stdin
            None => PromptOutcome::Canceled,
        };
        debug!(?outcome, "Terminal save prompt answered");
        Ok(outcome)
    }
}

/// The default path as a single file name.
///
/// `None` when it has directory parts (`..`, a root, a drive prefix,
/// or any separator), so a requester can never aim outside the folder.
pub fn plain_file_name(default_path: &str) -> Option<&OsStr> {
    let mut components = Path::new(default_path).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(name),
        _ => None,
    }
}

/// Maps a typed answer to an outcome.
///
/// - empty → `base_dir/default_path` (canceled unless it is a plain file name)
/// - `q` / `quit` → canceled
/// - anything else → that path (relative paths join `base_dir`)
pub fn interpret_answer(answer: &str, base_dir: &Path, default_path: &str) -> PromptOutcome {
    let answer = answer.trim();
    match answer {
        "" => match plain_file_name(default_path) {
            Some(name) => PromptOutcome::Chosen(base_dir.join(name)),
            None => PromptOutcome::Canceled,
        },
        "q" | "Q" | "quit" => PromptOutcome::Canceled,
        path => PromptOutcome::Chosen(base_dir.join(path)),
    }
}
