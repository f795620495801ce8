// ── Interactive selection ──
//
// Commands ask questions through `Prompter` so the flows stay testable and
// run unattended when stdin is not a terminal.

use crate::error::CoreError;

pub trait Prompter: Send + Sync {
    /// Indices of the chosen entries; empty when nothing was picked.
    fn multi_select(&self, prompt: &str, choices: &[String]) -> Result<Vec<usize>, CoreError>;

    /// Index of the chosen entry.
    fn select(&self, prompt: &str, choices: &[String], default: usize) -> Result<usize, CoreError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CoreError>;
}

/// Answers every question with its default. Picks nothing from a
/// multi-select.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPrompter;

impl Prompter for HeadlessPrompter {
    fn multi_select(&self, prompt: &str, _choices: &[String]) -> Result<Vec<usize>, CoreError> {
        tracing::debug!(prompt, "no terminal, selecting nothing");
        Ok(Vec::new())
    }

    fn select(&self, _prompt: &str, choices: &[String], default: usize) -> Result<usize, CoreError> {
        Ok(default.min(choices.len().saturating_sub(1)))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CoreError> {
        tracing::debug!(prompt, default, "no terminal, using default answer");
        Ok(default)
    }
}
