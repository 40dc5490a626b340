// src/client/shell.rs

use crate::models::{generation::ModelTier, question_set::QuestionSet};

use super::fetch::{ClientError, QuestionSource};

pub const FETCH_ERROR_PREFIX: &str = "Could not fetch a question: ";
pub const FALLBACK_ERROR_MESSAGE: &str =
    "An unexpected error occurred while fetching the question.";

/// One "answer shown" flag per question, all hidden at creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevealState {
    shown: Vec<bool>,
}

impl RevealState {
    pub fn new(len: usize) -> Self {
        Self {
            shown: vec![false; len],
        }
    }

    /// Flips the flag at `index` and returns the new value, or `None` when
    /// the index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flag = self.shown.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.shown.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShellState {
    #[default]
    Idle,
    Loading,
    Success {
        set: QuestionSet,
        reveal: RevealState,
    },
    Error(String),
}

/// UI-level state: what is on screen and which model the user picked.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    state: ShellState,
    model: ModelTier,
}

impl Shell {
    pub fn new(model: ModelTier) -> Self {
        Self {
            state: ShellState::Idle,
            model,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn model(&self) -> ModelTier {
        self.model
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ShellState::Loading)
    }

    /// Enters `Loading`, dropping any previous result or error.
    /// Returns `false` (and changes nothing) while a generation is in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = ShellState::Loading;
        true
    }

    /// Applies the outcome of the fetch started by `begin`.
    pub fn resolve(&mut self, outcome: Result<QuestionSet, ClientError>) {
        if !self.is_loading() {
            tracing::warn!("Ignoring generation outcome: no generation in flight");
            return;
        }

        self.state = match outcome {
            Ok(set) => {
                let reveal = RevealState::new(set.questions.len());
                ShellState::Success { set, reveal }
            }
            Err(err) => {
                tracing::error!("Error caught while fetching question set: {}", err);
                let detail = err.to_string();
                let detail = if detail.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    detail
                };
                ShellState::Error(format!("{}{}", FETCH_ERROR_PREFIX, detail))
            }
        };
    }

    /// Runs one generation against `source` with the selected model.
    pub async fn generate(&mut self, source: &dyn QuestionSource) -> &ShellState {
        if !self.begin() {
            return &self.state;
        }
        tracing::info!("Requesting generation with model: {}", self.model);
        let outcome = source.fetch(self.model).await;
        self.resolve(outcome);
        &self.state
    }
}
