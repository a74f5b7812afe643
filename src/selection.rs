use anyhow::Result;
use inquire::{InquireError, Select, Text};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// One entry in a selection menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    /// Secondary text rendered after the label
    pub detail: Option<String>,
}

impl MenuOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) if !detail.is_empty() => write!(f, "{}  ({})", self.label, detail),
            _ => write!(f, "{}", self.label),
        }
    }
}

/// Trait for providing interactive selection functionality
/// This allows us to abstract away the interactive prompts for testing
///
/// `Ok(None)` means the user backed out of the prompt; callers abandon the
/// current operation without side effects.
pub trait SelectionProvider {
    /// Present a selection menu and return the index of the user's choice
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be used for prompting
    fn select(&self, prompt: &str, options: &[MenuOption]) -> Result<Option<usize>>;

    /// Get trimmed text input from the user. An empty submission returns the
    /// default when one is given.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be used for prompting
    fn get_text_input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;
}

fn cancelled<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Real implementation using inquire for production use
pub struct RealSelectionProvider;

impl SelectionProvider for RealSelectionProvider {
    fn select(&self, prompt: &str, options: &[MenuOption]) -> Result<Option<usize>> {
        let selection = Select::new(prompt, options.to_vec())
            .with_page_size(10)
            .with_vim_mode(true)
            .raw_prompt();
        Ok(cancelled(selection)?.map(|choice| choice.index))
    }

    fn get_text_input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        let mut text_prompt = Text::new(prompt);

        if let Some(default) = default {
            text_prompt = text_prompt.with_default(default);
        }

        Ok(cancelled(text_prompt.prompt())?.map(|text| text.trim().to_string()))
    }
}

/// A single scripted answer for [`ScriptedSelectionProvider`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Pick the menu entry with this label
    Choose(String),
    /// Type this text; empty text takes the prompt's default
    Text(String),
    /// Back out of the prompt
    Cancel,
}

/// Mock implementation for testing that replays a fixed script of answers
#[derive(Default)]
pub struct ScriptedSelectionProvider {
    answers: RefCell<VecDeque<ScriptedAnswer>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedSelectionProvider {
    pub fn new(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Number of answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next_answer(&self, prompt: &str) -> Result<ScriptedAnswer> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No scripted answer left for prompt '{}'", prompt))
    }
}

impl SelectionProvider for ScriptedSelectionProvider {
    fn select(&self, prompt: &str, options: &[MenuOption]) -> Result<Option<usize>> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Choose(label) => options
                .iter()
                .position(|option| option.label == label)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("Mock response '{}' not found in options", label)),
            ScriptedAnswer::Cancel => Ok(None),
            ScriptedAnswer::Text(text) => {
                anyhow::bail!("Expected a choice for '{}', script has text '{}'", prompt, text)
            }
        }
    }

    fn get_text_input(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        match self.next_answer(prompt)? {
            ScriptedAnswer::Text(text) => {
                let text = text.trim().to_string();
                match default {
                    Some(default) if text.is_empty() => Ok(Some(default.to_string())),
                    _ => Ok(Some(text)),
                }
            }
            ScriptedAnswer::Cancel => Ok(None),
            ScriptedAnswer::Choose(label) => {
                anyhow::bail!("Expected text for '{}', script has choice '{}'", prompt, label)
            }
        }
    }
}

/// Shorthand for [`ScriptedAnswer::Choose`]
pub fn choose(label: &str) -> ScriptedAnswer {
    ScriptedAnswer::Choose(label.to_string())
}

/// Shorthand for [`ScriptedAnswer::Text`]
pub fn text(value: &str) -> ScriptedAnswer {
    ScriptedAnswer::Text(value.to_string())
}
