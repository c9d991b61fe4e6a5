use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use thiserror::Error;

/// Validation callback for text input; `Err` carries the message to show
pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// One entry of a choice list
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: String,
    /// Shown next to the label; a disabled choice cannot be picked
    pub disabled: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: None,
        }
    }

    pub fn disabled(label: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: Some(reason.into()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.disabled.is_none()
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input required but not interactive: {0}")]
    NotInteractive(String),

    #[error("no selectable options for: {0}")]
    NoEnabledChoices(String),
}

/// The human-in-the-loop capability the migration engine depends on
pub trait PromptProvider: Send + Sync {
    /// Pick one enabled choice, returning its value
    fn choose(&self, message: &str, choices: &[Choice]) -> Result<String>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    fn input(&self, message: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String>;
}

/// Terminal prompts backed by dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompts;

impl PromptProvider for DialoguerPrompts {
    fn choose(&self, message: &str, choices: &[Choice]) -> Result<String> {
        if !choices.iter().any(Choice::is_enabled) {
            return Err(PromptError::NoEnabledChoices(message.to_string()).into());
        }

        let items: Vec<String> = choices
            .iter()
            .map(|choice| match &choice.disabled {
                Some(reason) => format!("{} ({})", choice.label, reason).dimmed().to_string(),
                None => choice.label.clone(),
            })
            .collect();
        let default_index = choices.iter().position(Choice::is_enabled).unwrap_or(0);

        loop {
            let selection = Select::new()
                .with_prompt(message)
                .items(&items)
                .default(default_index)
                .interact()?;

            let choice = &choices[selection];
            match &choice.disabled {
                None => return Ok(choice.value.clone()),
                Some(reason) => println!("{} {}", "Not selectable:".yellow(), reason),
            }
        }
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        prompt_confirmation(message, default)
    }

    fn input(&self, message: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(message);

        if let Some(default_val) = default {
            input = input.default(default_val.to_string());
        }

        let value = input
            .validate_with(|value: &String| validate(value.as_str()))
            .interact_text()?;
        Ok(value)
    }
}

/// Prompts for runs without a terminal. Choices always fail; confirms pass
/// only with `assume_yes`; inputs fall back to a valid default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractivePrompts {
    pub assume_yes: bool,
}

impl NonInteractivePrompts {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl PromptProvider for NonInteractivePrompts {
    fn choose(&self, message: &str, _choices: &[Choice]) -> Result<String> {
        Err(PromptError::NotInteractive(message.to_string()).into())
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        if self.assume_yes {
            log::info!("Auto-confirming: {}", message);
            Ok(true)
        } else {
            Err(PromptError::NotInteractive(message.to_string()).into())
        }
    }

    fn input(&self, message: &str, default: Option<&str>, validate: Validator<'_>) -> Result<String> {
        match default {
            Some(value) if validate(value).is_ok() => {
                log::info!("Using default '{}' for: {}", value, message);
                Ok(value.to_string())
            }
            _ => Err(PromptError::NotInteractive(message.to_string()).into()),
        }
    }
}

/// Interactive confirmation prompt using arrow-key navigable selection
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}
