pub mod prompts;
pub mod spinner;

pub use prompts::{Choice, DialoguerPrompts, NonInteractivePrompts, PromptError, PromptProvider};
pub use spinner::Spinner;
