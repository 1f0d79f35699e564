//! CLI adapters - terminal input and output for the `analyze` command.

mod analyze;
mod prompts;
mod report;

pub use analyze::{AnalyzeOptions, AnalyzeRunner, EXIT_STARTUP, EXIT_SUCCESS, EXIT_VALIDATION};
pub use prompts::{DecisionPrompter, PromptError};
pub use report::render_report;
