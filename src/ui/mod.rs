// UI and status reporting module

pub mod prompts;
pub mod reporter;

// Re-export commonly used items for cleaner imports
pub use prompts::{output_folder_prompt, prompt_path, trim_path_input, wait_for_keypress};
pub use reporter::{ColoredReporter, PlainReporter, StatusReporter};
