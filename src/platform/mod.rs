// Platform-specific code module

pub mod fs;
pub mod paths;

// Re-exports para imports limpios
pub use fs::{make_executable, remove_path};
pub use paths::{app_data_dir, desktop_dir, exe_name, resolve_output_dir, DEFAULT_OUTPUT_FOLDER};
