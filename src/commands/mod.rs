// Command handlers module
pub mod download;
pub mod tools;
pub mod version;

// Re-exports for cleaner imports
pub use download::execute as download;
pub use tools::execute as tools;
pub use version::execute as version;
