/// Command-line parsing and the session runner
pub mod cli;
/// Defaults and limits shared across the crate
pub mod configuration;
/// Crate error type and constructors
pub mod error;
/// Snapshot blob stores
pub mod store;
/// Text label view bound to an overlay
pub mod visualization;
