//! Configuration model for jlock.
//!
//! Settings come from three layers: built-in defaults, an optional YAML file
//! (`--config`), and command-line flags. YAML parsing is forward-compatible
//! (unknown fields are ignored) and values are validated after merging.

mod model;
mod operations;


// Re-export public API
pub use model::{Config, ConfigOverrides};
