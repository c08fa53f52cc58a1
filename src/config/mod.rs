//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the drill
//! generator, the synthesis engine and the readout, `AppPaths` for
//! cross-platform directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, BusyPolicy, DrillConfig, ReadoutConfig, SynthesisConfig};
