//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a hand-written `settings.toml`
//! only needs the keys it changes.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// DrillConfig
// ---------------------------------------------------------------------------

/// Shape of generated drill problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Operands per problem (2–10 in the UI).
    pub operand_count: usize,
    /// Fewest digits any operand may have.
    pub min_digits: u32,
    /// Most digits any operand may have (at most 16).
    pub max_digits: u32,
    /// Desired length of the whole readout in seconds (3–30); mapped to the
    /// base speech speed.
    pub speech_duration_secs: f64,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            operand_count: 3,
            min_digits: 8,
            max_digits: 16,
            speech_duration_secs: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig
// ---------------------------------------------------------------------------

/// Connection settings for the speech synthesis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// When `false` the readout is skipped and only text is shown.
    pub enabled: bool,
    /// Base URL of the VOICEVOX-compatible engine.
    pub base_url: String,
    /// Voice style id passed as `speaker`.
    pub speaker_id: u32,
    /// Maximum seconds to wait for one engine request.
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://127.0.0.1:50021".into(),
            speaker_id: 2,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// ReadoutConfig
// ---------------------------------------------------------------------------

/// What a new readout request does while one is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusyPolicy {
    /// Stop the current readout and start the new one.
    CancelAndRestart,
    /// Ignore the new request.
    RejectWhileBusy,
}

impl Default for BusyPolicy {
    fn default() -> Self {
        Self::CancelAndRestart
    }
}

/// Readout behaviour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutConfig {
    pub busy_policy: BusyPolicy,
    /// Where WAV clips are written when no sound device is used.  `None`
    /// means [`AppPaths::output_dir`].
    pub output_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use yomiage::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Problem generation settings.
    pub drill: DrillConfig,
    /// Synthesis engine settings.
    pub synthesis: SynthesisConfig,
    /// Readout state machine settings.
    pub readout: ReadoutConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory that receives WAV output.
    pub fn output_dir(&self) -> PathBuf {
        self.readout
            .output_dir
            .clone()
            .unwrap_or_else(|| AppPaths::new().output_dir)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.drill.operand_count, 3);
        assert_eq!(cfg.drill.min_digits, 8);
        assert_eq!(cfg.drill.max_digits, 16);
        assert_eq!(cfg.drill.speech_duration_secs, 10.0);
        assert!(cfg.synthesis.enabled);
        assert_eq!(cfg.synthesis.base_url, "http://127.0.0.1:50021");
        assert_eq!(cfg.synthesis.speaker_id, 2);
        assert_eq!(cfg.synthesis.timeout_secs, 30);
        assert_eq!(cfg.readout.busy_policy, BusyPolicy::CancelAndRestart);
        assert!(cfg.readout.output_dir.is_none());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.drill.operand_count = 5;
        cfg.drill.min_digits = 2;
        cfg.drill.max_digits = 4;
        cfg.drill.speech_duration_secs = 20.0;
        cfg.synthesis.base_url = "http://voicevox.local:50021".into();
        cfg.synthesis.speaker_id = 8;
        cfg.readout.busy_policy = BusyPolicy::RejectWhileBusy;
        cfg.readout.output_dir = Some(dir.path().join("wav"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
        assert_eq!(loaded.output_dir(), dir.path().join("wav"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[drill]\nmax_digits = 12\n\n[readout]\nbusy_policy = \"RejectWhileBusy\"\n")
            .unwrap();

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.drill.max_digits, 12);
        assert_eq!(loaded.drill.min_digits, 8);
        assert_eq!(loaded.synthesis, SynthesisConfig::default());
        assert_eq!(loaded.readout.busy_policy, BusyPolicy::RejectWhileBusy);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[drill\noperand_count = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
