//! Persisted number-mode settings.
//!
//! Stored as a flat, pretty-printed JSON object:
//!
//! ```json
//! {
//!   "selected_input_base": "hex",
//!   "selected_output_base": "bin",
//!   "per_byte": true
//! }
//! ```

use anyhow::{Context, Result};
use libdatadec::Base;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_CONFIG: &str = "data_decoder_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub selected_input_base: Option<Base>,
    pub selected_output_base: Option<Base>,
    pub per_byte: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            selected_input_base: None,
            selected_output_base: None,
            per_byte: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load(path: &Path) -> Settings {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                debug!(path = %path.display(), error = %format!("{:#}", e), "using default settings");
                Settings::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Settings> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let settings = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;
        Ok(())
    }

    /// Save, logging rather than returning any failure.
    pub fn persist(&self, path: &Path) {
        if let Err(e) = self.save(path) {
            warn!("could not save settings: {:#}", e);
        }
    }

    /// Both bases, with `from`/`to` overriding the stored values.
    pub fn resolve_bases(&self, from: Option<Base>, to: Option<Base>) -> Option<(Base, Base)> {
        let base_in = from.or(self.selected_input_base)?;
        let base_out = to.or(self.selected_output_base)?;
        Some((base_in, base_out))
    }

    pub fn describe(&self) -> String {
        fn show(base: Option<Base>) -> String {
            base.map(|b| b.to_string()).unwrap_or_else(|| "not set".to_string())
        }
        let mode = if self.per_byte { "per byte" } else { "whole value" };
        format!(
            "Input base:  {}\nOutput base: {}\nMode:        {}",
            show(self.selected_input_base),
            show(self.selected_output_base),
            mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.selected_input_base, None);
        assert_eq!(s.selected_output_base, None);
        assert!(s.per_byte);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let s = Settings {
            selected_input_base: Some(Base::Hex),
            selected_output_base: Some(Base::Bin),
            per_byte: false,
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path), s);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let s = Settings {
            selected_input_base: Some(Base::Dec),
            ..Settings::default()
        };
        s.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "{\n  \"selected_input_base\": \"dec\",\n  \"selected_output_base\": null,\n  \"per_byte\": true\n}"
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"selected_output_base": "oct"}"#).unwrap();
        let s = Settings::load(&path);
        assert_eq!(s.selected_input_base, None);
        assert_eq!(s.selected_output_base, Some(Base::Oct));
        assert!(s.per_byte);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("config.json");
        assert!(Settings::default().save(&path).is_err());
        Settings::default().persist(&path);
    }

    #[test]
    fn test_resolve_bases() {
        let s = Settings {
            selected_input_base: Some(Base::Hex),
            selected_output_base: None,
            per_byte: true,
        };
        assert_eq!(s.resolve_bases(None, None), None);
        assert_eq!(
            s.resolve_bases(None, Some(Base::Dec)),
            Some((Base::Hex, Base::Dec))
        );
        assert_eq!(
            s.resolve_bases(Some(Base::Bin), Some(Base::Oct)),
            Some((Base::Bin, Base::Oct))
        );
    }
}
