use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use songfix_generate::GenerateOptions;
use songfix_generate::model::{DEFAULT_SEQUENCE_FILE_FIELD, DEFAULT_SEQUENCE_HEADER_FIELD};

use super::WorkspaceResult;
use super::atomic::write_bytes_atomic;

pub const DEFAULT_SETTINGS_PATH: &str = "songfix.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings read from `songfix.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureSettings {
    /// Directory that receives generated fixture pairs.
    pub out_dir: PathBuf,
    /// Registry response document listing the available schemas.
    pub schemas_path: Option<PathBuf>,
    pub sequence_file_field: String,
    pub sequence_header_field: String,
    pub log_format: LogFormat,
    /// Optional NDJSON log file, appended to on every run.
    pub log_file: Option<PathBuf>,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("fixtures"),
            schemas_path: None,
            sequence_file_field: DEFAULT_SEQUENCE_FILE_FIELD.to_string(),
            sequence_header_field: DEFAULT_SEQUENCE_HEADER_FIELD.to_string(),
            log_format: LogFormat::Text,
            log_file: None,
        }
    }
}

impl FixtureSettings {
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            sequence_file_field: self.sequence_file_field.clone(),
            sequence_header_field: self.sequence_header_field.clone(),
        }
    }
}

/// Load settings from `path`, falling back to defaults when it does not exist.
pub fn load_settings(path: &Path) -> WorkspaceResult<FixtureSettings> {
    if !path.exists() {
        return Ok(FixtureSettings::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_settings(path: &Path, settings: &FixtureSettings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("songfix_settings_{label}_{}.toml", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings(&temp_path("missing")).expect("load defaults");
        assert_eq!(settings, FixtureSettings::default());
        assert_eq!(settings.generate_options(), GenerateOptions::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("partial");
        let contents = "out_dir = \"out\"\nlog_format = \"json\"\nsequence_header_field = \"seq_id\"\n";
        std::fs::write(&path, contents).expect("write settings");

        let settings = load_settings(&path).expect("load settings");
        assert_eq!(settings.out_dir, PathBuf::from("out"));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.sequence_header_field, "seq_id");
        assert_eq!(settings.sequence_file_field, "fasta_file_name");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn saved_settings_load_back() {
        let path = temp_path("roundtrip");
        let mut settings = FixtureSettings::default();
        settings.schemas_path = Some(PathBuf::from("registry.json"));
        save_settings(&path, &settings).expect("save settings");

        assert_eq!(load_settings(&path).expect("load settings"), settings);
        let _ = std::fs::remove_file(&path);
    }
}
