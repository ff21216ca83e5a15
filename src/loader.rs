//! Loading a [`Payload`] from a configuration file.
//!
//! Two concrete formats share one schema: a top-level object whose `Payload`
//! key holds a list of instrument records.
//!
//! ```text
//! {"Payload": [
//!     {"ID": 1, "Name": "Master", "Address": "10.0.0.1:16001", "WU_allowed": false},
//!     {"ID": 7, "Name": "OMCEAS", "Address": "10.0.0.7:16007", "WU_allowed": true}
//! ]}
//! ```
//!
//! ```text
//! Payload:
//!   - ID: 1
//!     Name: Master
//!     Address: 10.0.0.1:16001
//!     WU_allowed: false
//! ```
//!
//! Each format is a [`RecordDecoder`] turning raw bytes into the flat record
//! list. Every entry point reads the whole file, decodes it, and hands the
//! records to [`Payload::from_records`]. Decode errors are returned to the
//! caller; a malformed file never yields an empty payload.
//!
//! # Usage
//!
//! ```rust,ignore
//! use container_payload::Payload;
//!
//! let payload = Payload::from_yaml("config/payload.yaml")?;
//! // or pick the decoder from the extension
//! let payload = Payload::load("config/payload.json")?;
//! ```

use crate::error::{PayloadError, PayloadResult};
use crate::instrument::Instrument;
use crate::payload::Payload;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk layout shared by all formats.
#[derive(Debug, Deserialize)]
struct PayloadFile {
    #[serde(rename = "Payload", default)]
    instruments: Vec<Instrument>,
}

/// Turns the raw contents of a payload source into its ordered record list.
pub trait RecordDecoder {
    /// Format handled by this decoder.
    fn format(&self) -> ConfigFormat;

    /// Decode records in the order they appear in the source.
    fn decode(&self, bytes: &[u8]) -> PayloadResult<Vec<Instrument>>;
}

/// Decoder for JSON sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl RecordDecoder for JsonDecoder {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }

    fn decode(&self, bytes: &[u8]) -> PayloadResult<Vec<Instrument>> {
        let file: PayloadFile = serde_json::from_slice(bytes)?;
        Ok(file.instruments)
    }
}

/// Decoder for YAML sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl RecordDecoder for YamlDecoder {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Yaml
    }

    fn decode(&self, bytes: &[u8]) -> PayloadResult<Vec<Instrument>> {
        let file: PayloadFile = serde_yaml::from_slice(bytes)?;
        Ok(file.instruments)
    }
}

/// Supported payload source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    /// Detect the format from the extension of `path`.
    pub fn from_path(path: &Path) -> PayloadResult<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| PayloadError::UnknownFormat(path.to_path_buf()))
    }

    /// Decoder for this format.
    pub fn decoder(self) -> &'static dyn RecordDecoder {
        match self {
            ConfigFormat::Json => &JsonDecoder,
            ConfigFormat::Yaml => &YamlDecoder,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => f.write_str("json"),
            ConfigFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Read a source in full. The file is closed before returning on every path.
fn read_source(path: &Path) -> PayloadResult<Vec<u8>> {
    let io_error = |source| PayloadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_error)?;
    Ok(bytes)
}

impl Payload {
    /// Load a payload from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> PayloadResult<Self> {
        Self::load_with(path, &JsonDecoder)
    }

    /// Load a payload from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> PayloadResult<Self> {
        Self::load_with(path, &YamlDecoder)
    }

    /// Load a payload, choosing the decoder from the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> PayloadResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        Self::load_with(path, format.decoder())
    }

    /// Load a payload with an explicit decoder.
    pub fn load_with<P: AsRef<Path>>(path: P, decoder: &dyn RecordDecoder) -> PayloadResult<Self> {
        let path = path.as_ref();
        let bytes = read_source(path)?;
        let payload = Self::from_bytes(&bytes, decoder)?;

        info!(
            path = %path.display(),
            format = %decoder.format(),
            instruments = payload.len(),
            "loaded payload"
        );
        Ok(payload)
    }

    /// Decode and fold an in-memory source.
    pub fn from_bytes(bytes: &[u8], decoder: &dyn RecordDecoder) -> PayloadResult<Self> {
        let records = decoder.decode(bytes)?;
        Self::from_records(records)
    }
}

/// Source location of a payload, as stored in settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSource {
    /// File to read.
    pub path: PathBuf,
    /// Explicit format; detected from the extension when `None`.
    pub format: Option<ConfigFormat>,
}

impl PayloadSource {
    /// Load the payload described by this source.
    pub fn load(&self) -> PayloadResult<Payload> {
        match self.format {
            Some(format) => Payload::load_with(&self.path, format.decoder()),
            None => Payload::load(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::UNSET_ID;
    use crate::state::State;

    const JSON: &str = r#"{"Payload": [
        {"ID": 1, "Name": "Master", "Address": "10.0.0.1:16001", "WU_allowed": false},
        {"ID": 7, "Name": "OMCEAS", "Address": "10.0.0.7:16007", "WU_allowed": true}
    ]}"#;

    const YAML: &str = "
Payload:
  - ID: 2
    Name: cRIO
    Address: 10.0.0.2:16002
    WU_allowed: false
  - ID: 0
    Name: spare
    Address: 10.0.0.99:16099
    WU_allowed: true
";

    #[test]
    fn test_json_decode() {
        let records = JsonDecoder.decode(JSON.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].name, "OMCEAS");
        assert!(records.iter().all(|r| r.state == State::Undefined));
    }

    #[test]
    fn test_yaml_decode_keeps_order() {
        let records = YamlDecoder.decode(YAML.as_bytes()).unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 0]);
    }

    #[test]
    fn test_from_bytes_applies_rules() {
        let payload = Payload::from_bytes(YAML.as_bytes(), &YamlDecoder).unwrap();
        assert_eq!(payload.ids(), vec![2]);
        assert!(payload.crio().unwrap().wu_allowed);
    }

    #[test]
    fn test_missing_fields_default() {
        let records = JsonDecoder.decode(br#"{"Payload": [{"ID": 4}]}"#).unwrap();
        assert_eq!(records[0].name, "unknown");
        assert_eq!(records[0].address, "unknown");
        assert!(!records[0].wu_allowed);
    }

    #[test]
    fn test_missing_payload_key_is_empty() {
        assert!(JsonDecoder.decode(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert!(JsonDecoder
            .decode(br#"{"payload": [{"ID": 4}]}"#)
            .unwrap()
            .is_empty());
        let records = JsonDecoder.decode(br#"{"Payload": [{"id": 4}]}"#).unwrap();
        assert_eq!(records[0].id, UNSET_ID);
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        assert!(matches!(
            JsonDecoder.decode(b"{\"Payload\": [ {\"ID\": "),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            YamlDecoder.decode(b"Payload:\n  - ID: [nope\n"),
            Err(PayloadError::Yaml(_))
        ));
    }

    #[test]
    fn test_record_without_id_is_unset() {
        let records = JsonDecoder
            .decode(br#"{"Payload": [{"Name": "orphan"}]}"#)
            .unwrap();
        assert_eq!(records[0].id, UNSET_ID);
        assert_eq!(records[0].name, "orphan");
    }

    #[test]
    fn test_record_without_id_is_skipped() {
        let payload = Payload::from_bytes(
            b"Payload:\n  - Name: placeholder\n  - ID: 7\n",
            &YamlDecoder,
        )
        .unwrap();
        assert_eq!(payload.ids(), vec![7]);

        let payload = Payload::from_bytes(
            br#"{"Payload": [{"Name": "placeholder"}, {"ID": 7}]}"#,
            &JsonDecoder,
        )
        .unwrap();
        assert_eq!(payload.ids(), vec![7]);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("yaml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("toml"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("cfg/payload.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("cfg/payload")),
            Err(PayloadError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_decoder_reports_format() {
        assert_eq!(ConfigFormat::Json.decoder().format(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::Yaml.decoder().format(), ConfigFormat::Yaml);
    }
}
