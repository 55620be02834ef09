//! Configuration for typesift.
//!
//! Centralized configuration for the detectors, bounded I/O and the email
//! unpacker. Every field has a default matching the reference behaviour, and
//! partial JSON documents fill the rest from those defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Limits for reading input files.
    pub io: IoConfig,
    /// Marker lists and thresholds for the content detectors.
    pub detectors: DetectorConfig,
    /// Email unpacking behaviour.
    pub unpack: UnpackConfig,
}

impl SiftConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// I/O configuration for file reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Maximum number of bytes read from one file (default: 64 MiB).
    pub max_read_bytes: u64,
    /// Files larger than this are rejected outright (default: 256 MiB).
    pub max_file_size: u64,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            max_read_bytes: 64 * 1024 * 1024,
            max_file_size: 256 * 1024 * 1024,
        }
    }
}

/// Any-match substring detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub markers: Vec<String>,
    /// Match markers ignoring ASCII case.
    pub case_insensitive: bool,
}

/// Any-match byte-regex detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Patterns in `regex::bytes` syntax.
    pub patterns: Vec<String>,
}

/// Keyword vote: positive when more than `threshold` distinct markers occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordVoteConfig {
    pub markers: Vec<String>,
    pub threshold: usize,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Detector configuration. The evaluation order of the script detectors is
/// fixed (javascript, powershell, wsf, visual basic) and is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub javascript: KeywordVoteConfig,
    pub powershell: MarkerConfig,
    pub wsf: PatternConfig,
    pub visual_basic: MarkerConfig,
    pub java: PatternConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            javascript: KeywordVoteConfig {
                markers: strings(&[
                    "var ", "function ", "eval", " true", " false", " null", "Math.", "alert(",
                ]),
                threshold: 5,
            },
            powershell: MarkerConfig {
                markers: strings(&[
                    "#requires -version",
                    "powershell.exe",
                    "powershell -",
                    "$PSVersionTable",
                    "Set-ExecutionPolicy",
                    "-ExecutionPolicy",
                    "Invoke-Expression",
                    "Invoke-WebRequest",
                    "New-Object System.Net.WebClient",
                    "[System.Convert]::FromBase64String",
                    "Get-WmiObject",
                    "Start-Process",
                ]),
                case_insensitive: true,
            },
            wsf: PatternConfig {
                patterns: strings(&[
                    r#"(?i)<script\s+language\s*=\s*["']?(j|vb|perl)script"#,
                    r"(?i)<job(\s|>)",
                    r"(?i)<package\s*>",
                ]),
            },
            visual_basic: MarkerConfig {
                markers: strings(&[
                    "Attribute VB_Name",
                    "On Error Resume Next",
                    "End Sub",
                    "End Function",
                    "WScript.Shell",
                    "WScript.CreateObject",
                    "Sub AutoOpen",
                    "Sub Document_Open",
                    "Sub Workbook_Open",
                ]),
                case_insensitive: true,
            },
            java: PatternConfig {
                patterns: strings(&[r"META-INF/MANIFEST\.MF", r"(?-u)\xCA\xFE\xBA\xBE"]),
            },
        }
    }
}

/// Email unpacker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnpackConfig {
    /// Leaf content types that are never emitted as entries.
    pub whitelisted_content_types: Vec<String>,
    /// Upper bound on leaf parts visited in one message.
    pub max_parts: usize,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            whitelisted_content_types: strings(&["text/plain", "text/html"]),
            max_parts: 4096,
        }
    }
}
