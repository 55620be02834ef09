//! Classification results.

use crate::core::platform::PlatformSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete file type: human label, canonical extension, platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Canonical extension without the dot. May be empty for opaque data.
    pub extension: String,
    pub platforms: PlatformSet,
}

impl Classification {
    pub fn new(label: impl Into<String>, extension: impl Into<String>, platforms: PlatformSet) -> Self {
        Self {
            label: label.into(),
            extension: extension.into(),
            platforms,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.label, self.extension, self.platforms)
    }
}

/// What a disambiguator concluded about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refinement {
    Refined(Classification),
    /// The content did not allow a more precise type.
    NoRefinement,
}

impl Refinement {
    pub fn refined(label: &str, extension: &str, platforms: PlatformSet) -> Self {
        Refinement::Refined(Classification::new(label, extension, platforms))
    }
}

/// Outcome of running the classifier over one file.
///
/// `analyze_further` is informational: the matching rule suggests
/// extension-specific analysis even though a type was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Identification {
    Identified {
        analyze_further: bool,
        #[serde(flatten)]
        classification: Classification,
    },
    /// A functional rule matched but its disambiguator could not refine the
    /// type. The scan stops here; later rules are not consulted.
    Unrefined { analyze_further: bool },
    /// No rule matched.
    Unclassified,
}

impl Identification {
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            Identification::Identified { classification, .. } => Some(classification),
            _ => None,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        self.classification().map(|c| c.extension.as_str())
    }

    pub fn label(&self) -> Option<&str> {
        self.classification().map(|c| c.label.as_str())
    }

    pub fn platforms(&self) -> Option<PlatformSet> {
        self.classification().map(|c| c.platforms)
    }

    pub fn analyze_further(&self) -> bool {
        match self {
            Identification::Identified { analyze_further, .. }
            | Identification::Unrefined { analyze_further } => *analyze_further,
            Identification::Unclassified => false,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, Identification::Unclassified)
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identification::Identified { classification, .. } => classification.fmt(f),
            Identification::Unrefined { .. } => f.write_str("unrefined"),
            Identification::Unclassified => f.write_str("unclassified"),
        }
    }
}
