//! Token-language detectors.
//!
//! Each detector is a pure predicate over raw bytes. None of them decode the
//! input; binary, truncated or non-UTF-8 content simply fails to match.

use crate::config::{DetectorConfig, KeywordVoteConfig, MarkerConfig, PatternConfig};
use crate::error::{Error, Result};
use aho_corasick::AhoCorasick;
use memchr::memmem::Finder;
use once_cell::sync::Lazy;
use regex::bytes::RegexSet;
use tracing::trace;

/// Uniform detector capability.
pub trait Detector: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, data: &[u8]) -> bool;
}

/// Positive when any marker occurs.
pub struct MarkerDetector {
    name: String,
    matcher: Option<AhoCorasick>,
}

impl MarkerDetector {
    pub fn new(name: &str, cfg: &MarkerConfig) -> Result<Self> {
        let markers: Vec<&str> = cfg.markers.iter().filter(|m| !m.is_empty()).map(String::as_str).collect();
        let matcher = if markers.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .ascii_case_insensitive(cfg.case_insensitive)
                .build(&markers)
                .map_err(|e| Error::Config(format!("{name} markers: {e}")))?;
            Some(ac)
        };
        Ok(Self {
            name: name.to_string(),
            matcher,
        })
    }
}

impl Detector for MarkerDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, data: &[u8]) -> bool {
        match &self.matcher {
            Some(ac) => ac.is_match(data),
            None => false,
        }
    }
}

/// Positive when any byte pattern matches.
pub struct PatternDetector {
    name: String,
    set: RegexSet,
}

impl PatternDetector {
    pub fn new(name: &str, cfg: &PatternConfig) -> Result<Self> {
        let set = RegexSet::new(&cfg.patterns)
            .map_err(|e| Error::Config(format!("{name} patterns: {e}")))?;
        Ok(Self {
            name: name.to_string(),
            set,
        })
    }
}

impl Detector for PatternDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, data: &[u8]) -> bool {
        self.set.is_match(data)
    }
}

/// Coarse keyword vote: counts distinct markers present at least once and is
/// positive when the count is strictly greater than the threshold.
pub struct KeywordVote {
    name: String,
    finders: Vec<Finder<'static>>,
    threshold: usize,
}

impl KeywordVote {
    pub fn new(name: &str, cfg: &KeywordVoteConfig) -> Self {
        let finders = cfg
            .markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| Finder::new(m.as_bytes()).into_owned())
            .collect();
        Self {
            name: name.to_string(),
            finders,
            threshold: cfg.threshold,
        }
    }

    /// Number of distinct markers present in `data`.
    pub fn votes(&self, data: &[u8]) -> usize {
        self.finders
            .iter()
            .filter(|f| f.find(data).is_some())
            .count()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Detector for KeywordVote {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, data: &[u8]) -> bool {
        let votes = self.votes(data);
        trace!(detector = %self.name, votes, threshold = self.threshold, "keyword vote");
        votes > self.threshold
    }
}

/// Script conventions recognized inside generic containers and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    JavaScript,
    PowerShell,
    WindowsScript,
    VisualBasic,
}

/// The detectors used by the disambiguators.
///
/// `scripts` is ordered: when several heuristics fire, the earlier one wins.
pub struct DetectorSet {
    scripts: Vec<(ScriptKind, Box<dyn Detector>)>,
    java: Box<dyn Detector>,
}

static BUILTIN: Lazy<DetectorSet> = Lazy::new(|| {
    DetectorSet::from_config(&DetectorConfig::default())
        .expect("built-in detector configuration is invalid")
});

impl DetectorSet {
    pub fn from_config(cfg: &DetectorConfig) -> Result<Self> {
        let scripts: Vec<(ScriptKind, Box<dyn Detector>)> = vec![
            (
                ScriptKind::JavaScript,
                Box::new(KeywordVote::new("javascript", &cfg.javascript)),
            ),
            (
                ScriptKind::PowerShell,
                Box::new(MarkerDetector::new("powershell", &cfg.powershell)?),
            ),
            (
                ScriptKind::WindowsScript,
                Box::new(PatternDetector::new("wsf", &cfg.wsf)?),
            ),
            (
                ScriptKind::VisualBasic,
                Box::new(MarkerDetector::new("visualbasic", &cfg.visual_basic)?),
            ),
        ];
        Ok(Self {
            scripts,
            java: Box::new(PatternDetector::new("java", &cfg.java)?),
        })
    }

    /// The process-wide set built from the default configuration.
    pub fn builtin() -> &'static DetectorSet {
        &BUILTIN
    }

    /// Run one script detector.
    pub fn script(&self, kind: ScriptKind, data: &[u8]) -> bool {
        self.scripts
            .iter()
            .find(|(k, _)| *k == kind)
            .is_some_and(|(_, d)| d.detect(data))
    }

    /// First positive script detector in priority order.
    pub fn first_script(&self, data: &[u8]) -> Option<ScriptKind> {
        self.scripts
            .iter()
            .find(|(_, d)| d.detect(data))
            .map(|(k, _)| *k)
    }

    pub fn wsf(&self, data: &[u8]) -> bool {
        self.script(ScriptKind::WindowsScript, data)
    }

    pub fn java(&self, data: &[u8]) -> bool {
        self.java.detect(data)
    }

    /// Detector names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.scripts
            .iter()
            .map(|(_, d)| d.name())
            .chain(std::iter::once(self.java.name()))
            .collect()
    }
}
