//! File type identification.
//!
//! The [`Classifier`] scans the ordered [`RuleTable`] once per file. Literal
//! rules decide directly; functional rules hand the file to a disambiguator
//! which consults content, children and the [`DetectorSet`].

pub mod classifier;
pub mod containers;
pub mod detectors;
pub mod disambiguate;
pub mod probe;
pub mod rules;
mod table;

pub use classifier::{identify, tokenize_magic, Classifier};
pub use detectors::{Detector, DetectorSet, KeywordVote, MarkerDetector, PatternDetector, ScriptKind};
pub use probe::{probe_view, InferProbe, Signature, SignatureProvider};
pub use rules::{Disambiguator, FunctionalRule, LiteralRule, Rule, RuleTable};
