//! The classifier: one scan of the rule table per file.

use crate::core::classification::{Identification, Refinement};
use crate::core::file_view::FileView;
use crate::identify::detectors::DetectorSet;
use crate::identify::rules::{Rule, RuleTable};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Split a magic description into its token set.
///
/// Tokens are separated by whitespace and commas are dropped, so
/// `"Zip archive data, at least v2.0"` yields `Zip`, `archive`, `data`, ...
pub fn tokenize_magic(magic: &str) -> HashSet<String> {
    magic
        .split_whitespace()
        .map(|t| t.replace(',', ""))
        .filter(|t| !t.is_empty())
        .collect()
}

/// A rule table paired with the detectors its disambiguators consult.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    table: &'a RuleTable,
    detectors: &'a DetectorSet,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a RuleTable, detectors: &'a DetectorSet) -> Self {
        Self { table, detectors }
    }

    pub fn table(&self) -> &'a RuleTable {
        self.table
    }

    pub fn detectors(&self) -> &'a DetectorSet {
        self.detectors
    }

    /// Classify `file`. Deterministic and side-effect free apart from logging.
    pub fn identify(&self, file: &FileView) -> Identification {
        let tokens = tokenize_magic(file.magic());
        let Some((index, rule)) = self.table.first_match(&tokens, file.mime()) else {
            debug!(magic = %file.magic(), mime = %file.mime(), "no rule matched");
            return Identification::Unclassified;
        };
        trace!(index, rule = %rule, "rule matched");

        match rule {
            Rule::Literal(r) => Identification::Identified {
                analyze_further: r.analyze_further,
                classification: r.classification(),
            },
            Rule::Functional(r) => match (r.disambiguate)(file, self.detectors) {
                Refinement::Refined(classification) => {
                    debug!(disambiguator = r.name, result = %classification, "refined");
                    Identification::Identified {
                        analyze_further: r.analyze_further,
                        classification,
                    }
                }
                Refinement::NoRefinement => {
                    debug!(disambiguator = r.name, "no refinement");
                    Identification::Unrefined {
                        analyze_further: r.analyze_further,
                    }
                }
            },
        }
    }
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier<'static> {
    /// Built-in rule table with the default detectors.
    pub fn builtin() -> Self {
        Self::new(RuleTable::builtin(), DetectorSet::builtin())
    }
}

/// Classify `file` with the built-in table and detectors.
pub fn identify(file: &FileView) -> Identification {
    Classifier::builtin().identify(file)
}
