//! Classification rules and the ordered rule table.

use crate::core::classification::{Classification, Refinement};
use crate::core::file_view::FileView;
use crate::core::platform::PlatformSet;
use crate::error::RuleTableError;
use crate::identify::detectors::DetectorSet;
use crate::identify::table;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

/// Content-aware refinement of a coarse magic/mime match.
pub type Disambiguator = fn(&FileView, &DetectorSet) -> Refinement;

/// A rule whose magic/mime match alone decides the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRule {
    pub magic_tokens: Vec<String>,
    pub mime_contains: String,
    pub extension: String,
    pub label: String,
    pub platforms: PlatformSet,
    pub analyze_further: bool,
}

/// A rule that hands the file to a disambiguator.
#[derive(Clone)]
pub struct FunctionalRule {
    pub magic_tokens: Vec<String>,
    pub mime_contains: String,
    pub analyze_further: bool,
    /// Name of the disambiguator, for logs and listings.
    pub name: &'static str,
    pub disambiguate: Disambiguator,
}

impl fmt::Debug for FunctionalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalRule")
            .field("magic_tokens", &self.magic_tokens)
            .field("mime_contains", &self.mime_contains)
            .field("analyze_further", &self.analyze_further)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    Literal(LiteralRule),
    Functional(FunctionalRule),
}

impl Rule {
    pub fn literal(
        magic_tokens: &[&str],
        mime_contains: &str,
        extension: &str,
        label: &str,
        platforms: PlatformSet,
        analyze_further: bool,
    ) -> Self {
        Rule::Literal(LiteralRule {
            magic_tokens: magic_tokens.iter().map(|t| t.to_string()).collect(),
            mime_contains: mime_contains.to_string(),
            extension: extension.to_string(),
            label: label.to_string(),
            platforms,
            analyze_further,
        })
    }

    pub fn functional(
        magic_tokens: &[&str],
        mime_contains: &str,
        analyze_further: bool,
        name: &'static str,
        disambiguate: Disambiguator,
    ) -> Self {
        Rule::Functional(FunctionalRule {
            magic_tokens: magic_tokens.iter().map(|t| t.to_string()).collect(),
            mime_contains: mime_contains.to_string(),
            analyze_further,
            name,
            disambiguate,
        })
    }

    pub fn magic_tokens(&self) -> &[String] {
        match self {
            Rule::Literal(r) => &r.magic_tokens,
            Rule::Functional(r) => &r.magic_tokens,
        }
    }

    pub fn mime_contains(&self) -> &str {
        match self {
            Rule::Literal(r) => &r.mime_contains,
            Rule::Functional(r) => &r.mime_contains,
        }
    }

    pub fn analyze_further(&self) -> bool {
        match self {
            Rule::Literal(r) => r.analyze_further,
            Rule::Functional(r) => r.analyze_further,
        }
    }

    pub fn is_functional(&self) -> bool {
        matches!(self, Rule::Functional(_))
    }

    /// All rule tokens present in `tokens` and the mime substring present in `mime`.
    pub fn matches(&self, tokens: &HashSet<String>, mime: &str) -> bool {
        self.magic_tokens().iter().all(|t| tokens.contains(t)) && mime.contains(self.mime_contains())
    }
}

impl LiteralRule {
    pub fn classification(&self) -> Classification {
        Classification::new(self.label.clone(), self.extension.clone(), self.platforms)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self.magic_tokens().join(" ");
        match self {
            Rule::Literal(r) => write!(
                f,
                "[{}] mime~{:?} -> {} ({}) [{}]",
                tokens, r.mime_contains, r.label, r.extension, r.platforms
            ),
            Rule::Functional(r) => {
                write!(f, "[{}] mime~{:?} -> {}()", tokens, r.mime_contains, r.name)
            }
        }
    }
}

/// Ordered, validated, immutable list of rules. The first matching rule wins.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

static BUILTIN: Lazy<RuleTable> =
    Lazy::new(|| RuleTable::new(table::builtin_rules()).expect("built-in rule table is malformed"));

impl RuleTable {
    /// Validate and freeze a rule list.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleTableError> {
        let mut first_functional: Option<usize> = None;
        for (index, rule) in rules.iter().enumerate() {
            validate_tokens(index, rule.magic_tokens())?;
            match rule {
                Rule::Literal(r) => {
                    if let Some(functional) = first_functional {
                        return Err(RuleTableError::LiteralAfterFunctional { index, functional });
                    }
                    if r.extension.is_empty() {
                        return Err(RuleTableError::EmptyField {
                            index,
                            field: "extension",
                        });
                    }
                    if r.label.is_empty() {
                        return Err(RuleTableError::EmptyField {
                            index,
                            field: "label",
                        });
                    }
                    if r.platforms.is_empty() {
                        return Err(RuleTableError::NoPlatforms { index });
                    }
                }
                Rule::Functional(_) => {
                    first_functional.get_or_insert(index);
                }
            }
        }
        Ok(Self { rules })
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index and rule of the first match.
    pub fn first_match(&self, tokens: &HashSet<String>, mime: &str) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, r)| r.matches(tokens, mime))
    }
}

fn validate_tokens(index: usize, tokens: &[String]) -> Result<(), RuleTableError> {
    if tokens.is_empty() {
        return Err(RuleTableError::NoTokens { index });
    }
    for token in tokens {
        if token.is_empty() {
            return Err(RuleTableError::EmptyToken { index });
        }
        if token.chars().any(char::is_whitespace) {
            return Err(RuleTableError::WhitespaceInToken {
                index,
                token: token.clone(),
            });
        }
    }
    Ok(())
}
