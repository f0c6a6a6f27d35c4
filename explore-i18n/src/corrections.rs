//! Post-translation correction rules
//!
//! Machine translation into Marathi gets a handful of tourism terms
//! consistently wrong (transliterating "hill station" instead of translating
//! it, for instance). Corrections are plain text substitutions applied to the
//! translated string before it is displayed.
//!
//! A [`CorrectionPipeline`] is one ordered list of [`CorrectionRule`]s for one
//! target language. Rules run in order and every rule sees the output of the
//! rules before it, so the order of the list is part of the behaviour.
//!
//! # Example
//!
//! ```ignore
//! use explore_i18n::corrections::CorrectionPipeline;
//!
//! let pipeline = CorrectionPipeline::marathi();
//! let fixed = pipeline.apply("mr", "महाराष्ट्र एक्सप्लोर करा");
//! assert_eq!(fixed, "महाराष्ट्राचा शोध घ्या");
//! ```

use crate::language::normalize_language;
use regex::Regex;
use tracing::error;

/// Language the built-in correction table is written for
pub const MARATHI: &str = "mr";

/// Default Marathi correction table as `(regex, replacement)` pairs
///
/// Longer phrases come before their prefixes so the plural forms win.
const MARATHI_TABLE: &[(&str, &str)] = &[
    ("हिल स्टेशन्स", "थंड हवेची ठिकाणे"),
    ("हिल स्टेशन", "थंड हवेचे ठिकाण"),
    ("बीचेस", "समुद्रकिनारे"),
    ("बीच", "समुद्रकिनारा"),
    ("फोर्ट्स", "किल्ले"),
    ("फोर्ट", "किल्ला"),
    ("हेरिटेज", "वारसा"),
    ("धार्मिक साइट्स", "धार्मिक स्थळे"),
    ("साइट्स", "स्थळे"),
    (r"\s+([,.!?।])", "$1"),
    (r"\s{2,}", " "),
];

/// Final pass for the "Explore X" family of phrases
///
/// Providers render "Explore Maharashtra" as a transliterated imperative.
/// These two substitutions always run after the table, full phrase first.
const EXPLORE_PHRASES: &[(&str, &str)] = &[
    ("महाराष्ट्र एक्सप्लोर करा", "महाराष्ट्राचा शोध घ्या"),
    ("एक्सप्लोर करा", "शोध घ्या"),
];

/// Errors raised while building correction rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionError {
    /// A table pattern is not a valid regular expression
    InvalidPattern(String),
    /// A correction table file could not be read or parsed
    LoadError(String),
}

impl std::fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionError::InvalidPattern(msg) => write!(f, "Invalid correction pattern: {}", msg),
            CorrectionError::LoadError(msg) => write!(f, "Failed to load corrections: {}", msg),
        }
    }
}

impl std::error::Error for CorrectionError {}

/// A single substitution
#[derive(Debug, Clone)]
pub enum CorrectionRule {
    /// Regex substitution over every match; `$1` style references allowed
    TableRule { pattern: Regex, replacement: String },
    /// Literal substitution over every occurrence
    FixedPhrase { from: String, to: String },
}

impl CorrectionRule {
    /// Compile a table rule
    pub fn table(pattern: &str, replacement: &str) -> Result<Self, CorrectionError> {
        let regex = Regex::new(pattern).map_err(|e| {
            CorrectionError::InvalidPattern(format!("'{}': {}", pattern, e))
        })?;

        Ok(CorrectionRule::TableRule {
            pattern: regex,
            replacement: replacement.to_string(),
        })
    }

    /// Build a fixed-phrase rule
    pub fn fixed(from: &str, to: &str) -> Self {
        CorrectionRule::FixedPhrase {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Apply this rule to `text`
    pub fn apply(&self, text: &str) -> String {
        match self {
            CorrectionRule::TableRule {
                pattern,
                replacement,
            } => pattern.replace_all(text, replacement.as_str()).into_owned(),
            CorrectionRule::FixedPhrase { from, to } => {
                if from.is_empty() {
                    text.to_string()
                } else {
                    text.replace(from.as_str(), to)
                }
            }
        }
    }

    /// Short tag naming the rule kind, used in logs and tests
    pub fn kind(&self) -> &'static str {
        match self {
            CorrectionRule::TableRule { .. } => "table-rule",
            CorrectionRule::FixedPhrase { .. } => "fixed-phrase",
        }
    }
}

/// The two "Explore X" fixed phrases, in the order they must run
pub fn explore_phrase_fixes() -> Vec<CorrectionRule> {
    EXPLORE_PHRASES
        .iter()
        .map(|(from, to)| CorrectionRule::fixed(from, to))
        .collect()
}

/// The built-in Marathi table rules, without the final pass
pub fn default_marathi_table() -> Vec<CorrectionRule> {
    MARATHI_TABLE
        .iter()
        .filter_map(|(pattern, replacement)| match CorrectionRule::table(pattern, replacement) {
            Ok(rule) => Some(rule),
            Err(e) => {
                error!("Skipping built-in correction: {}", e);
                None
            }
        })
        .collect()
}

/// Ordered corrections for one target language
#[derive(Debug, Clone)]
pub struct CorrectionPipeline {
    language: String,
    rules: Vec<CorrectionRule>,
}

impl CorrectionPipeline {
    /// Create a pipeline from an explicit rule list, used as given
    pub fn new(language: &str, rules: Vec<CorrectionRule>) -> Self {
        Self {
            language: normalize_language(language),
            rules,
        }
    }

    /// Create a pipeline from a correction table
    ///
    /// For Marathi the "Explore X" fixed phrases are appended after the
    /// table so they always run last.
    pub fn with_table(language: &str, table: Vec<CorrectionRule>) -> Self {
        let mut pipeline = Self::new(language, table);
        if pipeline.language == MARATHI {
            pipeline.rules.extend(explore_phrase_fixes());
        }
        pipeline
    }

    /// The built-in Marathi pipeline
    pub fn marathi() -> Self {
        Self::with_table(MARATHI, default_marathi_table())
    }

    /// Language this pipeline corrects
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Rules in application order
    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    /// Whether translations into `target_language` are corrected
    pub fn applies_to(&self, target_language: &str) -> bool {
        normalize_language(target_language) == self.language
    }

    /// Correct `text` translated into `target_language`
    ///
    /// Text for any other language is returned unchanged.
    pub fn apply(&self, target_language: &str, text: &str) -> String {
        if !self.applies_to(target_language) {
            return text.to_string();
        }

        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}

impl Default for CorrectionPipeline {
    fn default() -> Self {
        Self::marathi()
    }
}
