//! Language selection and translation corrections for the Explore Maharashtra portal
//!
//! Page text is written in English. This crate holds the pieces of the
//! runtime translation layer that need no network access:
//!
//! - [`language`] - language codes and the visitor's language-selection store
//! - [`corrections`] - ordered post-translation substitutions per target language
//! - [`loader`] - correction tables loaded from JSON files

pub mod corrections;
pub mod language;
pub mod loader;

pub use corrections::{CorrectionError, CorrectionPipeline, CorrectionRule, MARATHI};
pub use language::{
    DEFAULT_LANGUAGE, LanguageError, LanguageStore, is_default_language, normalize_language,
    validate_language,
};
pub use loader::{load_correction_table, load_pipeline, parse_correction_table};
