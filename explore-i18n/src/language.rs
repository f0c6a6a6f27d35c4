//! Language codes and the language-selection store
//!
//! Every piece of literal text on the portal is written in English. The
//! visitor picks a display language, which is remembered between visits and
//! broadcast to every translator overlay on the page.
//!
//! # Example
//!
//! ```ignore
//! use explore_i18n::language::LanguageStore;
//!
//! let store = LanguageStore::new();
//! let mut changes = store.subscribe();
//!
//! store.set_language("mr")?;
//! assert_eq!(store.current(), "mr");
//! assert!(changes.has_changed()?);
//! ```

use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Language all source text is written in
pub const DEFAULT_LANGUAGE: &str = "en";

/// Errors raised while validating or storing a language selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The language code is empty or not a valid locale
    InvalidLanguage(String),
    /// The selection could not be written to its backing file
    Storage(String),
}

impl std::fmt::Display for LanguageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
            LanguageError::Storage(msg) => write!(f, "Language storage error: {}", msg),
        }
    }
}

impl std::error::Error for LanguageError {}

/// Normalize a language code to its lowercase base language
///
/// - `mr-IN` → `mr`
/// - `EN` → `en`
/// - `hi` → `hi` (unchanged)
pub fn normalize_language(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

/// Check that a language code is a well-formed locale identifier
pub fn validate_language(code: &str) -> Result<(), LanguageError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(LanguageError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    code.parse::<Locale>().map_err(|e| {
        LanguageError::InvalidLanguage(format!("Failed to parse language '{}': {}", code, e))
    })?;

    Ok(())
}

/// Whether text in `code` needs no translation at all
pub fn is_default_language(code: &str) -> bool {
    normalize_language(code) == DEFAULT_LANGUAGE
}

/// On-disk shape of a persisted selection
#[derive(Debug, Serialize, Deserialize)]
struct StoredLanguage {
    lang: String,
}

/// Holds the visitor's current display language
///
/// The store is constructed explicitly and handed to whoever needs it, so
/// tests can build as many independent stores as they like. When created
/// with [`LanguageStore::persistent`], every change is written to a small
/// JSON file and read back on the next start.
#[derive(Debug)]
pub struct LanguageStore {
    sender: watch::Sender<String>,
    path: Option<PathBuf>,
}

impl LanguageStore {
    /// Create an in-memory store starting at [`DEFAULT_LANGUAGE`]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(DEFAULT_LANGUAGE.to_string());
        Self { sender, path: None }
    }

    /// Create a store backed by `path`
    ///
    /// A missing, unreadable or invalid file is not an error: the store
    /// starts at [`DEFAULT_LANGUAGE`] and the file is created on the first
    /// [`set_language`](Self::set_language).
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = read_stored_language(&path).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        debug!("Language store at {} starts with '{}'", path.display(), initial);

        let (sender, _) = watch::channel(initial);
        Self {
            sender,
            path: Some(path),
        }
    }

    /// The language currently selected
    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    /// Select a new display language
    ///
    /// The code is validated and normalized first. Subscribers are only
    /// notified when the language actually changes.
    pub fn set_language(&self, code: &str) -> Result<(), LanguageError> {
        validate_language(code)?;
        let lang = normalize_language(code);

        if let Some(path) = &self.path {
            let body = serde_json::to_string(&StoredLanguage { lang: lang.clone() })
                .map_err(|e| LanguageError::Storage(e.to_string()))?;
            fs::write(path, body).map_err(|e| {
                LanguageError::Storage(format!("Failed to write '{}': {}", path.display(), e))
            })?;
        }

        self.sender.send_if_modified(|current| {
            if *current == lang {
                false
            } else {
                *current = lang;
                true
            }
        });
        Ok(())
    }

    /// Observe language changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.sender.subscribe()
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read_stored_language(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let stored: StoredLanguage = match serde_json::from_str(&content) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Ignoring unreadable language file {}: {}", path.display(), e);
            return None;
        }
    };

    match validate_language(&stored.lang) {
        Ok(()) => Some(normalize_language(&stored.lang)),
        Err(e) => {
            warn!("Ignoring stored language in {}: {}", path.display(), e);
            None
        }
    }
}
