//! Process-lifetime translation cache
//!
//! One entry per exact `(source text, target language)` pair. Entries are
//! never evicted or replaced: the first translation stored for a key is the
//! one every later request sees. The cache lives as long as the value that
//! owns it, so constructing a new gateway with a new cache starts empty.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Cache key: the exact pair as requested
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub target_language: String,
}

impl CacheKey {
    pub fn new(text: &str, target_language: &str) -> Self {
        Self {
            text: text.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Shared, append-only map of translations
///
/// Safe to share between concurrent requests behind an `Arc`.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: RwLock<HashMap<CacheKey, String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached translation
    pub async fn get(&self, text: &str, target_language: &str) -> Option<String> {
        let key = CacheKey::new(text, target_language);
        self.entries.read().await.get(&key).cloned()
    }

    /// Store a translation unless the key already has one
    ///
    /// Returns the value now cached for the key, which is the earlier value
    /// if two requests for the same pair raced each other.
    pub async fn insert(&self, text: &str, target_language: &str, translated: String) -> String {
        let key = CacheKey::new(text, target_language);
        self.entries
            .write()
            .await
            .entry(key)
            .or_insert(translated)
            .clone()
    }

    pub async fn contains(&self, text: &str, target_language: &str) -> bool {
        let key = CacheKey::new(text, target_language);
        self.entries.read().await.contains_key(&key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
